//! Gradient fill from anchors under per-color supply limits.
//!
//! Generation runs in two phases:
//!
//! 1. **Ideal colors.** Every cell gets the inverse-square-distance weighted
//!    LAB blend of all anchor colors, optionally jittered with LAB noise.
//! 2. **Constrained assignment.** Cells are visited from the most certain
//!    (closest to an anchor) to the least, each taking the perceptually
//!    nearest palette color that still has fabric left. One greedy pass, no
//!    backtracking.
//!
//! Locked cells keep whatever they hold, and their fabric counts against the
//! supply available to everything else.

use quilt_color::{blend_lab, Lab, Srgb};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::GradientError;
use crate::geometry::pixel_center;
use crate::models::{Cell, ColorId, Grid, Palette};
use crate::quilt::Quilt;

/// Bounds an anchor's weight on its own cell.
const WEIGHT_EPSILON: f64 = 0.01;

pub const DEFAULT_DITHER_INTENSITY: f64 = 5.0;

/// Gradient generation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientOptions {
    /// Jitter ideal colors to break up flat bands.
    pub dither: bool,
    /// Peak noise in LAB units: lightness moves up to twice this, a/b up
    /// to this.
    pub intensity: f64,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            dither: false,
            intensity: DEFAULT_DITHER_INTENSITY,
        }
    }
}

impl GradientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dither(mut self, intensity: f64) -> Self {
        self.dither = true;
        self.intensity = intensity;
        self
    }
}

/// What a gradient run did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GradientReport {
    /// Cells that received a palette color.
    pub assigned: usize,
    /// Unlocked cells left empty because the palette ran out.
    pub cleared: usize,
    /// Cells skipped because they are locked.
    pub locked: usize,
}

/// Cooperative cancellation for gradient generation.
///
/// Checked once, between the two phases. A cancelled run leaves the quilt
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

struct AnchorPoint {
    x: f64,
    y: f64,
    lab: Lab,
}

/// Phase 1 output, one entry per cell.
struct IdealField {
    colors: Vec<Option<Srgb>>,
    /// Distance to the nearest anchor; lower is more certain.
    confidence: Vec<f64>,
}

impl Quilt {
    /// Fill the grid with a gradient between the anchors.
    ///
    /// Needs at least two anchors and one palette color. On success exactly
    /// one history snapshot is recorded.
    pub fn generate_gradient<R: Rng + ?Sized>(
        &mut self,
        options: &GradientOptions,
        rng: &mut R,
    ) -> Result<GradientReport, GradientError> {
        self.generate_gradient_cancellable(options, rng, &CancelToken::new())
    }

    /// [`generate_gradient`](Self::generate_gradient) that gives up with
    /// [`GradientError::Cancelled`] if `cancel` fires during phase 1.
    pub fn generate_gradient_cancellable<R: Rng + ?Sized>(
        &mut self,
        options: &GradientOptions,
        rng: &mut R,
        cancel: &CancelToken,
    ) -> Result<GradientReport, GradientError> {
        if self.palette.is_empty() {
            return Err(GradientError::EmptyPalette);
        }
        let anchors = anchor_points(&self.grid, &self.palette);
        if anchors.len() < 2 {
            return Err(GradientError::NotEnoughAnchors {
                found: anchors.len(),
            });
        }

        let field = ideal_colors(&self.grid, &anchors, options, rng);

        if cancel.is_cancelled() {
            tracing::info!("Gradient generation cancelled");
            return Err(GradientError::Cancelled);
        }

        self.history.push(self.grid.snapshot());
        let report = assign(self.grid.cells_mut(), &self.palette, &field);

        tracing::info!(
            anchors = anchors.len(),
            assigned = report.assigned,
            cleared = report.cleared,
            locked = report.locked,
            dither = options.dither,
            "Generated gradient"
        );
        Ok(report)
    }
}

fn anchor_points(grid: &Grid, palette: &Palette) -> Vec<AnchorPoint> {
    grid.anchors()
        .iter()
        .filter_map(|anchor| {
            let entry = palette.get(anchor.color_id)?;
            let (x, y) = pixel_center(anchor.col, anchor.row, 1.0);
            Some(AnchorPoint {
                x,
                y,
                lab: Lab::from(entry.color),
            })
        })
        .collect()
}

fn ideal_colors<R: Rng + ?Sized>(
    grid: &Grid,
    anchors: &[AnchorPoint],
    options: &GradientOptions,
    rng: &mut R,
) -> IdealField {
    let mut colors = Vec::with_capacity(grid.len());
    let mut confidence = Vec::with_capacity(grid.len());

    for index in 0..grid.len() {
        let (row, col) = grid.position(index);
        let (x, y) = pixel_center(col, row, 1.0);

        let mut nearest = f64::INFINITY;
        let weighted = anchors.iter().map(|anchor| {
            let d2 = (x - anchor.x).powi(2) + (y - anchor.y).powi(2);
            nearest = nearest.min(d2.sqrt());
            (anchor.lab, 1.0 / (d2 + WEIGHT_EPSILON))
        });
        let ideal = blend_lab(weighted).map(|lab| {
            if options.dither {
                Srgb::from(jitter(lab, options.intensity, &mut *rng))
            } else {
                Srgb::from(lab)
            }
        });

        colors.push(ideal);
        confidence.push(nearest);
    }

    IdealField { colors, confidence }
}

/// Uniform LAB noise of amplitude `2 * intensity` on lightness and
/// `intensity` on a/b. Lightness is clamped to its valid range; a/b are
/// left free and clamped later by the sRGB conversion.
fn jitter<R: Rng + ?Sized>(lab: Lab, intensity: f64, rng: &mut R) -> Lab {
    let mut noise = |amplitude: f64| rng.gen_range(-1.0..=1.0f64) * amplitude;
    let l = lab.l + noise(2.0 * intensity);
    let a = lab.a + noise(intensity);
    let b = lab.b + noise(intensity);
    Lab::new(l.clamp(0.0, 100.0), a, b)
}

fn assign(cells: &mut [Cell], palette: &Palette, field: &IdealField) -> GradientReport {
    let choices: Vec<(ColorId, Lab)> = palette
        .iter()
        .map(|entry| (entry.id, Lab::from(entry.color)))
        .collect();

    // Locked cells keep their fabric, so it is not available to others.
    let mut remaining: Vec<i64> = palette
        .iter()
        .map(|entry| {
            let held = cells
                .iter()
                .filter(|c| c.locked && c.color_id == Some(entry.id))
                .count();
            entry.quantity as i64 - held as i64
        })
        .collect();

    let mut order: Vec<usize> = (0..cells.len()).collect();
    order.sort_by(|&a, &b| field.confidence[a].total_cmp(&field.confidence[b]));

    let mut report = GradientReport::default();
    for index in order {
        let cell = &mut cells[index];
        if cell.locked {
            report.locked += 1;
            continue;
        }

        let best = field.colors[index].and_then(|ideal| {
            let ideal = Lab::from(ideal);
            let mut best: Option<(usize, f64)> = None;
            for (i, (_, lab)) in choices.iter().enumerate() {
                if remaining[i] <= 0 {
                    continue;
                }
                let d = ideal.delta_e(*lab);
                if best.map_or(true, |(_, best_d)| d < best_d) {
                    best = Some((i, d));
                }
            }
            best.map(|(i, _)| i)
        });

        match best {
            Some(i) => {
                cell.color_id = Some(choices[i].0);
                remaining[i] -= 1;
                report.assigned += 1;
            }
            None => {
                cell.color_id = None;
                report.cleared += 1;
            }
        }
    }
    report
}
