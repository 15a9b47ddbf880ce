//! Saved project format.
//!
//! This is the JSON document exchanged with import/export and local
//! persistence. Exporting and re-importing reproduces an equivalent quilt.

use std::collections::HashSet;

use quilt_color::Srgb;
use serde::{Deserialize, Serialize};

use super::grid::{Anchor, Cell, Grid};
use super::layout::{
    Layout, Unit, DEFAULT_HEX_REAL_SIZE, DEFAULT_HEX_SIZE, DEFAULT_QUILT_HEIGHT,
    DEFAULT_QUILT_WIDTH,
};
use super::palette::{ColorId, Palette, PaletteColor};
use crate::error::ImportError;
use crate::quilt::Quilt;
use crate::services::edit::Editor;
use crate::services::history::History;

pub const PROJECT_VERSION: u32 = 1;

/// On-disk representation of a quilt.
///
/// `cols`, `rows` and `grid` are required; everything else falls back to a
/// default when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_hex_real_size")]
    pub hex_real_size: f64,

    #[serde(default = "default_quilt_width")]
    pub quilt_width: f64,

    #[serde(default = "default_quilt_height")]
    pub quilt_height: f64,

    #[serde(default)]
    pub unit: Unit,

    #[serde(default)]
    pub cols: Option<usize>,

    #[serde(default)]
    pub rows: Option<usize>,

    #[serde(default = "default_hex_size")]
    pub hex_size: f64,

    #[serde(default)]
    pub grid: Option<Vec<Cell>>,

    #[serde(default)]
    pub colors: Vec<ProjectColor>,

    #[serde(default = "default_next_color_id")]
    pub next_color_id: u32,

    #[serde(default)]
    pub anchors: Vec<Anchor>,

    #[serde(default)]
    pub show_numbers: bool,
}

/// A palette entry as stored in a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectColor {
    pub id: ColorId,
    pub rgb_hex: String,
    pub total: u32,
}

fn default_version() -> u32 {
    PROJECT_VERSION
}

fn default_hex_real_size() -> f64 {
    DEFAULT_HEX_REAL_SIZE
}

fn default_quilt_width() -> f64 {
    DEFAULT_QUILT_WIDTH
}

fn default_quilt_height() -> f64 {
    DEFAULT_QUILT_HEIGHT
}

fn default_hex_size() -> f64 {
    DEFAULT_HEX_SIZE
}

fn default_next_color_id() -> u32 {
    1
}

impl ProjectFile {
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Quilt {
    /// Snapshot of the live quilt in project format.
    pub fn to_project(&self) -> ProjectFile {
        let layout = &self.layout;
        ProjectFile {
            version: PROJECT_VERSION,
            hex_real_size: layout.hex_real_size,
            quilt_width: layout.quilt_width,
            quilt_height: layout.quilt_height,
            unit: layout.unit,
            cols: Some(self.grid.cols()),
            rows: Some(self.grid.rows()),
            hex_size: layout.hex_size,
            grid: Some(self.grid.cells().to_vec()),
            colors: self
                .palette
                .iter()
                .map(|entry| ProjectColor {
                    id: entry.id,
                    rgb_hex: entry.color.to_hex(),
                    total: entry.quantity,
                })
                .collect(),
            next_color_id: self.palette.next_id(),
            anchors: self.grid.anchors().to_vec(),
            show_numbers: self.show_numbers,
        }
    }

    /// Build a quilt from a project file.
    ///
    /// Fails without side effects if required fields are missing, the grid
    /// length disagrees with `cols * rows`, or a palette color is not valid
    /// hex. Dangling color references are dropped rather than rejected.
    pub fn from_project(file: ProjectFile) -> Result<Self, ImportError> {
        let cols = file.cols.ok_or(ImportError::MissingField("cols"))?;
        let rows = file.rows.ok_or(ImportError::MissingField("rows"))?;
        let mut cells = file.grid.ok_or(ImportError::MissingField("grid"))?;

        let expected = cols
            .checked_mul(rows)
            .ok_or(ImportError::GridTooLarge { cols, rows })?;
        if cells.len() != expected || expected == 0 {
            return Err(ImportError::GridSizeMismatch {
                expected,
                found: cells.len(),
            });
        }

        let mut seen = HashSet::with_capacity(file.colors.len());
        let colors = file
            .colors
            .into_iter()
            .map(|c| {
                if c.id == ColorId(0) {
                    return Err(ImportError::ReservedColorId);
                }
                if !seen.insert(c.id) {
                    return Err(ImportError::DuplicateColorId(c.id));
                }
                let color: Srgb = c
                    .rgb_hex
                    .parse()
                    .map_err(|source| ImportError::InvalidColor { id: c.id, source })?;
                Ok(PaletteColor {
                    id: c.id,
                    color,
                    quantity: c.total,
                })
            })
            .collect::<Result<Vec<_>, ImportError>>()?;
        let palette = Palette::from_parts(colors, file.next_color_id);

        let mut dangling = 0;
        for cell in cells.iter_mut() {
            if let Some(id) = cell.color_id {
                if !palette.contains(id) {
                    cell.color_id = None;
                    dangling += 1;
                }
            }
        }

        let mut anchors: Vec<Anchor> = Vec::with_capacity(file.anchors.len());
        for anchor in file.anchors {
            let in_grid = anchor.row < rows && anchor.col < cols;
            let duplicate = anchors
                .iter()
                .any(|a| a.row == anchor.row && a.col == anchor.col);
            if in_grid && !duplicate && palette.contains(anchor.color_id) {
                anchors.push(anchor);
            } else {
                dangling += 1;
            }
        }

        if dangling > 0 {
            tracing::warn!(dangling, "Dropped invalid references while importing project");
        }

        let quilt = Quilt {
            layout: Layout {
                hex_real_size: file.hex_real_size,
                quilt_width: file.quilt_width,
                quilt_height: file.quilt_height,
                unit: file.unit,
                cols,
                rows,
                hex_size: file.hex_size,
            },
            grid: Grid::from_parts(cols, rows, cells, anchors),
            palette,
            history: History::new(),
            editor: Editor::default(),
            show_numbers: file.show_numbers,
        };

        tracing::info!(
            cols,
            rows,
            colors = quilt.palette.len(),
            anchors = quilt.grid.anchors().len(),
            "Imported project"
        );
        Ok(quilt)
    }

    /// Replace the live quilt with an imported project.
    ///
    /// On error the live quilt is left exactly as it was. On success history
    /// is reset; tool and brush settings carry over.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let file = ProjectFile::from_json(json)?;
        let mut imported = Quilt::from_project(file)?;

        imported.editor.tool = self.editor.tool;
        imported.editor.brush_radius = self.editor.brush_radius;
        imported.editor.selected_color = self
            .editor
            .selected_color
            .filter(|id| imported.palette.contains(*id));

        *self = imported;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        self.to_project().to_json()
    }
}
