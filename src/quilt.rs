//! The quilt aggregate.
//!
//! [`Quilt`] owns everything an edit can touch: layout, grid, palette,
//! history and editor state. Every operation takes `&mut Quilt`, so a palette
//! removal can never interleave with a paint stroke.

use quilt_color::Srgb;

use crate::error::EditError;
use crate::geometry::grid_dimensions;
use crate::models::{
    Cell, ColorId, Grid, GridSnapshot, Layout, Palette, PaletteUsage, Unit, DEFAULT_HEX_REAL_SIZE,
    DEFAULT_HEX_SIZE, DEFAULT_QUILT_HEIGHT, DEFAULT_QUILT_WIDTH,
};
use crate::services::edit::Editor;
use crate::services::history::History;

#[derive(Debug, Clone)]
pub struct Quilt {
    pub(crate) layout: Layout,
    pub(crate) grid: Grid,
    pub(crate) palette: Palette,
    pub(crate) history: History,
    pub(crate) editor: Editor,
    /// Whether renderers should print palette numbers on cells.
    pub show_numbers: bool,
}

impl Quilt {
    /// A quilt with an empty grid sized from physical measurements.
    pub fn new(hex_real_size: f64, quilt_width: f64, quilt_height: f64, unit: Unit) -> Self {
        let (cols, rows) = grid_dimensions(hex_real_size, quilt_width, quilt_height);
        Self {
            layout: Layout {
                hex_real_size,
                quilt_width,
                quilt_height,
                unit,
                cols,
                rows,
                hex_size: DEFAULT_HEX_SIZE,
            },
            grid: Grid::new(cols, rows),
            palette: Palette::new(),
            history: History::new(),
            editor: Editor::default(),
            show_numbers: false,
        }
    }

    /// Resize the grid from new measurements.
    ///
    /// Replaces every cell and anchor and resets history. The palette is
    /// kept.
    pub fn generate_grid(
        &mut self,
        hex_real_size: f64,
        quilt_width: f64,
        quilt_height: f64,
        unit: Unit,
    ) -> (usize, usize) {
        let (cols, rows) = grid_dimensions(hex_real_size, quilt_width, quilt_height);

        self.layout.hex_real_size = hex_real_size;
        self.layout.quilt_width = quilt_width;
        self.layout.quilt_height = quilt_height;
        self.layout.unit = unit;
        self.layout.cols = cols;
        self.layout.rows = rows;

        self.grid = Grid::new(cols, rows);
        self.history.clear();
        self.editor.reset_pending();

        tracing::info!(
            cols,
            rows,
            hex_real_size,
            quilt_width,
            quilt_height,
            %unit,
            "Generated grid"
        );
        (cols, rows)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// The cell at (row, col), or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.cell(row, col)
    }

    /// Display color of a cell, if it is painted.
    pub fn cell_color(&self, row: usize, col: usize) -> Option<Srgb> {
        let id = self.grid.cell(row, col)?.color_id?;
        self.palette.get(id).map(|c| c.color)
    }

    pub fn set_hex_size(&mut self, hex_size: f64) {
        self.layout.hex_size = hex_size;
    }

    // Palette

    pub fn add_color(&mut self, color: Srgb, quantity: u32) -> Result<ColorId, EditError> {
        let id = self.palette.add(color, quantity).ok_or(EditError::PaletteFull)?;
        tracing::debug!(%id, %color, quantity, "Added palette color");
        Ok(id)
    }

    /// Remove a color together with every cell and anchor referencing it.
    ///
    /// Returns the number of cells cleared, or `None` if the id is unknown.
    /// Snapshots taken earlier still hold the color; undo and redo drop it
    /// again when they restore one.
    pub fn remove_color(&mut self, id: ColorId) -> Option<usize> {
        self.palette.get(id)?;

        self.record();
        let cleared = self.grid.forget_color(id);
        self.palette.remove(id);
        if self.editor.selected_color == Some(id) {
            self.editor.selected_color = None;
        }

        tracing::debug!(%id, cleared, "Removed palette color");
        Some(cleared)
    }

    /// Change a color's quantity limit. Placed cells are never trimmed, so
    /// [`remaining`](Self::remaining) may go negative.
    pub fn update_quantity(&mut self, id: ColorId, quantity: u32) -> bool {
        self.palette.set_quantity(id, quantity)
    }

    pub fn usage_count(&self, id: ColorId) -> usize {
        self.grid.usage_count(id)
    }

    /// Quantity limit minus usage. `None` for unknown ids.
    pub fn remaining(&self, id: ColorId) -> Option<i64> {
        let entry = self.palette.get(id)?;
        Some(entry.quantity as i64 - self.grid.usage_count(id) as i64)
    }

    /// Usage of every palette color, in palette order.
    pub fn palette_summary(&self) -> Vec<PaletteUsage> {
        self.palette
            .iter()
            .map(|entry| {
                let used = self.grid.usage_count(entry.id);
                PaletteUsage {
                    id: entry.id,
                    color: entry.color,
                    quantity: entry.quantity,
                    used,
                    remaining: entry.quantity as i64 - used as i64,
                }
            })
            .collect()
    }

    // History

    /// Record the current grid before a mutation.
    pub(crate) fn record(&mut self) {
        self.history.push(self.grid.snapshot());
    }

    /// Record the current grid before a paint or erase, unless a drag
    /// gesture already did.
    pub(crate) fn checkpoint(&mut self) {
        if !self.editor.in_gesture() {
            self.record();
        }
    }

    pub fn undo(&mut self) -> bool {
        let grid = &self.grid;
        match self.history.undo(|| grid.snapshot()) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Snapshots are grid-only, so drop colors removed since they were taken.
    fn restore(&mut self, snapshot: GridSnapshot) {
        self.grid.restore(snapshot);
        let palette = &self.palette;
        self.grid.retain_colors(|id| palette.contains(id));
        self.editor.reset_pending();
    }
}

impl Default for Quilt {
    fn default() -> Self {
        Self::new(
            DEFAULT_HEX_REAL_SIZE,
            DEFAULT_QUILT_WIDTH,
            DEFAULT_QUILT_HEIGHT,
            Unit::default(),
        )
    }
}
