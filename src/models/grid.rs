use serde::{Deserialize, Serialize};

use super::palette::ColorId;

/// One hexagon of the quilt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default)]
    pub color_id: Option<ColorId>,
    /// Locked cells are left alone by gradient generation.
    #[serde(default)]
    pub locked: bool,
}

/// A gradient control point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    pub color_id: ColorId,
}

/// Deep copy of the editable grid contents, used by undo/redo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    pub cells: Vec<Cell>,
    pub anchors: Vec<Anchor>,
}

/// Row-major array of `cols * rows` cells plus the anchor list.
///
/// The cell count is fixed for the lifetime of a grid; resizing means
/// building a new one.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    anchors: Vec<Anchor>,
}

impl Grid {
    /// An empty grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::default(); cols * rows],
            anchors: Vec::new(),
        }
    }

    /// Build from stored cells. `cells.len()` must equal `cols * rows`.
    pub(crate) fn from_parts(
        cols: usize,
        rows: usize,
        cells: Vec<Cell>,
        anchors: Vec<Anchor>,
    ) -> Self {
        debug_assert_eq!(cells.len(), cols * rows);
        Self {
            cols,
            rows,
            cells,
            anchors,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index, or `None` outside the grid.
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// (row, col) of a row-major index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index(row, col).map(move |i| &mut self.cells[i])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn anchor_at(&self, row: usize, col: usize) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.row == row && a.col == col)
    }

    pub(crate) fn anchor_at_mut(&mut self, row: usize, col: usize) -> Option<&mut Anchor> {
        self.anchors
            .iter_mut()
            .find(|a| a.row == row && a.col == col)
    }

    pub(crate) fn push_anchor(&mut self, anchor: Anchor) {
        debug_assert!(self.anchor_at(anchor.row, anchor.col).is_none());
        self.anchors.push(anchor);
    }

    /// Remove the anchor at a cell, if any.
    pub(crate) fn remove_anchor_at(&mut self, row: usize, col: usize) -> bool {
        let before = self.anchors.len();
        self.anchors.retain(|a| !(a.row == row && a.col == col));
        self.anchors.len() != before
    }

    /// Number of cells using a color.
    pub fn usage_count(&self, id: ColorId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.color_id == Some(id))
            .count()
    }

    /// Clear every cell and drop every anchor referencing `id`.
    ///
    /// Returns the number of cells cleared.
    pub(crate) fn forget_color(&mut self, id: ColorId) -> usize {
        self.retain_colors(|c| c != id)
    }

    /// Clear every cell and drop every anchor whose color fails `keep`.
    ///
    /// Returns the number of cells cleared.
    pub(crate) fn retain_colors(&mut self, mut keep: impl FnMut(ColorId) -> bool) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut() {
            if cell.color_id.is_some_and(|id| !keep(id)) {
                cell.color_id = None;
                cleared += 1;
            }
        }
        self.anchors.retain(|a| keep(a.color_id));
        cleared
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells.clone(),
            anchors: self.anchors.clone(),
        }
    }

    /// Replace cells and anchors with a snapshot taken from this grid.
    pub(crate) fn restore(&mut self, snapshot: GridSnapshot) {
        debug_assert_eq!(snapshot.cells.len(), self.cells.len());
        self.cells = snapshot.cells;
        self.anchors = snapshot.anchors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.len(), 6);
        assert!(grid.cells().iter().all(|c| *c == Cell::default()));
        assert!(grid.anchors().is_empty());
    }

    #[test]
    fn test_index_and_position() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.index(1, 2), Some(5));
        assert_eq!(grid.position(5), (1, 2));
        assert_eq!(grid.index(2, 0), None);
        assert_eq!(grid.index(0, 3), None);
        assert!(grid.cell(5, 5).is_none());
    }

    #[test]
    fn test_forget_color() {
        let mut grid = Grid::new(2, 2);
        grid.cell_mut(0, 0).unwrap().color_id = Some(ColorId(1));
        grid.cell_mut(1, 1).unwrap().color_id = Some(ColorId(1));
        grid.cell_mut(0, 1).unwrap().color_id = Some(ColorId(2));
        grid.push_anchor(Anchor {
            row: 0,
            col: 0,
            color_id: ColorId(1),
        });
        grid.push_anchor(Anchor {
            row: 0,
            col: 1,
            color_id: ColorId(2),
        });

        assert_eq!(grid.forget_color(ColorId(1)), 2);
        assert_eq!(grid.usage_count(ColorId(1)), 0);
        assert_eq!(grid.usage_count(ColorId(2)), 1);
        assert_eq!(grid.anchors().len(), 1);
        assert_eq!(grid.anchors()[0].color_id, ColorId(2));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut grid = Grid::new(2, 1);
        let before = grid.snapshot();
        grid.cell_mut(0, 0).unwrap().locked = true;

        assert!(!before.cells[0].locked);
        grid.restore(before);
        assert!(!grid.cell(0, 0).unwrap().locked);
    }

    #[test]
    fn test_cell_serde_shape() {
        let cell = Cell {
            color_id: Some(ColorId(3)),
            locked: true,
        };
        let json = serde_json::to_string(&cell).unwrap();
        assert_eq!(json, r#"{"colorId":3,"locked":true}"#);

        let empty: Cell = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Cell::default());
    }
}
