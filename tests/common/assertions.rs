//! Assertion helpers for tests.

use hexquilt::Quilt;
use pretty_assertions::assert_eq;

/// Assert no palette color is used more often than its quantity allows
pub fn assert_within_supply(quilt: &Quilt) {
    for usage in quilt.palette_summary() {
        assert!(
            usage.used as u64 <= usage.quantity as u64,
            "Color {} used {} times with a limit of {}",
            usage.id,
            usage.used,
            usage.quantity
        );
    }
}

/// Assert the grid has exactly cols * rows cells
pub fn assert_grid_consistent(quilt: &Quilt) {
    assert_eq!(
        quilt.grid().len(),
        quilt.cols() * quilt.rows(),
        "Grid of {} x {} has {} cells",
        quilt.cols(),
        quilt.rows(),
        quilt.grid().len()
    );
}

/// Assert every cell and anchor references a palette color
pub fn assert_no_dangling_references(quilt: &Quilt) {
    for cell in quilt.grid().cells() {
        if let Some(id) = cell.color_id {
            assert!(quilt.palette().contains(id), "Cell references unknown color {id}");
        }
    }
    for anchor in quilt.grid().anchors() {
        assert!(
            quilt.palette().contains(anchor.color_id),
            "Anchor at ({}, {}) references unknown color {}",
            anchor.row,
            anchor.col,
            anchor.color_id
        );
    }
}
