//! Test fixtures and constants.

use hexquilt::models::{ColorId, Unit};
use hexquilt::Quilt;
use quilt_color::Srgb;

/// Palette colors used across tests
pub mod colors {
    use quilt_color::Srgb;

    pub const RED: Srgb = Srgb::from_u8(255, 0, 0);
    pub const BLUE: Srgb = Srgb::from_u8(0, 0, 255);
    pub const WHITE: Srgb = Srgb::from_u8(255, 255, 255);
    pub const BLACK: Srgb = Srgb::from_u8(0, 0, 0);
}

/// 3 x 2 grid: hex 2, quilt 5 x 3 inches
pub fn tiny_quilt() -> Quilt {
    let quilt = Quilt::new(2.0, 5.0, 3.0, Unit::Inches);
    assert_eq!((quilt.cols(), quilt.rows()), (3, 2));
    quilt
}

/// 6 x 7 grid: hex 2, quilt 10 x 10 inches
pub fn small_quilt() -> Quilt {
    let quilt = Quilt::new(2.0, 10.0, 10.0, Unit::Inches);
    assert_eq!((quilt.cols(), quilt.rows()), (6, 7));
    quilt
}

/// Small quilt with red and blue anchors at opposite corners and plenty of
/// both fabrics.
pub fn two_anchor_quilt() -> (Quilt, ColorId, ColorId) {
    let mut quilt = small_quilt();
    let cells = quilt.grid().len() as u32;
    let red = quilt.add_color(colors::RED, cells).unwrap();
    let blue = quilt.add_color(colors::BLUE, cells).unwrap();

    let (last_row, last_col) = (quilt.rows() - 1, quilt.cols() - 1);
    quilt.toggle_anchor(0, 0, red).unwrap();
    quilt.toggle_anchor(last_row, last_col, blue).unwrap();
    (quilt, red, blue)
}

/// Every painted cell as (row, col, color id) in row-major order
pub fn painted_cells(quilt: &Quilt) -> Vec<(usize, usize, ColorId)> {
    let cols = quilt.cols();
    quilt
        .grid()
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(i, cell)| cell.color_id.map(|id| (i / cols, i % cols, id)))
        .collect()
}

pub fn srgb(hex: &str) -> Srgb {
    hex.parse().unwrap()
}
