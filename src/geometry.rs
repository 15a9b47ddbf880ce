//! Hex grid geometry.
//!
//! Cells are pointy-top hexagons in "odd-r" offset layout: odd rows are
//! shifted right by half a hex width. Neighborhood queries convert offset
//! coordinates to cube coordinates, where hex distance is trivial.

/// √3, the ratio of a pointy-top hexagon's width to its corner radius.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Number of columns and rows of hexagons that fit inside a quilt.
///
/// `hex_size` is the point-to-point height of one hexagon in the same unit
/// as the quilt dimensions. Rows overlap by a quarter of a hex height. Counts
/// are floored, never rounded up, so partial hexes at the edges are the only
/// overhang.
/// Both counts are at least 1.
///
/// A non-positive or non-finite `hex_size` yields a single cell.
pub fn grid_dimensions(hex_size: f64, quilt_width: f64, quilt_height: f64) -> (usize, usize) {
    if !(hex_size.is_finite() && hex_size > 0.0) {
        return (1, 1);
    }

    let radius = hex_size / 2.0;
    let width = SQRT_3 * radius;

    let cols = ((quilt_width - width / 2.0) / width).floor() + 1.0;
    let rows = ((quilt_height - hex_size / 4.0) / (hex_size * 0.75)).floor() + 1.0;

    (clamp_count(cols), clamp_count(rows))
}

fn clamp_count(n: f64) -> usize {
    if n.is_nan() || n < 1.0 {
        1
    } else {
        n as usize
    }
}

/// Center of the hexagon at (`col`, `row`) for corner radius `size`.
///
/// The (0, 0) center sits at (width / 2, size) so the whole grid lies in
/// positive coordinates.
pub fn pixel_center(col: usize, row: usize, size: f64) -> (f64, f64) {
    let width = SQRT_3 * size;
    let shift = if row % 2 == 1 { width / 2.0 } else { 0.0 };

    let x = width / 2.0 + col as f64 * width + shift;
    let y = size + row as f64 * size * 1.5;
    (x, y)
}

/// Cube coordinates of a hex (x + y + z == 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Cube {
    /// Convert odd-r offset coordinates.
    pub fn from_offset(row: usize, col: usize) -> Self {
        let x = col as i64 - (row / 2) as i64;
        let z = row as i64;
        Self { x, y: -x - z, z }
    }

    /// Number of steps between two hexes.
    pub fn distance(self, other: Cube) -> u64 {
        ((self.x - other.x).unsigned_abs()
            + (self.y - other.y).unsigned_abs()
            + (self.z - other.z).unsigned_abs())
            / 2
    }
}

/// Hex distance between two cells given as (row, col).
pub fn hex_distance(a: (usize, usize), b: (usize, usize)) -> u64 {
    Cube::from_offset(a.0, a.1).distance(Cube::from_offset(b.0, b.1))
}

/// Every cell of a `cols` x `rows` grid within `radius` steps of the center,
/// as (row, col) in row-major order.
///
/// Scans the whole grid so cells on the boundary are never skipped, and works
/// even if the center itself lies outside the grid.
pub fn hexes_in_radius(
    center_row: usize,
    center_col: usize,
    radius: u32,
    cols: usize,
    rows: usize,
) -> Vec<(usize, usize)> {
    let center = Cube::from_offset(center_row, center_col);
    let radius = radius as u64;

    let mut hexes = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if Cube::from_offset(row, col).distance(center) <= radius {
                hexes.push((row, col));
            }
        }
    }
    hexes
}
