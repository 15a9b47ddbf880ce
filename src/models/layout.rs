use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement unit the user entered the quilt dimensions in.
///
/// Geometry is unit-agnostic; the unit is carried so it can be shown and
/// saved alongside the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Inches => "in",
            Unit::Centimeters => "cm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "cm" | "centimeters" | "centimetres" => Ok(Unit::Centimeters),
            other => Err(format!("unknown unit '{other}' (expected 'in' or 'cm')")),
        }
    }
}

/// Physical quilt measurements and the grid size derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Point-to-point height of one hexagon, in `unit`.
    pub hex_real_size: f64,
    pub quilt_width: f64,
    pub quilt_height: f64,
    pub unit: Unit,
    pub cols: usize,
    pub rows: usize,
    /// On-screen hex size used by renderers. Carried, never interpreted.
    pub hex_size: f64,
}

pub const DEFAULT_HEX_REAL_SIZE: f64 = 2.0;
pub const DEFAULT_QUILT_WIDTH: f64 = 30.0;
pub const DEFAULT_QUILT_HEIGHT: f64 = 40.0;
pub const DEFAULT_HEX_SIZE: f64 = 30.0;
