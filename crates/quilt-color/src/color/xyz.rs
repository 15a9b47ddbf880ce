//! CIE XYZ tristimulus values (D65, Y scaled to 0..=100)

use super::linear_rgb::LinearRgb;

/// D65 reference white, Y normalized to 100.
pub const D65_WHITE: Xyz = Xyz {
    x: 95.047,
    y: 100.000,
    z: 108.883,
};

/// A color in CIE XYZ space relative to the D65 illuminant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<LinearRgb> for Xyz {
    /// Linear sRGB to XYZ using the standard D65 matrix.
    fn from(rgb: LinearRgb) -> Self {
        let (r, g, b) = (rgb.r * 100.0, rgb.g * 100.0, rgb.b * 100.0);
        Self {
            x: 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b,
            y: 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b,
            z: 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b,
        }
    }
}

impl From<Xyz> for LinearRgb {
    /// XYZ to linear sRGB (inverse D65 matrix). Not clamped.
    fn from(xyz: Xyz) -> Self {
        let (x, y, z) = (xyz.x / 100.0, xyz.y / 100.0, xyz.z / 100.0);
        LinearRgb {
            r: 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z,
            g: -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z,
            b: 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z,
        }
    }
}
