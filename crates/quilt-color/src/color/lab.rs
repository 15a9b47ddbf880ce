//! CIE L*a*b* perceptual color space
//!
//! LAB is used for everything perceptual in quilt layout: palette matching
//! (CIE76 ΔE) and blending anchor colors into gradients. Equal distances in
//! LAB correspond roughly to equal perceived differences, which is not true
//! of raw sRGB bytes.

use super::linear_rgb::LinearRgb;
use super::srgb::Srgb;
use super::xyz::{Xyz, D65_WHITE};

/// Threshold between the cube-root and linear segments of the LAB transfer.
const EPSILON: f64 = 0.008856;
/// Slope of the linear segment.
const KAPPA_SLOPE: f64 = 7.787;
const OFFSET: f64 = 16.0 / 116.0;

/// A color in CIE LAB space (D65 white point).
///
/// # Components
///
/// - `l`: Lightness, 0.0 (black) to 100.0 (white)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Values are not clamped; dithering and blending may produce colors outside
/// the sRGB gamut, which are clamped only when converting back to [`Srgb`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// CIE76 color difference (Euclidean distance in LAB).
    ///
    /// # Example
    ///
    /// ```
    /// use quilt_color::Lab;
    ///
    /// let white = Lab::new(100.0, 0.0, 0.0);
    /// let black = Lab::new(0.0, 0.0, 0.0);
    /// assert_eq!(white.delta_e(black), 100.0);
    /// ```
    #[inline]
    pub fn delta_e(self, other: Lab) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

#[inline]
fn forward(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        KAPPA_SLOPE * t + OFFSET
    }
}

#[inline]
fn inverse(f: f64) -> f64 {
    let cubed = f * f * f;
    if cubed > EPSILON {
        cubed
    } else {
        (f - OFFSET) / KAPPA_SLOPE
    }
}

impl From<Xyz> for Lab {
    fn from(xyz: Xyz) -> Self {
        let fx = forward(xyz.x / D65_WHITE.x);
        let fy = forward(xyz.y / D65_WHITE.y);
        let fz = forward(xyz.z / D65_WHITE.z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}

impl From<Lab> for Xyz {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = lab.a / 500.0 + fy;
        let fz = fy - lab.b / 200.0;

        Xyz {
            x: inverse(fx) * D65_WHITE.x,
            y: inverse(fy) * D65_WHITE.y,
            z: inverse(fz) * D65_WHITE.z,
        }
    }
}

impl From<Srgb> for Lab {
    fn from(srgb: Srgb) -> Self {
        Lab::from(Xyz::from(LinearRgb::from(srgb)))
    }
}

impl From<Lab> for Srgb {
    /// Convert back to 8-bit sRGB, clamping out-of-gamut channels.
    fn from(lab: Lab) -> Self {
        Srgb::from(LinearRgb::from(Xyz::from(lab)))
    }
}
