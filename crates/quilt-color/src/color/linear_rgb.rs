//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! It is the bridge between gamma-encoded sRGB and the CIE XYZ matrix.

use super::srgb::Srgb;

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0, but may exceed this range
/// for out-of-gamut colors produced by LAB arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// sRGB transfer function inverse (IEC 61966-2-1).
#[inline]
pub(crate) fn decode_gamma(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB transfer function.
#[inline]
pub(crate) fn encode_gamma(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

impl From<Srgb> for LinearRgb {
    fn from(srgb: Srgb) -> Self {
        Self {
            r: decode_gamma(srgb.r as f64 / 255.0),
            g: decode_gamma(srgb.g as f64 / 255.0),
            b: decode_gamma(srgb.b as f64 / 255.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_gamma_values() {
        assert_eq!(decode_gamma(0.0), 0.0);
        assert!((decode_gamma(1.0) - 1.0).abs() < 1e-12);
        // Linear segment below the threshold
        assert!((decode_gamma(0.04) - 0.04 / 12.92).abs() < 1e-12);
        // sRGB 0.5 is roughly 21.4% linear light
        assert!((decode_gamma(0.5) - 0.214_041).abs() < 1e-5);
    }

    #[test]
    fn test_encode_inverts_decode() {
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            assert!((encode_gamma(decode_gamma(v)) - v).abs() < 1e-9);
        }
    }
}
