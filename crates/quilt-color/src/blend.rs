//! Perceptual distance and blending helpers.
//!
//! Palette matching and gradient blending both go through LAB. The plain
//! RGB distance exists for display purposes (e.g. sorting swatches) and must
//! not be used to assign colors to cells.

use crate::color::{Lab, Srgb};

/// CIE76 ΔE between two sRGB colors.
///
/// # Example
///
/// ```
/// use quilt_color::{perceptual_distance, Srgb};
///
/// let red = Srgb::from_u8(255, 0, 0);
/// let dark_red = Srgb::from_u8(200, 0, 0);
/// let blue = Srgb::from_u8(0, 0, 255);
/// assert!(perceptual_distance(red, dark_red) < perceptual_distance(red, blue));
/// ```
pub fn perceptual_distance(c1: Srgb, c2: Srgb) -> f64 {
    Lab::from(c1).delta_e(Lab::from(c2))
}

/// Euclidean distance between raw sRGB bytes.
pub fn rgb_distance(c1: Srgb, c2: Srgb) -> f64 {
    let dr = c1.r as f64 - c2.r as f64;
    let dg = c1.g as f64 - c2.g as f64;
    let db = c1.b as f64 - c2.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Weighted mean of colors in LAB space.
///
/// Entries with a weight of zero or below are ignored. Returns `None` when no
/// positive weight remains.
pub fn blend_lab<I>(colors: I) -> Option<Lab>
where
    I: IntoIterator<Item = (Lab, f64)>,
{
    let mut total = 0.0;
    let (mut l, mut a, mut b) = (0.0, 0.0, 0.0);

    for (lab, weight) in colors {
        if weight <= 0.0 {
            continue;
        }
        total += weight;
        l += lab.l * weight;
        a += lab.a * weight;
        b += lab.b * weight;
    }

    if total <= 0.0 {
        return None;
    }
    Some(Lab::new(l / total, a / total, b / total))
}

/// Weighted blend of sRGB colors, averaged in LAB.
///
/// # Example
///
/// ```
/// use quilt_color::{blend, Srgb};
///
/// let black = Srgb::from_u8(0, 0, 0);
/// let white = Srgb::from_u8(255, 255, 255);
/// let mid = blend([(black, 1.0), (white, 1.0)]).unwrap();
///
/// // LAB midpoint (L=50) is lighter than the byte average would suggest
/// // in linear light, and lands at a neutral grey.
/// assert_eq!(mid.r, mid.g);
/// assert_eq!(mid.g, mid.b);
/// ```
pub fn blend<I>(colors: I) -> Option<Srgb>
where
    I: IntoIterator<Item = (Srgb, f64)>,
{
    blend_lab(
        colors
            .into_iter()
            .map(|(color, weight)| (Lab::from(color), weight)),
    )
    .map(Srgb::from)
}

/// Whether a color reads as light, for picking contrasting label text.
pub fn is_light(color: Srgb) -> bool {
    let luminance =
        (0.299 * color.r as f64 + 0.587 * color.g as f64 + 0.114 * color.b as f64) / 255.0;
    luminance > 0.5
}
