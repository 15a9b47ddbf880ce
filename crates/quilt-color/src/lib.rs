#![allow(clippy::excessive_precision)]

//! quilt-color: sRGB and CIE LAB color math for quilt palette matching
//!
//! Quilt fabric is bought in discrete colors, so laying out a gradient comes
//! down to two perceptual questions: "what color should this cell ideally
//! be?" and "which fabric on hand looks closest to it?". Both are answered
//! in CIE LAB.
//!
//! - [`blend`] / [`blend_lab`]: weighted mean of colors, computed in LAB
//! - [`perceptual_distance`]: CIE76 ΔE, the metric for palette matching
//! - [`is_light`]: luminance test for picking contrasting label text
//!
//! ```
//! use quilt_color::{blend, perceptual_distance, Srgb};
//!
//! let red: Srgb = "#ff0000".parse().unwrap();
//! let blue: Srgb = "#0000ff".parse().unwrap();
//!
//! let purple = blend([(red, 1.0), (blue, 1.0)]).unwrap();
//! let d_red = perceptual_distance(purple, red);
//! let d_blue = perceptual_distance(purple, blue);
//! assert!(d_red > 0.0 && d_blue > 0.0);
//! ```
//!
//! Raw RGB byte averaging is never used for blending: averaging gamma-encoded
//! values produces muddy, too-dark midpoints, and Euclidean RGB distance
//! disagrees with human judgement of "closest fabric".

mod blend;
pub mod color;
mod error;

pub use blend::{blend, blend_lab, is_light, perceptual_distance, rgb_distance};
pub use color::{Lab, LinearRgb, Srgb, Xyz, D65_WHITE};
pub use error::ParseColorError;
