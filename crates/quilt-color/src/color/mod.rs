//! Color types and conversion utilities
//!
//! The conversion chain is
//!
//! ```text
//! Srgb (8-bit, gamma encoded)
//!   <-> LinearRgb (linear light)
//!   <-> Xyz (CIE 1931, D65)
//!   <-> Lab (CIE L*a*b*, D65)
//! ```
//!
//! `From` impls exist for every adjacent pair, plus the `Srgb <-> Lab`
//! shortcut used throughout the gradient code.
//!
//! # Example
//!
//! ```
//! use quilt_color::{Lab, Srgb};
//!
//! let srgb = Srgb::from_u8(128, 64, 32);
//! let lab = Lab::from(srgb);
//! let back = Srgb::from(lab);
//! assert!((back.r as i16 - 128).abs() <= 1);
//! ```

mod lab;
mod linear_rgb;
mod srgb;
mod xyz;

pub use lab::Lab;
pub use linear_rgb::LinearRgb;
pub use srgb::Srgb;
pub use xyz::{Xyz, D65_WHITE};
