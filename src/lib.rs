//! Hexquilt - hexagon quilt designer
//!
//! Lays out a pointy-top hexagon grid from physical quilt measurements,
//! tracks a fabric palette with per-color quantity limits, and fills the
//! grid by hand or with a perceptual gradient between anchor cells.
//!
//! ```
//! use hexquilt::{Quilt, Unit};
//! use quilt_color::Srgb;
//!
//! let mut quilt = Quilt::new(2.0, 30.0, 40.0, Unit::Inches);
//! assert_eq!((quilt.cols(), quilt.rows()), (17, 27));
//!
//! let red = quilt.add_color(Srgb::from_u8(255, 0, 0), 10).unwrap();
//! quilt.paint(0, 0, 1, red).unwrap();
//! assert_eq!(quilt.usage_count(red), 3);
//! ```

pub mod error;
pub mod geometry;
pub mod models;
pub mod quilt;
pub mod services;

pub use error::{EditError, ErrorKind, GradientError, ImportError, QuiltError};
pub use models::{AppConfig, ColorId, ProjectFile, Unit};
pub use quilt::Quilt;
pub use services::{CancelToken, GradientOptions, GradientReport, SharedQuilt, Tool};
