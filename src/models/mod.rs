pub mod config;
pub mod grid;
pub mod layout;
pub mod palette;
pub mod project;

pub use config::{AppConfig, EditorConfig, GradientConfig, LayoutConfig};
pub use grid::{Anchor, Cell, Grid, GridSnapshot};
pub use layout::{
    Layout, Unit, DEFAULT_HEX_REAL_SIZE, DEFAULT_HEX_SIZE, DEFAULT_QUILT_HEIGHT,
    DEFAULT_QUILT_WIDTH,
};
pub use palette::{ColorId, Palette, PaletteColor, PaletteUsage};
pub use project::{ProjectColor, ProjectFile, PROJECT_VERSION};
