use serde::Deserialize;
use std::path::Path;

use super::layout::{
    Unit, DEFAULT_HEX_REAL_SIZE, DEFAULT_HEX_SIZE, DEFAULT_QUILT_HEIGHT, DEFAULT_QUILT_WIDTH,
};
use crate::services::gradient::DEFAULT_DITHER_INTENSITY;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Defaults for new quilts
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Defaults for gradient generation
    #[serde(default)]
    pub gradient: GradientConfig,

    /// Defaults for the editing tools
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Physical dimensions used when a command does not specify them
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_hex_real_size")]
    pub hex_real_size: f64,

    #[serde(default = "default_quilt_width")]
    pub quilt_width: f64,

    #[serde(default = "default_quilt_height")]
    pub quilt_height: f64,

    #[serde(default)]
    pub unit: Unit,

    /// On-screen hex size written into new projects
    #[serde(default = "default_hex_size")]
    pub hex_size: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GradientConfig {
    #[serde(default)]
    pub dither: bool,

    #[serde(default = "default_intensity")]
    pub intensity: f64,

    /// Fixed noise seed. Without one every run dithers differently.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EditorConfig {
    #[serde(default)]
    pub brush_radius: u32,
}

fn default_hex_real_size() -> f64 {
    DEFAULT_HEX_REAL_SIZE
}

fn default_quilt_width() -> f64 {
    DEFAULT_QUILT_WIDTH
}

fn default_quilt_height() -> f64 {
    DEFAULT_QUILT_HEIGHT
}

fn default_hex_size() -> f64 {
    DEFAULT_HEX_SIZE
}

fn default_intensity() -> f64 {
    DEFAULT_DITHER_INTENSITY
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hex_real_size: DEFAULT_HEX_REAL_SIZE,
            quilt_width: DEFAULT_QUILT_WIDTH,
            quilt_height: DEFAULT_QUILT_HEIGHT,
            unit: Unit::default(),
            hex_size: DEFAULT_HEX_SIZE,
        }
    }
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            dither: false,
            intensity: DEFAULT_DITHER_INTENSITY,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
