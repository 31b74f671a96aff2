//! Configuration file support for pixelpad.
//!
//! Settings are read from `~/.config/pixelpad/config.toml`. If no config file
//! exists, defaults are used automatically. Out-of-range values are clamped
//! with a warning rather than rejected.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DrawingConfig, PerformanceConfig, SurfaceConfig, TextConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure, deserialized from TOML.
///
/// Every section is optional and falls back to its defaults.
///
/// # Example TOML
/// ```toml
/// [surface]
/// title = "sketch"
/// width = 800
/// height = 600
/// background = "white"
///
/// [drawing]
/// default_color = "dark gray"
///
/// [text]
/// font_family = "Monospace"
/// font_size = 16.0
///
/// [performance]
/// frame_interval_ms = 16
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub surface: SurfaceConfig,

    #[serde(default)]
    pub drawing: DrawingConfig,

    #[serde(default)]
    pub text: TextConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `text.font_size`: 6.0 - 96.0
    /// - `performance.frame_interval_ms`: 1 - 1000
    /// - `performance.buffer_count`: 2 - 4
    /// - `surface.width` / `surface.height`: at least 1 when set
    pub fn validate_and_clamp(&mut self) {
        if !(6.0..=96.0).contains(&self.text.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 6.0-96.0 range",
                self.text.font_size
            );
            self.text.font_size = if self.text.font_size.is_nan() {
                TextConfig::default().font_size
            } else {
                self.text.font_size.clamp(6.0, 96.0)
            };
        }

        if !(1..=1000).contains(&self.performance.frame_interval_ms) {
            log::warn!(
                "Invalid frame_interval_ms {}, clamping to 1-1000 range",
                self.performance.frame_interval_ms
            );
            self.performance.frame_interval_ms = self.performance.frame_interval_ms.clamp(1, 1000);
        }

        if !(2..=4).contains(&self.performance.buffer_count) {
            log::warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        for (name, dimension) in [
            ("width", &mut self.surface.width),
            ("height", &mut self.surface.height),
        ] {
            if *dimension == Some(0) {
                log::warn!("Surface {} of 0 is invalid, using 1", name);
                *dimension = Some(1);
            }
        }

        if !matches!(
            self.text.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.text.font_style
            );
            self.text.font_style = "normal".to_string();
        }
    }

    /// Tick period for the frame clock.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.performance.frame_interval_ms)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pixelpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if the
    /// file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `path`, or returns defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }
}
