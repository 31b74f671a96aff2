//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Display surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Surface title, also used as the layer-shell namespace
    #[serde(default = "default_title")]
    pub title: String,

    /// Fixed surface width in pixels; when unset the surface spans the whole output
    #[serde(default)]
    pub width: Option<u32>,

    /// Fixed surface height in pixels; when unset the surface spans the whole output
    #[serde(default)]
    pub height: Option<u32>,

    /// Color every frame is cleared to
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: None,
            height: None,
            background: default_background(),
        }
    }
}

/// Drawing defaults applied when the surface opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Initial draw color for points and text
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
        }
    }
}

/// Text annotation font settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Serif")
    /// Falls back to Pango's default if the family is not installed
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style ("normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Font size in points (valid range: 6.0 - 96.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            font_size: default_font_size(),
        }
    }
}

/// Performance tuning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Milliseconds between compositor ticks (valid range: 1 - 1000)
    /// 16 gives roughly 60 frames per second
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Number of shared-memory buffers in the Wayland pool (valid range: 2 - 4)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
            buffer_count: default_buffer_count(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_title() -> String {
    "pixelpad".to_string()
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "normal".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_font_size() -> f64 {
    14.0
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_buffer_count() -> u32 {
    2
}
