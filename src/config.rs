//! Canvas configuration loaded from TOML.
//!
//! Every field has a default, so a partial file (or no file at all) yields a
//! working configuration. Loaded values are validated and clamped to sane
//! ranges before use.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::draw::{Color, color};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Color specification, either a named color or RGB(A) values.
///
/// # Examples
/// ```toml
/// # Named color
/// background = "white"
///
/// # Custom RGB color (0-255 per component)
/// background = [255, 128, 0]
///
/// # With an explicit alpha component
/// background = [255, 128, 0, 128]
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black,
    /// transparent.
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255.
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha], each component 0-255.
    Rgba([u8; 4]),
}

impl ColorSpec {
    /// Converts the specification to a [`Color`]. Unknown color names fall
    /// back to white with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => color::name_to_color(name).unwrap_or_else(|| {
                warn!("unknown color '{name}', using white");
                color::WHITE
            }),
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
            ColorSpec::Rgba([r, g, b, a]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: *a as f64 / 255.0,
            },
        }
    }
}

fn default_canvas_width() -> f64 {
    3000.0
}

fn default_canvas_height() -> f64 {
    3000.0
}

fn default_min_zoom_scale() -> f64 {
    0.2
}

fn default_max_zoom_scale() -> f64 {
    10.0
}

fn default_bounce_enabled() -> bool {
    true
}

fn default_scroll_indicators_visible() -> bool {
    true
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

/// Controller configuration, one struct constructed at startup and passed
/// explicitly to [`CanvasController::new`](crate::controller::CanvasController::new).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Logical canvas width in scene units.
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Logical canvas height in scene units.
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,

    /// Smallest allowed zoom; also the initial zoom.
    #[serde(default = "default_min_zoom_scale")]
    pub min_zoom_scale: f64,

    /// Largest allowed zoom.
    #[serde(default = "default_max_zoom_scale")]
    pub max_zoom_scale: f64,

    /// Whether the host scroll surface bounces past the content edges.
    #[serde(default = "default_bounce_enabled")]
    pub bounce_enabled: bool,

    #[serde(default = "default_scroll_indicators_visible")]
    pub scroll_indicators_visible: bool,

    /// Color painted behind the scene.
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            min_zoom_scale: default_min_zoom_scale(),
            max_zoom_scale: default_max_zoom_scale(),
            bounce_enabled: default_bounce_enabled(),
            scroll_indicators_visible: default_scroll_indicators_visible(),
            background: default_background(),
        }
    }
}

impl CanvasConfig {
    /// Parses a configuration from TOML text, clamping invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: CanvasConfig = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Loads configuration from a file, or returns defaults if the file
    /// does not exist.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("config file not found, using defaults");
            debug!("expected config at {}", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Resets out-of-range values to their defaults, warning for each fix.
    fn validate_and_clamp(&mut self) {
        if !self.canvas_width.is_finite() || self.canvas_width <= 0.0 {
            warn!(
                "invalid canvas_width {}, using {}",
                self.canvas_width,
                default_canvas_width()
            );
            self.canvas_width = default_canvas_width();
        }
        if !self.canvas_height.is_finite() || self.canvas_height <= 0.0 {
            warn!(
                "invalid canvas_height {}, using {}",
                self.canvas_height,
                default_canvas_height()
            );
            self.canvas_height = default_canvas_height();
        }
        if !self.min_zoom_scale.is_finite() || self.min_zoom_scale <= 0.0 {
            warn!(
                "invalid min_zoom_scale {}, using {}",
                self.min_zoom_scale,
                default_min_zoom_scale()
            );
            self.min_zoom_scale = default_min_zoom_scale();
        }
        if !self.max_zoom_scale.is_finite() || self.max_zoom_scale <= 0.0 {
            warn!(
                "invalid max_zoom_scale {}, using {}",
                self.max_zoom_scale,
                default_max_zoom_scale()
            );
            self.max_zoom_scale = default_max_zoom_scale();
        }
        if self.max_zoom_scale < self.min_zoom_scale {
            warn!(
                "max_zoom_scale {} is below min_zoom_scale {}, raising it",
                self.max_zoom_scale, self.min_zoom_scale
            );
            self.max_zoom_scale = self.min_zoom_scale;
        }
    }
}
