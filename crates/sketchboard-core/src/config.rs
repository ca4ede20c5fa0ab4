//! Editor configuration.

use crate::camera::{Camera, GRID_SIZE, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use crate::geometry::HIT_TOLERANCE;
use crate::shapes::ShapeStyle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for hit testing, zoom and new-shape styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pick distance for outlines, in world units.
    pub hit_tolerance: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor applied by one zoom step.
    pub zoom_step: f64,
    /// Grid spacing in world units.
    pub grid_size: f64,
    /// Style given to newly drawn shapes.
    pub default_style: ShapeStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: HIT_TOLERANCE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            grid_size: GRID_SIZE,
            default_style: ShapeStyle::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let problem = if self.hit_tolerance.is_nan() || self.hit_tolerance < 0.0 {
            Some(format!("hit_tolerance must be >= 0, got {}", self.hit_tolerance))
        } else if !positive(self.min_zoom) || !positive(self.max_zoom) || self.min_zoom > self.max_zoom {
            Some(format!(
                "zoom range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            ))
        } else if !positive(self.zoom_step) || self.zoom_step <= 1.0 {
            Some(format!("zoom_step must be > 1, got {}", self.zoom_step))
        } else if !positive(self.grid_size) {
            Some(format!("grid_size must be > 0, got {}", self.grid_size))
        } else if !positive(self.default_style.stroke_width) {
            Some(format!(
                "stroke_width must be > 0, got {}",
                self.default_style.stroke_width
            ))
        } else {
            None
        };
        match problem {
            Some(msg) => {
                log::warn!("Rejecting editor config: {}", msg);
                Err(ConfigError::Invalid(msg))
            }
            None => Ok(()),
        }
    }

    /// Build a camera at the default view using these settings.
    pub fn camera(&self) -> Camera {
        let mut camera = Camera {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            zoom_step: self.zoom_step,
            grid_size: self.grid_size,
            ..Camera::default()
        };
        camera.reset();
        camera
    }
}
