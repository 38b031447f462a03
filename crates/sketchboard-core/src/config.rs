//! Engine tuning knobs.

use crate::input::PointerButton;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid zoom range: min {min} must be positive and not above max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("Invalid zoom step {0}: must be greater than 1")]
    ZoomStep(f64),
    #[error("Invalid {name}: {value} must be a non-negative finite number")]
    Tolerance { name: &'static str, value: f64 },
    #[error("Invalid history limit: must be at least 1")]
    HistoryLimit,
    #[error("Invalid pan button: the left button is reserved for drawing and selection")]
    PanButton,
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Zoom factor per wheel notch.
    pub zoom_step: f64,
    /// Slack for line and arrow hit tests, in world units.
    pub line_hit_epsilon: f64,
    /// Resize handle reach, in screen pixels.
    pub handle_tolerance: f64,
    /// Button that pans the board instead of drawing.
    pub pan_button: PointerButton,
    /// Freehand decimation tolerance in world units. Zero keeps every sample.
    pub pencil_simplify_tolerance: f64,
    /// Maximum stored history snapshots. None is unbounded.
    pub history_limit: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 10.0,
            zoom_step: 1.05,
            line_hit_epsilon: 1.0,
            handle_tolerance: crate::selection::HANDLE_HIT_TOLERANCE,
            pan_button: PointerButton::Middle,
            pencil_simplify_tolerance: 0.0,
            history_limit: None,
        }
    }
}

impl EngineConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_scale, self.max_scale);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(ConfigError::ZoomRange { min, max });
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        for (name, value) in [
            ("line_hit_epsilon", self.line_hit_epsilon),
            ("handle_tolerance", self.handle_tolerance),
            ("pencil_simplify_tolerance", self.pencil_simplify_tolerance),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Tolerance { name, value });
            }
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::HistoryLimit);
        }
        if self.pan_button == PointerButton::Left {
            return Err(ConfigError::PanButton);
        }
        Ok(())
    }
}
