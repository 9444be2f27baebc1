//! Editor configuration.
//!
//! Settings are plain serde structs so the host can persist them however it
//! likes; `EditorConfig::from_json` is provided for the common case. Every
//! field has a default, so partial documents are accepted.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_SNAP_THRESHOLD,
    HANDLE_HALF_SIZE, HISTORY_CAPACITY, HIT_TOLERANCE,
};
use crate::error::ConfigError;

/// Snapping behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Master switch; when off no snapping of any kind happens.
    pub enabled: bool,
    pub grid_enabled: bool,
    pub shape_enabled: bool,
    pub grid_size: f64,
    /// Maximum distance (in canvas units) at which a snap is accepted.
    pub threshold: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            grid_enabled: true,
            shape_enabled: true,
            grid_size: DEFAULT_GRID_SIZE,
            threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub history_capacity: usize,
    pub handle_half_size: f64,
    pub hit_tolerance: f64,
    pub snap: SnapSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            history_capacity: HISTORY_CAPACITY,
            handle_half_size: HANDLE_HALF_SIZE,
            hit_tolerance: HIT_TOLERANCE,
            snap: SnapSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: format!("must be positive and finite, got {value}"),
                })
            }
        }

        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("handle_half_size", self.handle_half_size)?;
        positive("snap.grid_size", self.snap.grid_size)?;
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "hit_tolerance".to_string(),
                reason: format!("must be non-negative, got {}", self.hit_tolerance),
            });
        }
        if !(self.snap.threshold.is_finite() && self.snap.threshold >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "snap.threshold".to_string(),
                reason: format!("must be non-negative, got {}", self.snap.threshold),
            });
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "history_capacity".to_string(),
                reason: "must hold at least one command".to_string(),
            });
        }
        Ok(())
    }
}
