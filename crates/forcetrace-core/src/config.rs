//! Engine settings.

use serde::{Deserialize, Serialize};

/// Default eraser radius in canvas units.
pub const DEFAULT_ERASE_RADIUS: f64 = 12.0;

/// How imported `pos_x`/`pos_y` columns map back to canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateMapping {
    /// Columns are in `[-1, 1]` with y pointing up:
    /// `x = (x + 1) / 2 * size`, `y = size - (y + 1) / 2 * size`.
    ///
    /// This is not the inverse of export, which writes `x / size`.
    #[default]
    Signed,
    /// Columns are ratios of the canvas edge, as written by export:
    /// `x = x * size`, `y = y * size`.
    Ratio,
}

/// Settings for a [`StylusEngine`](crate::StylusEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Canvas edge length used to normalize exported coordinates.
    pub total_size: f64,
    /// Radius used by [`StylusEngine::erase`](crate::StylusEngine::erase).
    pub erase_radius: f64,
    /// Maximum number of undo states, unbounded when `None`.
    pub max_history: Option<usize>,
    /// Import coordinate convention.
    pub coordinate_mapping: CoordinateMapping,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_size: 1.0,
            erase_radius: DEFAULT_ERASE_RADIUS,
            max_history: None,
            coordinate_mapping: CoordinateMapping::default(),
        }
    }
}

impl EngineConfig {
    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
