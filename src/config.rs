//! Pipeline configuration: association gates, zone layout and policy,
//! loadable from a YAML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::zone::{ZonePolicy, ZoneTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Thresholds for the association matcher and track lifecycle.
///
/// Distances are pixels in frame coordinates, times are seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detections scoring below this never enter the core
    pub confidence_threshold: f32,
    /// Minimum IoU (exclusive) for a detection to match a track
    pub iou_gate: f32,
    /// Maximum center displacement (exclusive) for a match
    pub center_distance_gate: f32,
    /// Maximum relative area difference (exclusive) for a match
    pub size_ratio_gate: f32,
    /// Center movement beyond this resets a track's dwell
    pub movement_threshold: f32,
    /// Tracks unseen longer than this are deleted
    pub stale_timeout: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.6,
            iou_gate: 0.4,
            center_distance_gate: 50.0,
            size_ratio_gate: 0.5,
            movement_threshold: 10.0,
            stale_timeout: 3.0,
        }
    }
}

/// Everything the pipeline needs: tracker thresholds, the zone region table
/// and the per-zone dwell policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    pub zones: ZoneTable,
    pub policy: ZonePolicy,
}

impl PipelineConfig {
    /// Load and validate a config from a YAML file. Missing fields take
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tracker;
        if !(0.0..=1.0).contains(&t.confidence_threshold) {
            return Err(ConfigError::Invalid(format!(
                "confidence_threshold must be in [0, 1], got {}",
                t.confidence_threshold
            )));
        }
        if t.iou_gate < 0.0 || t.iou_gate > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "iou_gate must be in [0, 1], got {}",
                t.iou_gate
            )));
        }
        if t.center_distance_gate <= 0.0 {
            return Err(ConfigError::Invalid(
                "center_distance_gate must be positive".into(),
            ));
        }
        if t.size_ratio_gate <= 0.0 {
            return Err(ConfigError::Invalid(
                "size_ratio_gate must be positive".into(),
            ));
        }
        if t.movement_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "movement_threshold must not be negative".into(),
            ));
        }
        if t.stale_timeout <= 0.0 {
            return Err(ConfigError::Invalid("stale_timeout must be positive".into()));
        }
        if self.policy.min_display_duration < 0.0 {
            return Err(ConfigError::Invalid(
                "min_display_duration must not be negative".into(),
            ));
        }
        if self.policy.price_step_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "price_step_secs must be positive".into(),
            ));
        }
        if self.zones.reference.width <= 0.0 || self.zones.reference.height <= 0.0 {
            return Err(ConfigError::Invalid(
                "zone reference frame must have positive dimensions".into(),
            ));
        }
        Ok(())
    }
}
