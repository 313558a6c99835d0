//! Worm tuning and its validation
//!
//! Loaded once at startup (JSON). Every field falls back to the default in
//! [`crate::consts`] when missing from the file.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug)]
pub enum ConfigError {
    ZeroSegments,
    InvalidRadius(f32),
    InvalidStepLength(f32),
    InvalidLegRange { min: u32, max: u32 },
    InvalidMaxYaw(i32),
    ZeroPace,
    InvalidStrokeWidth(f32),
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSegments => write!(f, "segment_count must be at least 1"),
            ConfigError::InvalidRadius(r) => {
                write!(f, "radius must be non-negative and finite (got {r})")
            }
            ConfigError::InvalidStepLength(l) => {
                write!(f, "step_length must be positive and finite (got {l})")
            }
            ConfigError::InvalidLegRange { min, max } => write!(
                f,
                "leg range must satisfy 1 <= min_steps_before_turn <= max_steps_before_turn (got {min}..={max})"
            ),
            ConfigError::InvalidMaxYaw(yaw) => write!(f, "max_yaw must be within 0..=180 (got {yaw})"),
            ConfigError::ZeroPace => write!(f, "pace_ms must be positive"),
            ConfigError::InvalidStrokeWidth(w) => {
                write!(f, "stroke_width must be non-negative and finite (got {w})")
            }
            ConfigError::Parse(e) => write!(f, "invalid config JSON: {e}"),
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

/// Worm tuning, fixed for the lifetime of a simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WormConfig {
    /// Number of segments (head + body)
    pub segment_count: usize,
    /// Segment circle radius
    pub radius: f32,
    /// Distance travelled per tick
    pub step_length: f32,
    /// Shortest leg (inclusive)
    pub min_steps_before_turn: u32,
    /// Longest leg (inclusive)
    pub max_steps_before_turn: u32,
    /// Largest turn per leg in degrees, either direction
    pub max_yaw: i32,
    /// Tick period in milliseconds
    pub pace_ms: u64,
    /// Heading before the first leg (degrees)
    pub initial_azimuth: i32,
    /// Segment outline width for rendering
    pub stroke_width: f32,
}

impl Default for WormConfig {
    fn default() -> Self {
        Self {
            segment_count: SEGMENT_COUNT,
            radius: SEGMENT_RADIUS,
            step_length: STEP_LENGTH,
            min_steps_before_turn: MIN_STEPS_BEFORE_TURN,
            max_steps_before_turn: MAX_STEPS_BEFORE_TURN,
            max_yaw: MAX_YAW,
            pace_ms: PACE_MS,
            initial_azimuth: INITIAL_AZIMUTH,
            stroke_width: STROKE_WIDTH,
        }
    }
}

impl WormConfig {
    /// Tick period
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }

    /// Check every field for values the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.segment_count == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(ConfigError::InvalidStepLength(self.step_length));
        }
        if self.min_steps_before_turn == 0 || self.min_steps_before_turn > self.max_steps_before_turn {
            return Err(ConfigError::InvalidLegRange {
                min: self.min_steps_before_turn,
                max: self.max_steps_before_turn,
            });
        }
        if !(0..=180).contains(&self.max_yaw) {
            return Err(ConfigError::InvalidMaxYaw(self.max_yaw));
        }
        if self.pace_ms == 0 {
            return Err(ConfigError::ZeroPace);
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ConfigError::InvalidStrokeWidth(self.stroke_width));
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded worm config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WormConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segment_count, 40);
        assert_eq!(config.pace(), Duration::from_millis(70));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WormConfig::from_json_str(r#"{ "segment_count": 12, "step_length": 4.5 }"#).unwrap();
        assert_eq!(config.segment_count, 12);
        assert_eq!(config.step_length, 4.5);
        assert_eq!(config.max_yaw, MAX_YAW);
        assert_eq!(config.initial_azimuth, INITIAL_AZIMUTH);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = WormConfig {
            max_yaw: 45,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(WormConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = WormConfig {
            segment_count: 0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::ZeroSegments)));

        let bad = WormConfig {
            min_steps_before_turn: 6,
            max_steps_before_turn: 5,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(ConfigError::InvalidLegRange { min: 6, max: 5 })
        ));

        let bad = WormConfig {
            min_steps_before_turn: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = WormConfig {
            step_length: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidStepLength(_))));

        let bad = WormConfig {
            max_yaw: 181,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::InvalidMaxYaw(181))));

        let bad = WormConfig {
            pace_ms: 0,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::ZeroPace)));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = WormConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid config JSON"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WormConfig::load("/definitely/not/here/worm.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
