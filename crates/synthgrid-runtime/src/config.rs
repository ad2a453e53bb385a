#![forbid(unsafe_code)]

//! Policy-as-data configuration for the drag interaction.
//!
//! Every tunable constant of the interaction lives in one
//! [`InteractionConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # synthgrid.toml
//! min_drag_distance = 50.0
//! effect_delay_ms = 750
//! corner_alpha = 0.1
//! ```
//!
//! ```rust,ignore
//! let config = InteractionConfig::from_toml_file("synthgrid.toml")?;
//! let config = InteractionConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `InteractionConfig::default()` reproduces the shipped feel of the grid:
//! a 50-unit dead zone, a ±15 axis band, a ±220 travel bound, a 750 ms
//! synthesis effect, and a 100 ms return slide.

#[cfg(feature = "policy-config")]
use std::path::Path;

#[cfg(feature = "policy-config")]
use serde::{Deserialize, Serialize};

use synthgrid_core::drag::DragLimits;
use web_time::Duration;

/// Tunable parameters of the drag interaction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "policy-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct InteractionConfig {
    /// Dead-zone half-width; a drag at or inside it is no gesture.
    pub min_drag_distance: f32,
    /// Band the non-dominant axis is held in around the anchor.
    pub axis_lock_band: f32,
    /// Maximum travel from the anchor on either axis.
    pub max_drag_distance: f32,
    /// How long the synthesis effect plays before the result is shown (ms).
    /// Zero disables the effect and shows the result immediately.
    pub effect_delay_ms: u64,
    /// Duration of the slide back to the anchor after a commit (ms).
    pub return_duration_ms: u64,
    /// Alpha the four corner cells are dimmed to while dragging.
    pub corner_alpha: f32,
    /// Alpha of the highlighted neighbor cell.
    pub highlight_alpha: f32,
    /// Alpha of the ghost left at the drag origin.
    pub ghost_alpha: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: 50.0,
            axis_lock_band: 15.0,
            max_drag_distance: 220.0,
            effect_delay_ms: 750,
            return_duration_ms: 100,
            corner_alpha: 0.1,
            highlight_alpha: 0.5,
            ghost_alpha: 0.5,
        }
    }
}

impl InteractionConfig {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Validation(vec![e.to_string()]))
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("min_drag_distance", self.min_drag_distance),
            ("axis_lock_band", self.axis_lock_band),
            ("max_drag_distance", self.max_drag_distance),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        // A bound inside the dead zone makes synthesis unreachable.
        if self.max_drag_distance <= self.min_drag_distance {
            errors.push(format!(
                "max_drag_distance ({}) must exceed min_drag_distance ({})",
                self.max_drag_distance, self.min_drag_distance
            ));
        }

        for (name, value) in [
            ("corner_alpha", self.corner_alpha),
            ("highlight_alpha", self.highlight_alpha),
            ("ghost_alpha", self.ghost_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(format!("{name} must be in [0, 1], got {value}"));
            }
        }

        errors
    }

    #[cfg(feature = "policy-config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Drag geometry limits derived from this config.
    #[must_use]
    pub fn drag_limits(&self) -> DragLimits {
        DragLimits {
            axis_lock_band: self.axis_lock_band,
            max_distance: self.max_drag_distance,
            dead_zone: self.min_drag_distance,
        }
    }

    /// Synthesis effect delay.
    #[inline]
    pub fn effect_delay(&self) -> Duration {
        Duration::from_millis(self.effect_delay_ms)
    }

    /// Commit return-slide duration.
    #[inline]
    pub fn return_duration(&self) -> Duration {
        Duration::from_millis(self.return_duration_ms)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Error loading or validating an [`InteractionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[cfg(feature = "policy-config")]
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "policy-config")]
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "policy-config")]
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = InteractionConfig::default();
        assert!(config.validate().is_empty(), "{:?}", config.validate());
    }

    #[test]
    fn default_limits_match_drag_defaults() {
        assert_eq!(InteractionConfig::default().drag_limits(), DragLimits::default());
    }

    #[test]
    fn durations() {
        let config = InteractionConfig::default();
        assert_eq!(config.effect_delay(), Duration::from_millis(750));
        assert_eq!(config.return_duration(), Duration::from_millis(100));
    }

    #[test]
    fn validation_catches_bad_values() {
        let config = InteractionConfig {
            min_drag_distance: 300.0,
            axis_lock_band: f32::NAN,
            corner_alpha: 1.5,
            ..InteractionConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("axis_lock_band")));
        assert!(errors.iter().any(|e| e.contains("max_drag_distance")));
        assert!(errors.iter().any(|e| e.contains("corner_alpha")));
    }

    #[test]
    fn error_display() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }

    #[cfg(feature = "policy-config")]
    mod loading {
        use super::*;

        #[test]
        fn partial_toml_fills_defaults() {
            let config = InteractionConfig::from_toml_str("effect_delay_ms = 0\n").unwrap();
            assert_eq!(config.effect_delay_ms, 0);
            assert_eq!(config.min_drag_distance, 50.0);
        }

        #[test]
        fn json_round_trip() {
            let config = InteractionConfig {
                ghost_alpha: 0.25,
                ..InteractionConfig::default()
            };
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(InteractionConfig::from_json_str(&json).unwrap(), config);
        }

        #[test]
        fn invalid_values_rejected() {
            let err = InteractionConfig::from_json_str(r#"{"highlight_alpha": 2.0}"#).unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
        }

        #[test]
        fn malformed_toml_is_parse_error() {
            let err = InteractionConfig::from_toml_str("min_drag_distance = [").unwrap_err();
            assert!(matches!(err, ConfigError::Toml(_)));
        }

        #[test]
        fn toml_file_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("synthgrid.toml");
            let config = InteractionConfig {
                max_drag_distance: 180.0,
                ..InteractionConfig::default()
            };
            std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
            assert_eq!(InteractionConfig::from_toml_file(&path).unwrap(), config);
        }

        #[test]
        fn missing_file_is_io_error() {
            let err = InteractionConfig::from_json_file("/nonexistent/synthgrid.json").unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)));
        }
    }
}
