//! Trail configuration
//!
//! Every field has a default matching the stock effect, so an empty JSON
//! object is a valid configuration.

use crate::animator::error::{TrailError, TrailResult};
use crate::capture::selector::{Selector, CURSOR_SELECTOR, FOLLOWER_SELECTOR, INTERACTIVE_SELECTOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Accepted range for `frameRate`, in frames per second
pub const FRAME_RATE_RANGE: std::ops::RangeInclusive<f64> = 1.0..=1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailConfig {
    pub cursor_selector: String,
    pub follower_selector: String,
    pub interactive_selector: String,
    /// Fraction of the remaining distance the dot closes per frame
    pub cursor_factor: f64,
    /// Fraction of the remaining distance the ring closes per frame
    pub follower_factor: f64,
    pub cursor_diameter: f64,
    /// Ring diameter at rest
    pub follower_diameter: f64,
    /// Ring diameter while an interactive element is hovered
    pub follower_hover_diameter: f64,
    /// Frames per second for the native frame loop and trail replay
    pub frame_rate: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            cursor_selector: CURSOR_SELECTOR.to_string(),
            follower_selector: FOLLOWER_SELECTOR.to_string(),
            interactive_selector: INTERACTIVE_SELECTOR.to_string(),
            cursor_factor: 0.2,
            follower_factor: 0.1,
            cursor_diameter: 12.0,
            follower_diameter: 40.0,
            follower_hover_diameter: 60.0,
            frame_rate: 60.0,
        }
    }
}

impl TrailConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> TrailResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> TrailResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> TrailResult<()> {
        check_factor("cursorFactor", self.cursor_factor)?;
        check_factor("followerFactor", self.follower_factor)?;
        check_positive("cursorDiameter", self.cursor_diameter)?;
        check_positive("followerDiameter", self.follower_diameter)?;
        check_positive("followerHoverDiameter", self.follower_hover_diameter)?;

        if !FRAME_RATE_RANGE.contains(&self.frame_rate) {
            return Err(TrailError::Config(format!(
                "frameRate must be between {} and {}, got {}",
                FRAME_RATE_RANGE.start(),
                FRAME_RATE_RANGE.end(),
                self.frame_rate
            )));
        }

        self.selectors()?;
        Ok(())
    }

    /// Parsed cursor, follower and interactive selectors, in that order
    pub fn selectors(&self) -> TrailResult<(Selector, Selector, Selector)> {
        Ok((
            Selector::parse(&self.cursor_selector)?,
            Selector::parse(&self.follower_selector)?,
            Selector::parse(&self.interactive_selector)?,
        ))
    }

    /// Time between frames; only meaningful on a validated config
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate)
    }
}

fn check_factor(name: &str, value: f64) -> TrailResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(TrailError::Config(format!(
            "{} must be in (0, 1], got {}",
            name, value
        )))
    }
}

fn check_positive(name: &str, value: f64) -> TrailResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TrailError::Config(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = TrailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cursor_factor, 0.2);
        assert_eq!(config.follower_factor, 0.1);
        assert_eq!(config.cursor_diameter / 2.0, 6.0);
        assert_eq!(config.follower_diameter / 2.0, 20.0);
        assert_eq!(config.follower_hover_diameter / 2.0, 30.0);
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = TrailConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TrailConfig::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            TrailConfig::from_json_str(r#"{"followerFactor": 0.05, "frameRate": 120}"#).unwrap();
        assert_eq!(config.follower_factor, 0.05);
        assert_eq!(config.frame_rate, 120.0);
        assert_eq!(config.cursor_factor, 0.2);
    }

    #[test]
    fn test_rejects_out_of_range_factor() {
        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let config = TrailConfig {
                cursor_factor: bad,
                ..TrailConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(TrailError::Config(_))),
                "factor {} should be rejected",
                bad
            );
        }

        let full_speed = TrailConfig {
            follower_factor: 1.0,
            ..TrailConfig::default()
        };
        assert!(full_speed.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sizes_and_selectors() {
        let config = TrailConfig {
            follower_hover_diameter: 0.0,
            ..TrailConfig::default()
        };
        assert!(matches!(config.validate(), Err(TrailError::Config(_))));

        let config = TrailConfig {
            interactive_selector: "a, , button".to_string(),
            ..TrailConfig::default()
        };
        assert!(matches!(config.validate(), Err(TrailError::Selector(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cursorDiameter": 8}}"#).unwrap();

        let config = TrailConfig::load(file.path()).unwrap();
        assert_eq!(config.cursor_diameter, 8.0);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            TrailConfig::load(file.path()),
            Err(TrailError::Json(_))
        ));
    }

    #[test]
    fn test_rejects_frame_rate_out_of_range() {
        for bad in [1e-300, 0.5, 1000.5, 1e300, f64::INFINITY, f64::NAN] {
            let config = TrailConfig {
                frame_rate: bad,
                ..TrailConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(TrailError::Config(_))),
                "frame rate {} should be rejected",
                bad
            );
        }

        assert!(matches!(
            TrailConfig::from_json_str(r#"{"frameRate": 1e-300}"#),
            Err(TrailError::Config(_))
        ));
    }

    #[test]
    fn test_frame_rate_bounds_give_usable_intervals() {
        for rate in [*FRAME_RATE_RANGE.start(), *FRAME_RATE_RANGE.end()] {
            let config = TrailConfig {
                frame_rate: rate,
                ..TrailConfig::default()
            };
            assert!(config.validate().is_ok());
            assert!(config.frame_interval() > Duration::ZERO);
        }
    }

    #[test]
    fn test_frame_interval() {
        let config = TrailConfig {
            frame_rate: 50.0,
            ..TrailConfig::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
