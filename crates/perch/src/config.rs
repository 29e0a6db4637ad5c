/*!
Overlay configuration.

Every tunable the controllers use, with the defaults the mascot ships with.
Loadable from JSON; missing keys fall back to their defaults.
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{GeometryMode, PerchError, PerchResult, Point};

/// Tunables for one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
  /// Where the overlay's top-left corner starts.
  pub initial_position: Point,
  /// Unscaled overlay width in pixels.
  pub base_width: f64,
  /// Unscaled overlay height in pixels.
  pub base_height: f64,
  /// Multiplier change per scroll tick.
  pub resize_step: f64,
  pub multiplier_lower: f64,
  pub multiplier_upper: f64,
  /// Vertical distance (exclusive) within which docking locks.
  pub dock_tolerance_px: u32,
  /// Squared top-left movement below which a docked window counts as still.
  pub dock_follow_epsilon: f64,
  /// Displacement per interval above which the overlay is dizzy.
  pub dizzy_threshold: f64,
  pub dizzy_interval_ms: u64,
  /// Maximum distance of the 3D hit-test ray.
  pub ray_max_distance: f64,
  pub geometry_mode: GeometryMode,
}

impl Default for OverlayConfig {
  fn default() -> Self {
    Self {
      initial_position: Point::new(128.0, 128.0),
      base_width: 0.0,
      base_height: 0.0,
      resize_step: 0.013,
      multiplier_lower: 0.3,
      multiplier_upper: 1.2,
      dock_tolerance_px: 17,
      dock_follow_epsilon: 0.0001,
      dizzy_threshold: 2850.0,
      dizzy_interval_ms: 2000,
      ray_max_distance: 100.0,
      geometry_mode: GeometryMode::Legacy,
    }
  }
}

impl OverlayConfig {
  /// Parse a JSON document and validate it.
  pub fn from_json(json: &str) -> PerchResult<Self> {
    let config: Self = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  pub const fn dizzy_interval(&self) -> Duration {
    Duration::from_millis(self.dizzy_interval_ms)
  }

  /// Reject values the controllers cannot work with.
  pub fn validate(&self) -> PerchResult<()> {
    if self.multiplier_lower.is_nan() || self.multiplier_lower <= 0.0 {
      return Err(PerchError::InvalidConfig(format!(
        "multiplier_lower must be positive, got {}",
        self.multiplier_lower
      )));
    }
    if self.multiplier_lower > self.multiplier_upper {
      return Err(PerchError::InvalidConfig(format!(
        "multiplier_lower {} exceeds multiplier_upper {}",
        self.multiplier_lower, self.multiplier_upper
      )));
    }
    if self.resize_step.is_nan() || self.resize_step <= 0.0 {
      return Err(PerchError::InvalidConfig(format!(
        "resize_step must be positive, got {}",
        self.resize_step
      )));
    }
    if self.base_width < 0.0 || self.base_height < 0.0 {
      return Err(PerchError::InvalidConfig(
        "base size must not be negative".to_string(),
      ));
    }
    if self.dizzy_interval_ms == 0 {
      return Err(PerchError::InvalidConfig(
        "dizzy_interval_ms must be non-zero".to_string(),
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_shipped_tuning() {
    let config = OverlayConfig::default();
    assert_eq!(config.initial_position, Point::new(128.0, 128.0));
    assert_eq!(config.resize_step, 0.013);
    assert_eq!((config.multiplier_lower, config.multiplier_upper), (0.3, 1.2));
    assert_eq!(config.dock_tolerance_px, 17);
    assert_eq!(config.dizzy_threshold, 2850.0);
    assert_eq!(config.dizzy_interval(), Duration::from_secs(2));
    assert_eq!(config.ray_max_distance, 100.0);
    assert_eq!(config.geometry_mode, GeometryMode::Legacy);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn json_fills_missing_keys_with_defaults() {
    let config = OverlayConfig::from_json(
      r#"{ "base_width": 320, "base_height": 480, "geometry_mode": "corrected" }"#,
    )
    .expect("valid config");
    assert_eq!(config.base_width, 320.0);
    assert_eq!(config.geometry_mode, GeometryMode::Corrected);
    assert_eq!(config.dock_tolerance_px, 17);
  }

  #[test]
  fn malformed_json_is_a_config_error() {
    assert!(matches!(
      OverlayConfig::from_json("{ not json"),
      Err(PerchError::Config(_))
    ));
  }

  #[test]
  fn rejects_inverted_bounds() {
    let err = OverlayConfig::from_json(r#"{ "multiplier_lower": 2.0 }"#).unwrap_err();
    assert!(matches!(err, PerchError::InvalidConfig(_)), "got {err}");
  }

  #[test]
  fn rejects_non_positive_lower_bound_and_zero_interval() {
    let zero_lower = OverlayConfig {
      multiplier_lower: 0.0,
      ..OverlayConfig::default()
    };
    assert!(zero_lower.validate().is_err());

    let zero_interval = OverlayConfig {
      dizzy_interval_ms: 0,
      ..OverlayConfig::default()
    };
    assert!(zero_interval.validate().is_err());
  }
}
