//! Accuracy thresholds.

use serde::{Deserialize, Serialize};

use nav_core::{NavError, NavResult};

/// Limits a fix must meet to count as accurate.
///
/// Loaded once at startup (usually as part of the application's JSON
/// configuration) and read-only afterwards.  Missing keys fall back to
/// [`Default`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyThresholds {
    /// Largest horizontal accuracy radius, in metres, still considered an
    /// accurate position.  A fix exactly on the limit is accurate.
    pub max_position_error_m: f64,

    /// Below this ground speed (m/s) a GPS-derived bearing is drift, not
    /// heading, and is treated as inaccurate whatever the provider claims.
    pub min_speed_for_bearing_mps: f64,
}

impl AccuracyThresholds {
    pub const DEFAULT_MAX_POSITION_ERROR_M: f64 = 10.0;
    pub const DEFAULT_MIN_SPEED_FOR_BEARING_MPS: f64 = 1.0;

    /// Construct and validate.
    pub fn new(max_position_error_m: f64, min_speed_for_bearing_mps: f64) -> NavResult<Self> {
        let thresholds = Self { max_position_error_m, min_speed_for_bearing_mps };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Both limits must be finite and non-negative.
    pub fn validate(&self) -> NavResult<()> {
        check("max_position_error_m", self.max_position_error_m)?;
        check("min_speed_for_bearing_mps", self.min_speed_for_bearing_mps)
    }
}

impl Default for AccuracyThresholds {
    fn default() -> Self {
        Self {
            max_position_error_m:      Self::DEFAULT_MAX_POSITION_ERROR_M,
            min_speed_for_bearing_mps: Self::DEFAULT_MIN_SPEED_FOR_BEARING_MPS,
        }
    }
}

fn check(name: &str, value: f64) -> NavResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(NavError::Config(format!(
            "{name} must be a finite, non-negative number (got {value})"
        )))
    }
}
