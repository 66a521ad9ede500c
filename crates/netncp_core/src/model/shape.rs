//! Supply-benefit relationship shapes
//!
//! Each NCP maps realised supply to a benefit/detriment score through one
//! of four shape functions. The set is closed: parsing any other
//! identifier fails with `ConfigError::UnknownShape` instead of being
//! silently ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Supply-benefit shape function.
///
/// All four shapes map the declared supply range into [-1, 1]; supply
/// outside the range extrapolates the same formula (the caller collects a
/// range-violation warning).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SbShape {
    /// `(s - min) / (max - min)`: 0 at min, 1 at max
    LinearBenefits,
    /// `-(s - min) / (max - min)`: 0 at min, -1 at max
    LinearDetriments,
    /// 0 below the threshold, `(s^3 - min^3) / (max^3 - min^3)` above it.
    /// The threshold is expected strictly between min and max; placements
    /// outside that interval warn but are still honored.
    ThresholdCubicBenefits,
    /// `(s - threshold) / (max - threshold)` for all s: negative below
    /// the threshold (detriment), positive above it (benefit), reaching
    /// 1 at max. A single expression covers both sides of the threshold.
    DetrimentsThresholdBenefits,
}

impl SbShape {
    /// Whether this shape requires a threshold parameter
    #[must_use]
    pub fn needs_threshold(&self) -> bool {
        matches!(
            self,
            SbShape::ThresholdCubicBenefits | SbShape::DetrimentsThresholdBenefits
        )
    }

    /// Evaluate the shape at realised supply `s` over `[min, max]`.
    ///
    /// `threshold` is only consulted by the threshold shapes; for those,
    /// `None` falls back to `min` (configuration validation rejects that
    /// case up front). The formula is applied as-is for out-of-range `s`.
    #[must_use]
    pub fn benefit(&self, s: f64, min: f64, max: f64, threshold: Option<f64>) -> f64 {
        match self {
            SbShape::LinearBenefits => (s - min) / (max - min),
            SbShape::LinearDetriments => -(s - min) / (max - min),
            SbShape::ThresholdCubicBenefits => {
                let t = threshold.unwrap_or(min);
                if s < t {
                    0.0
                } else {
                    (s.powi(3) - min.powi(3)) / (max.powi(3) - min.powi(3))
                }
            }
            SbShape::DetrimentsThresholdBenefits => {
                let t = threshold.unwrap_or(min);
                (s - t) / (max - t)
            }
        }
    }

    /// The identifier used by string-keyed configuration sources
    #[must_use]
    pub fn identifier(&self) -> &'static str {
        match self {
            SbShape::LinearBenefits => "linear_benefits",
            SbShape::LinearDetriments => "linear_detriments",
            SbShape::ThresholdCubicBenefits => "threshold_cubic_benefits",
            SbShape::DetrimentsThresholdBenefits => "detriments_threshold_benefits",
        }
    }
}

impl FromStr for SbShape {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear_benefits" => Ok(SbShape::LinearBenefits),
            "linear_detriments" => Ok(SbShape::LinearDetriments),
            "threshold_cubic_benefits" => Ok(SbShape::ThresholdCubicBenefits),
            "detriments_threshold_benefits" => Ok(SbShape::DetrimentsThresholdBenefits),
            other => Err(ConfigError::UnknownShape(other.to_string())),
        }
    }
}
