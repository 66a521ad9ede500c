use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ForestTypeId, GroupId, IndicatorId, NcpId};

/// Errors detected while validating a study configuration
#[derive(Debug, Clone, Serialize)]
pub enum ConfigError {
    /// Replicate count for a forest type must be at least 1
    InvalidReplicateCount {
        forest_type: ForestTypeId,
        replicates: usize,
    },
    /// Declared supply range must satisfy min < max
    InvalidSupplyRange { ncp: NcpId, min: f64, max: f64 },
    InvalidDistributionParameters {
        indicator: IndicatorId,
        mean: f64,
        std_dev: f64,
        reason: &'static str,
    },
    /// Access fractions must lie in [0, 1]
    InvalidAccessFraction {
        ncp: NcpId,
        group: GroupId,
        fraction: f64,
    },
    /// Priority points must be non-negative
    NegativePriority {
        ncp: NcpId,
        group: GroupId,
        points: f64,
    },
    /// A shape identifier that is not one of the four supported shapes
    UnknownShape(String),
    /// A threshold shape configured without a threshold value
    MissingThreshold { ncp: NcpId },
    /// The builder DSL referenced a name that was never registered
    UnknownName { kind: &'static str, name: String },
    /// An aggregation rule references an indicator no forest type provides
    UnknownIndicator { ncp: NcpId, indicator: IndicatorId },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidReplicateCount {
                forest_type,
                replicates,
            } => {
                write!(
                    f,
                    "forest type {forest_type:?} has invalid replicate count {replicates}"
                )
            }
            ConfigError::InvalidSupplyRange { ncp, min, max } => {
                write!(f, "NCP {ncp:?} has invalid supply range [{min}, {max}]")
            }
            ConfigError::InvalidDistributionParameters {
                indicator,
                mean,
                std_dev,
                reason,
            } => {
                write!(
                    f,
                    "invalid distribution for indicator {indicator:?} (mean={mean}, std_dev={std_dev}): {reason}"
                )
            }
            ConfigError::InvalidAccessFraction {
                ncp,
                group,
                fraction,
            } => {
                write!(
                    f,
                    "access fraction {fraction} for (NCP {ncp:?}, group {group:?}) is outside [0, 1]"
                )
            }
            ConfigError::NegativePriority { ncp, group, points } => {
                write!(
                    f,
                    "negative priority points {points} for (NCP {ncp:?}, group {group:?})"
                )
            }
            ConfigError::UnknownShape(name) => {
                write!(f, "unknown supply-benefit shape {name:?}")
            }
            ConfigError::MissingThreshold { ncp } => {
                write!(f, "NCP {ncp:?} uses a threshold shape but no threshold is set")
            }
            ConfigError::UnknownName { kind, name } => {
                write!(f, "unknown {kind} name {name:?}")
            }
            ConfigError::UnknownIndicator { ncp, indicator } => {
                write!(
                    f,
                    "NCP {ncp:?} aggregates indicator {indicator:?} which no forest type provides"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fatal errors raised while running the scoring pipeline
#[derive(Debug, Clone, Serialize)]
pub enum PipelineError {
    Config(ConfigError),
    /// An NCP present in the supply table has no access entry for a group.
    /// Access is never assumed to be 1.
    MissingAccessEntry { ncp: NcpId, group: GroupId },
    /// A stakeholder group whose priority points sum to zero cannot be
    /// weighted; only that group is aborted.
    DegeneratePriority { group: GroupId },
    /// A baseline netNCP mean of zero makes relative sensitivity change
    /// undefined for that (group, forest type) cell.
    DegenerateBaseline {
        group: GroupId,
        forest_type: ForestTypeId,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Config(e) => write!(f, "{e}"),
            PipelineError::MissingAccessEntry { ncp, group } => {
                write!(
                    f,
                    "no access entry for (NCP {ncp:?}, group {group:?}) in the access table"
                )
            }
            PipelineError::DegeneratePriority { group } => {
                write!(f, "priority points for group {group:?} sum to zero")
            }
            PipelineError::DegenerateBaseline { group, forest_type } => {
                write!(
                    f,
                    "baseline netNCP mean is zero for (group {group:?}, forest type {forest_type:?})"
                )
            }
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for PipelineError {
    fn from(e: ConfigError) -> Self {
        PipelineError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Non-fatal conditions collected during a run and surfaced to the caller.
///
/// Warnings never halt execution; the affected value is still computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Warning {
    /// Realised supply fell outside the declared [min, max]; the shape
    /// formula was extrapolated anyway.
    RangeViolation {
        ncp: NcpId,
        supply: f64,
        min: f64,
        max: f64,
    },
    /// A threshold shape's threshold does not lie strictly between min
    /// and max; the formula still uses it as given.
    ThresholdOutsideRange {
        ncp: NcpId,
        threshold: f64,
        min: f64,
        max: f64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::RangeViolation {
                ncp,
                supply,
                min,
                max,
            } => {
                write!(
                    f,
                    "realised supply {supply} for NCP {ncp:?} is outside [{min}, {max}]; extrapolating"
                )
            }
            Warning::ThresholdOutsideRange {
                ncp,
                threshold,
                min,
                max,
            } => {
                write!(
                    f,
                    "threshold {threshold} for NCP {ncp:?} is not strictly inside ({min}, {max})"
                )
            }
        }
    }
}
