//! Study configuration
//!
//! The main configuration type is `StudyConfig`, which contains everything
//! needed to run the scoring pipeline: indicator distributions per forest
//! type, per-NCP aggregation and supply-benefit settings, the access
//! table and the priority table.
//!
//! # Builder DSL
//!
//! For an ergonomic way to assemble a study, use the builder DSL:
//!
//! ```ignore
//! use netncp_core::config::{NcpBuilder, StudyBuilder};
//!
//! let (config, metadata) = StudyBuilder::new()
//!     .forest_type("Broadleaf", 8)
//!     .forest_type("Conifer", 8)
//!     .indicator("Broadleaf", "basal_area", 12.0, 2.0)
//!     .indicator("Conifer", "basal_area", 16.0, 3.0)
//!     .group("Foresters")
//!     .group("Hikers")
//!     .ncp(NcpBuilder::new("Timber")
//!         .sum_of(["basal_area"])
//!         .supply_range(0.0, 20.0)
//!         .threshold_cubic_benefits(5.0))
//!     .access("Timber", "Foresters", 0.8)
//!     .access("Timber", "Hikers", 0.1)
//!     .priority("Timber", "Foresters", 30.0)
//!     .priority("Timber", "Hikers", 5.0)
//!     .build()?;
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PipelineError, Warning};
use crate::model::{ForestTypeId, GroupId, IndicatorId, NcpId, SbShape};

pub mod builder;
pub mod metadata;
pub mod ncp_builder;

pub use builder::StudyBuilder;
pub use metadata::{EntityMetadata, StudyMetadata};
pub use ncp_builder::NcpBuilder;

/// Normal distribution parameters for one indicator within a forest type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IndicatorDistribution {
    pub indicator: IndicatorId,
    pub mean: f64,
    pub std_dev: f64,
}

/// Sampling specification for one forest type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestTypeSpec {
    pub forest_type: ForestTypeId,
    /// Number of sampled replicates (plots) for this forest type
    pub replicates: usize,
    pub indicators: Vec<IndicatorDistribution>,
}

/// How raw indicator values reduce to one potential supply value per NCP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AggregationRule {
    /// Sum of the named indicator values
    Sum(Vec<IndicatorId>),
    /// A single indicator passed through unchanged
    Passthrough(IndicatorId),
    /// Average of the named indicators after each is rescaled to [0, 1]
    /// using that indicator's min/max over the *entire* dataset (all
    /// forest types and replicates), not per forest type. Supply values
    /// under this rule are dataset-relative: a single outlier shifts
    /// every record's score.
    MeanOfNormalized(Vec<IndicatorId>),
}

impl AggregationRule {
    /// The indicators this rule reads
    pub fn indicators(&self) -> &[IndicatorId] {
        match self {
            AggregationRule::Sum(ids) | AggregationRule::MeanOfNormalized(ids) => ids,
            AggregationRule::Passthrough(id) => std::slice::from_ref(id),
        }
    }
}

/// Full specification of one NCP category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NcpSpec {
    pub ncp: NcpId,
    pub aggregation: AggregationRule,
    /// Declared supply range; benefit is anchored at these endpoints
    pub supply_min: f64,
    pub supply_max: f64,
    pub shape: SbShape,
    /// Threshold for the threshold shapes, unused otherwise
    pub threshold: Option<f64>,
}

/// Static access fractions: what share of potential supply each
/// stakeholder group can actually realise per NCP
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessTable {
    entries: FxHashMap<(NcpId, GroupId), f64>,
}

impl AccessTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ncp: NcpId, group: GroupId, fraction: f64) {
        self.entries.insert((ncp, group), fraction);
    }

    /// Look up the access fraction for one (NCP, group) pair.
    ///
    /// A missing entry is a hard error; access is never assumed to be 1.
    pub fn fraction(&self, ncp: NcpId, group: GroupId) -> Result<f64, PipelineError> {
        self.entries
            .get(&(ncp, group))
            .copied()
            .ok_or(PipelineError::MissingAccessEntry { ncp, group })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&(NcpId, GroupId), &f64)> {
        self.entries.iter()
    }

    /// Copy of this table with one group's entire access column scaled by
    /// `factor` and clamped back into [0, 1]. Used by the sensitivity
    /// analyzer's access perturbations.
    #[must_use]
    pub fn with_scaled_group(&self, group: GroupId, factor: f64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(&(n, g), &f)| {
                let scaled = if g == group { (f * factor).clamp(0.0, 1.0) } else { f };
                ((n, g), scaled)
            })
            .collect();
        Self { entries }
    }
}

/// Raw stakeholder priority points per (NCP, group).
///
/// Points need not sum to any fixed total; the priority weighter
/// normalizes each group's points to relative weights summing to 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityTable {
    entries: FxHashMap<(NcpId, GroupId), f64>,
}

impl PriorityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ncp: NcpId, group: GroupId, points: f64) {
        self.entries.insert((ncp, group), points);
    }

    /// Raw points for one (NCP, group) pair; absent entries count as 0
    #[must_use]
    pub fn points(&self, ncp: NcpId, group: GroupId) -> f64 {
        self.entries.get(&(ncp, group)).copied().unwrap_or(0.0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&(NcpId, GroupId), &f64)> {
        self.entries.iter()
    }

    /// Relative priorities for one group across the given NCPs.
    ///
    /// Fails with `DegeneratePriority` when the group's points sum to
    /// zero; the caller skips that group and continues with the rest.
    pub fn relative_weights(
        &self,
        group: GroupId,
        ncps: &[NcpId],
    ) -> Result<FxHashMap<NcpId, f64>, PipelineError> {
        let total: f64 = ncps.iter().map(|&n| self.points(n, group)).sum();
        if total <= 0.0 {
            return Err(PipelineError::DegeneratePriority { group });
        }
        Ok(ncps
            .iter()
            .map(|&n| (n, self.points(n, group) / total))
            .collect())
    }
}

/// Complete study configuration
///
/// Everything the pipeline needs is in here; the random seed is the only
/// other input and is passed explicitly to [`crate::pipeline::run`] so
/// that sensitivity re-runs are reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Forest types with replicate counts and indicator distributions
    pub forest_types: Vec<ForestTypeSpec>,
    /// NCP categories in a fixed, deterministic order
    pub ncps: Vec<NcpSpec>,
    /// Stakeholder groups in a fixed, deterministic order
    pub groups: Vec<GroupId>,
    pub access: AccessTable,
    pub priority: PriorityTable,
}

impl StudyConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The NCP ids in configuration order
    #[must_use]
    pub fn ncp_ids(&self) -> Vec<NcpId> {
        self.ncps.iter().map(|n| n.ncp).collect()
    }

    /// Find an NCP spec by id
    #[must_use]
    pub fn ncp(&self, id: NcpId) -> Option<&NcpSpec> {
        self.ncps.iter().find(|n| n.ncp == id)
    }

    /// Validate the configuration, returning the first fatal defect.
    ///
    /// Lenient checks (threshold placement) are returned as warnings so
    /// the caller can surface them without halting.
    pub fn validate(&self) -> Result<Vec<Warning>, ConfigError> {
        for ft in &self.forest_types {
            if ft.replicates == 0 {
                return Err(ConfigError::InvalidReplicateCount {
                    forest_type: ft.forest_type,
                    replicates: ft.replicates,
                });
            }
            for dist in &ft.indicators {
                if !dist.std_dev.is_finite() || dist.std_dev < 0.0 || !dist.mean.is_finite() {
                    return Err(ConfigError::InvalidDistributionParameters {
                        indicator: dist.indicator,
                        mean: dist.mean,
                        std_dev: dist.std_dev,
                        reason: "mean and std_dev must be finite, std_dev non-negative",
                    });
                }
            }
        }

        let known_indicators: Vec<IndicatorId> = self
            .forest_types
            .iter()
            .flat_map(|ft| ft.indicators.iter().map(|d| d.indicator))
            .collect();

        let mut warnings = Vec::new();
        for spec in &self.ncps {
            if !(spec.supply_min < spec.supply_max) {
                return Err(ConfigError::InvalidSupplyRange {
                    ncp: spec.ncp,
                    min: spec.supply_min,
                    max: spec.supply_max,
                });
            }
            for &ind in spec.aggregation.indicators() {
                if !known_indicators.contains(&ind) {
                    return Err(ConfigError::UnknownIndicator {
                        ncp: spec.ncp,
                        indicator: ind,
                    });
                }
            }
            if spec.shape.needs_threshold() {
                match spec.threshold {
                    None => return Err(ConfigError::MissingThreshold { ncp: spec.ncp }),
                    // A misplaced threshold warns; the formula still uses it.
                    Some(t) if t <= spec.supply_min || t >= spec.supply_max => {
                        warnings.push(Warning::ThresholdOutsideRange {
                            ncp: spec.ncp,
                            threshold: t,
                            min: spec.supply_min,
                            max: spec.supply_max,
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        for (&(ncp, group), &fraction) in self.access.entries() {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(ConfigError::InvalidAccessFraction {
                    ncp,
                    group,
                    fraction,
                });
            }
        }

        for (&(ncp, group), &points) in self.priority.entries() {
            if points < 0.0 || !points.is_finite() {
                return Err(ConfigError::NegativePriority { ncp, group, points });
            }
        }

        Ok(warnings)
    }
}
