//! Study Builder
//!
//! The `StudyBuilder` provides a fluent API for assembling a study with
//! automatic ID assignment, name-based lookups, and metadata tracking.
//!
//! # Example
//!
//! ```ignore
//! use netncp_core::config::{NcpBuilder, StudyBuilder};
//!
//! let (config, metadata) = StudyBuilder::new()
//!     .forest_type("Broadleaf", 8)
//!     .indicator("Broadleaf", "canopy_cover", 0.7, 0.1)
//!     .indicator("Broadleaf", "basal_area", 12.0, 2.0)
//!     .group("Foresters")
//!     .group("Hikers")
//!     .ncp(NcpBuilder::new("Timber")
//!         .sum_of(["basal_area"])
//!         .supply_range(0.0, 20.0)
//!         .threshold_cubic_benefits(5.0))
//!     .ncp(NcpBuilder::new("Aesthetic")
//!         .mean_of_normalized(["canopy_cover", "basal_area"]))
//!     .access("Timber", "Foresters", 0.8)
//!     .access("Timber", "Hikers", 0.1)
//!     .access("Aesthetic", "Foresters", 0.5)
//!     .access("Aesthetic", "Hikers", 1.0)
//!     .priority("Timber", "Foresters", 30.0)
//!     .priority("Aesthetic", "Hikers", 20.0)
//!     .build()?;
//! ```

use crate::error::ConfigError;
use crate::model::{ForestTypeId, GroupId, IndicatorId, NcpId};

use super::ncp_builder::{NcpBuilder, PendingAggregation};
use super::{
    AggregationRule, ForestTypeSpec, IndicatorDistribution, NcpSpec, StudyConfig, StudyMetadata,
};

/// Builder for assembling studies with automatic ID assignment and
/// metadata tracking
pub struct StudyBuilder {
    config: StudyConfig,
    metadata: StudyMetadata,
    next_ncp_id: u16,
    next_group_id: u16,
    next_forest_type_id: u16,
    next_indicator_id: u16,

    // Pending entries (resolved during build)
    pending_ncps: Vec<NcpBuilder>,
    pending_access: Vec<PendingCell>,
    pending_priority: Vec<PendingCell>,
}

#[derive(Debug, Clone)]
struct PendingCell {
    ncp_name: String,
    group_name: String,
    value: f64,
}

impl Default for StudyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyBuilder {
    /// Create a new study builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: StudyConfig::default(),
            metadata: StudyMetadata::new(),
            next_ncp_id: 0,
            next_group_id: 0,
            next_forest_type_id: 0,
            next_indicator_id: 0,
            pending_ncps: Vec::new(),
            pending_access: Vec::new(),
            pending_priority: Vec::new(),
        }
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Register a forest type with its replicate count
    #[must_use]
    pub fn forest_type(mut self, name: impl Into<String>, replicates: usize) -> Self {
        let id = ForestTypeId(self.next_forest_type_id);
        self.next_forest_type_id += 1;
        self.metadata
            .register_forest_type(id, Some(name.into()), None);
        self.config.forest_types.push(ForestTypeSpec {
            forest_type: id,
            replicates,
            indicators: Vec::new(),
        });
        self
    }

    /// Add an indicator distribution to a previously registered forest
    /// type. The indicator name is shared across forest types; its ID is
    /// assigned on first use.
    #[must_use]
    pub fn indicator(
        mut self,
        forest_type: &str,
        name: impl Into<String>,
        mean: f64,
        std_dev: f64,
    ) -> Self {
        let name = name.into();
        let indicator = match self.metadata.indicator_id(&name) {
            Some(id) => id,
            None => {
                let id = IndicatorId(self.next_indicator_id);
                self.next_indicator_id += 1;
                self.metadata.register_indicator(id, Some(name), None);
                id
            }
        };

        if let Some(ft_id) = self.metadata.forest_type_id(forest_type)
            && let Some(spec) = self
                .config
                .forest_types
                .iter_mut()
                .find(|ft| ft.forest_type == ft_id)
        {
            spec.indicators.push(IndicatorDistribution {
                indicator,
                mean,
                std_dev,
            });
        }
        self
    }

    /// Register a stakeholder group
    #[must_use]
    pub fn group(mut self, name: impl Into<String>) -> Self {
        let id = GroupId(self.next_group_id);
        self.next_group_id += 1;
        self.metadata.register_group(id, Some(name.into()), None);
        self.config.groups.push(id);
        self
    }

    /// Add an NCP via its builder
    #[must_use]
    pub fn ncp(mut self, ncp: NcpBuilder) -> Self {
        self.pending_ncps.push(ncp);
        self
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Set the access fraction for one (NCP, group) cell
    #[must_use]
    pub fn access(mut self, ncp: &str, group: &str, fraction: f64) -> Self {
        self.pending_access.push(PendingCell {
            ncp_name: ncp.to_string(),
            group_name: group.to_string(),
            value: fraction,
        });
        self
    }

    /// Set the raw priority points for one (NCP, group) cell
    #[must_use]
    pub fn priority(mut self, ncp: &str, group: &str, points: f64) -> Self {
        self.pending_priority.push(PendingCell {
            ncp_name: ncp.to_string(),
            group_name: group.to_string(),
            value: points,
        });
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Resolve all names, validate, and produce the configuration plus
    /// its metadata
    pub fn build(mut self) -> Result<(StudyConfig, StudyMetadata), ConfigError> {
        // Resolve NCPs first so table cells can reference them
        let pending_ncps = std::mem::take(&mut self.pending_ncps);
        for pending in pending_ncps {
            let id = NcpId(self.next_ncp_id);
            self.next_ncp_id += 1;
            self.metadata
                .register_ncp(id, Some(pending.name.clone()), pending.description.clone());

            let aggregation = match pending.aggregation {
                Some(PendingAggregation::Sum(names)) => {
                    AggregationRule::Sum(self.resolve_indicators(&names)?)
                }
                Some(PendingAggregation::Passthrough(name)) => {
                    AggregationRule::Passthrough(self.resolve_indicator(&name)?)
                }
                Some(PendingAggregation::MeanOfNormalized(names)) => {
                    AggregationRule::MeanOfNormalized(self.resolve_indicators(&names)?)
                }
                None => {
                    return Err(ConfigError::UnknownName {
                        kind: "aggregation for NCP",
                        name: pending.name,
                    });
                }
            };

            self.config.ncps.push(NcpSpec {
                ncp: id,
                aggregation,
                supply_min: pending.supply_min,
                supply_max: pending.supply_max,
                shape: pending.shape,
                threshold: pending.threshold,
            });
        }

        let pending_access = std::mem::take(&mut self.pending_access);
        for cell in pending_access {
            let (ncp, group) = self.resolve_cell(&cell)?;
            self.config.access.insert(ncp, group, cell.value);
        }

        let pending_priority = std::mem::take(&mut self.pending_priority);
        for cell in pending_priority {
            let (ncp, group) = self.resolve_cell(&cell)?;
            self.config.priority.insert(ncp, group, cell.value);
        }

        self.config.validate()?;
        Ok((self.config, self.metadata))
    }

    fn resolve_cell(&self, cell: &PendingCell) -> Result<(NcpId, GroupId), ConfigError> {
        let ncp = self
            .metadata
            .ncp_id(&cell.ncp_name)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "NCP",
                name: cell.ncp_name.clone(),
            })?;
        let group =
            self.metadata
                .group_id(&cell.group_name)
                .ok_or_else(|| ConfigError::UnknownName {
                    kind: "group",
                    name: cell.group_name.clone(),
                })?;
        Ok((ncp, group))
    }

    fn resolve_indicator(&self, name: &str) -> Result<IndicatorId, ConfigError> {
        self.metadata
            .indicator_id(name)
            .ok_or_else(|| ConfigError::UnknownName {
                kind: "indicator",
                name: name.to_string(),
            })
    }

    fn resolve_indicators(&self, names: &[String]) -> Result<Vec<IndicatorId>, ConfigError> {
        names.iter().map(|n| self.resolve_indicator(n)).collect()
    }
}
