//! Value-object tables produced by the pipeline stages
//!
//! Every record type here is recomputed from scratch on each pipeline
//! invocation; nothing is mutated incrementally between runs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ids::{ForestTypeId, GroupId, IndicatorId, NcpId};

/// Raw indicator values for one replicate of one forest type.
///
/// Created once by the indicator generator and immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub values: FxHashMap<IndicatorId, f64>,
}

/// Potential supply per NCP for one replicate of one forest type.
///
/// Derived deterministically from an [`IndicatorRecord`] via the per-NCP
/// aggregation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub supply: FxHashMap<NcpId, f64>,
}

/// One row of the access-filtered cross join: a supply record replicated
/// for a stakeholder group, with the group's access fraction applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RealisedSupply {
    pub ncp: NcpId,
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub group: GroupId,
    pub potential: f64,
    pub realised: f64,
}

/// Benefit/detriment score for one (NCP, forest type, replicate, group)
/// combination.
///
/// `benefit` lies in [-1, 1] for in-range supply; extrapolated values may
/// leave that interval (a warning is collected when they do).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BenefitRecord {
    pub ncp: NcpId,
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub group: GroupId,
    pub realised_supply: f64,
    pub benefit: f64,
}

/// Benefit score multiplied by the group's relative priority for the NCP
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightedScore {
    pub ncp: NcpId,
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub value: f64,
}

/// netNCP for one replicate: weighted scores summed across NCPs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetNcpReplicate {
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    pub replicate: u32,
    pub net_ncp: f64,
}

/// netNCP statistics across replicates for one (group, forest type)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetNcpSummary {
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    /// Mean netNCP across replicates
    pub mean: f64,
    /// Sample standard deviation (n-1 estimator); NaN when a cell has
    /// exactly one replicate
    pub sd: f64,
    /// Number of replicates behind the statistics
    pub replicates: usize,
}
