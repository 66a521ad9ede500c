//! Priority weighter
//!
//! Normalizes each stakeholder group's raw priority points into relative
//! weights summing to 1 across NCPs. A group whose points sum to zero is
//! a `DegeneratePriority` failure for that group only; the caller records
//! the failure and continues with the remaining groups.

use rustc_hash::FxHashMap;

use crate::config::StudyConfig;
use crate::error::PipelineError;
use crate::model::{GroupId, NcpId};

/// Relative priority weights per group, with per-group failures kept
/// separate so one degenerate group does not abort the others.
#[derive(Debug, Default)]
pub struct GroupWeights {
    /// (group, NCP) -> relative priority for groups that normalized
    pub weights: FxHashMap<(GroupId, NcpId), f64>,
    /// Groups excluded from the run, with the error that excluded them
    pub failed: Vec<(GroupId, PipelineError)>,
}

impl GroupWeights {
    /// Relative weight for one (group, NCP) cell; absent cells (failed
    /// groups) yield None
    #[must_use]
    pub fn weight(&self, group: GroupId, ncp: NcpId) -> Option<f64> {
        self.weights.get(&(group, ncp)).copied()
    }

    /// Whether a group survived normalization
    #[must_use]
    pub fn contains_group(&self, group: GroupId) -> bool {
        !self.failed.iter().any(|(g, _)| *g == group)
    }
}

/// Normalize the priority table group by group
#[must_use]
pub fn compute_weights(config: &StudyConfig) -> GroupWeights {
    let ncp_ids = config.ncp_ids();
    let mut out = GroupWeights::default();

    for &group in &config.groups {
        match config.priority.relative_weights(group, &ncp_ids) {
            Ok(weights) => {
                for (ncp, w) in weights {
                    out.weights.insert((group, ncp), w);
                }
            }
            Err(e) => out.failed.push((group, e)),
        }
    }

    out
}
