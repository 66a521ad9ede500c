//! Access filter
//!
//! Broadcasts potential supply across every stakeholder group (full cross
//! join) and scales it by the group's access fraction to yield realised
//! supply. An NCP with no access entry for a group is a hard
//! `MissingAccessEntry` error; rows are never dropped silently and access
//! is never assumed to be 1.

use crate::config::StudyConfig;
use crate::error::Result;
use crate::model::{RealisedSupply, SupplyRecord};

/// Apply the access table to every supply record.
///
/// Output length is `supply.len() * groups * ncps`: one row per
/// (supply record, NCP, stakeholder group) combination.
pub fn apply_access(supply: &[SupplyRecord], config: &StudyConfig) -> Result<Vec<RealisedSupply>> {
    let mut rows = Vec::with_capacity(supply.len() * config.groups.len() * config.ncps.len());

    for record in supply {
        for spec in &config.ncps {
            let potential = record.supply.get(&spec.ncp).copied().unwrap_or(0.0);
            for &group in &config.groups {
                let fraction = config.access.fraction(spec.ncp, group)?;
                rows.push(RealisedSupply {
                    ncp: spec.ncp,
                    forest_type: record.forest_type,
                    replicate: record.replicate,
                    group,
                    potential,
                    realised: potential * fraction,
                });
            }
        }
    }

    Ok(rows)
}
