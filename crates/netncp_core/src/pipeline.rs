//! Pipeline orchestration
//!
//! `run` wires the stages together: validate -> generate indicators ->
//! aggregate supply -> access filter -> supply-benefit transform ->
//! priority weighting -> netNCP summary. Everything is recomputed from
//! scratch on each invocation; the result is deterministic for a given
//! (config, seed) pair.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

use crate::access::apply_access;
use crate::config::StudyConfig;
use crate::error::{PipelineError, Result, Warning};
use crate::generator::generate_indicators;
use crate::model::{
    BenefitRecord, ForestTypeId, GroupId, IndicatorRecord, NcpId, NetNcpReplicate, NetNcpSummary,
    SupplyRecord, WeightedScore,
};
use crate::priority::compute_weights;
use crate::report::{net_ncp_per_replicate, summarize, weighted_scores};
use crate::supply::aggregate_supply;
use crate::transform::transform;

/// One group's relative priority for one NCP, in table form
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelativeWeight {
    pub group: GroupId,
    pub ncp: NcpId,
    pub weight: f64,
}

/// A stakeholder group excluded from the run, with the error that
/// excluded it. Other groups are unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedGroup {
    pub group: GroupId,
    pub error: PipelineError,
}

/// Complete results from a single pipeline run.
///
/// Every intermediate table is kept so external presentation layers can
/// render any of them without re-running the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub indicators: Vec<IndicatorRecord>,
    pub supply: Vec<SupplyRecord>,
    pub benefits: Vec<BenefitRecord>,
    pub weights: Vec<RelativeWeight>,
    pub weighted: Vec<WeightedScore>,
    pub replicates: Vec<NetNcpReplicate>,
    pub summaries: Vec<NetNcpSummary>,
    /// Non-fatal conditions collected during the run
    pub warnings: Vec<Warning>,
    /// Groups aborted by a per-group failure (degenerate priorities)
    pub skipped_groups: Vec<SkippedGroup>,
}

impl PipelineResult {
    /// netNCP summary for one (group, forest type) cell
    #[must_use]
    pub fn summary_for(&self, group: GroupId, forest_type: ForestTypeId) -> Option<&NetNcpSummary> {
        self.summaries
            .iter()
            .find(|s| s.group == group && s.forest_type == forest_type)
    }

    /// Relative priority weight for one (group, NCP) cell
    #[must_use]
    pub fn weight_for(&self, group: GroupId, ncp: NcpId) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.group == group && w.ncp == ncp)
            .map(|w| w.weight)
    }

    /// Whether any non-fatal warnings were collected
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether a group was skipped by a per-group failure
    #[must_use]
    pub fn group_was_skipped(&self, group: GroupId) -> bool {
        self.skipped_groups.iter().any(|s| s.group == group)
    }
}

/// Scenario adjustment applied mid-pipeline by the sensitivity analyzer.
///
/// The default adjustment is a no-op (baseline run).
#[derive(Debug, Clone, Copy, Default)]
pub struct Adjustment {
    /// Scale one NCP's entire supply column by this factor after
    /// aggregation, all else held fixed
    pub supply_scale: Option<(NcpId, f64)>,
    /// Scale one group's entire access column by this factor, clamped
    /// back into [0, 1], all else held fixed
    pub access_scale: Option<(GroupId, f64)>,
}

/// Run the full scoring pipeline.
///
/// The seed is the only source of randomness; two runs with the same
/// config and seed produce identical results.
pub fn run(config: &StudyConfig, seed: u64) -> Result<PipelineResult> {
    run_adjusted(config, seed, &Adjustment::default())
}

/// Run the pipeline with a sensitivity adjustment applied.
pub fn run_adjusted(config: &StudyConfig, seed: u64, adjustment: &Adjustment) -> Result<PipelineResult> {
    // Fatal config defects abort here; lenient checks are re-collected as
    // warnings by the transformer so standalone stage use sees them too
    config.validate()?;

    let mut rng = SmallRng::seed_from_u64(seed);
    let indicators = generate_indicators(&mut rng, config)?;

    let mut supply = aggregate_supply(&indicators, config);
    if let Some((ncp, factor)) = adjustment.supply_scale {
        for record in &mut supply {
            if let Some(v) = record.supply.get_mut(&ncp) {
                *v *= factor;
            }
        }
    }

    // Access perturbations act on a scenario copy of the config; the
    // caller's table is never mutated
    let perturbed_config;
    let config = match adjustment.access_scale {
        Some((group, factor)) => {
            let mut c = config.clone();
            c.access = c.access.with_scaled_group(group, factor);
            perturbed_config = c;
            &perturbed_config
        }
        None => config,
    };

    let realised = apply_access(&supply, config)?;

    let mut warnings = Vec::new();
    let benefits = transform(&realised, config, &mut warnings);

    let group_weights = compute_weights(config);
    let weighted = weighted_scores(&benefits, &group_weights);
    let replicates = net_ncp_per_replicate(&weighted);
    let summaries = summarize(&replicates);

    let mut weights: Vec<RelativeWeight> = group_weights
        .weights
        .iter()
        .map(|(&(group, ncp), &weight)| RelativeWeight { group, ncp, weight })
        .collect();
    weights.sort_by_key(|w| (w.group, w.ncp));

    let skipped_groups = group_weights
        .failed
        .into_iter()
        .map(|(group, error)| SkippedGroup { group, error })
        .collect();

    Ok(PipelineResult {
        indicators,
        supply,
        benefits,
        weights,
        weighted,
        replicates,
        summaries,
        warnings,
        skipped_groups,
    })
}
