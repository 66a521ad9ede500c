//! Sensitivity analyzer
//!
//! Re-runs the full pipeline under a fixed enumerated perturbation plan:
//! one baseline, then +/-10% on each NCP's supply column and each
//! stakeholder group's access column. Every scenario uses the same seed,
//! so the only difference between runs is the perturbation itself.
//! Post-processing joins each scenario against the baseline on
//! (group, forest type) and reports the relative change in mean netNCP.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::StudyConfig;
use crate::error::{PipelineError, Result};
use crate::model::{ForestTypeId, GroupId, NcpId, NetNcpSummary};
use crate::pipeline::{Adjustment, run_adjusted};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default perturbation magnitude (+/-10%)
pub const DEFAULT_CHANGE: f64 = 0.10;

/// One entry of the perturbation plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Perturbation {
    /// Unperturbed reference run
    Baseline,
    /// Scale one NCP's entire supply column by (1 + change)
    Supply { ncp: NcpId, change: f64 },
    /// Scale one group's entire access column by (1 + change), clamped
    /// back into [0, 1]
    Access { group: GroupId, change: f64 },
}

/// Coarse perturbation category, used to facet sensitivity charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensitivityKind {
    Baseline,
    SupplyChange,
    AccessChange,
}

impl fmt::Display for SensitivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityKind::Baseline => write!(f, "Baseline"),
            SensitivityKind::SupplyChange => write!(f, "Change in supply"),
            SensitivityKind::AccessChange => write!(f, "Change in access"),
        }
    }
}

impl Perturbation {
    /// The category this perturbation belongs to
    #[must_use]
    pub fn kind(&self) -> SensitivityKind {
        match self {
            Perturbation::Baseline => SensitivityKind::Baseline,
            Perturbation::Supply { .. } => SensitivityKind::SupplyChange,
            Perturbation::Access { .. } => SensitivityKind::AccessChange,
        }
    }

    /// The signed change magnitude (0 for the baseline)
    #[must_use]
    pub fn change(&self) -> f64 {
        match self {
            Perturbation::Baseline => 0.0,
            Perturbation::Supply { change, .. } | Perturbation::Access { change, .. } => *change,
        }
    }

    fn adjustment(&self) -> Adjustment {
        match *self {
            Perturbation::Baseline => Adjustment::default(),
            Perturbation::Supply { ncp, change } => Adjustment {
                supply_scale: Some((ncp, 1.0 + change)),
                ..Adjustment::default()
            },
            Perturbation::Access { group, change } => Adjustment {
                access_scale: Some((group, 1.0 + change)),
                ..Adjustment::default()
            },
        }
    }
}

/// Build the full perturbation plan for a configuration.
///
/// Plan size is `1 + 2 * ncps + 2 * groups`: the baseline first, then
/// {+change, -change} for every NCP and every stakeholder group, in
/// configuration order.
#[must_use]
pub fn perturbation_plan(config: &StudyConfig, change: f64) -> Vec<Perturbation> {
    let mut plan = Vec::with_capacity(1 + 2 * config.ncps.len() + 2 * config.groups.len());
    plan.push(Perturbation::Baseline);
    for spec in &config.ncps {
        for direction in [change, -change] {
            plan.push(Perturbation::Supply {
                ncp: spec.ncp,
                change: direction,
            });
        }
    }
    for &group in &config.groups {
        for direction in [change, -change] {
            plan.push(Perturbation::Access {
                group,
                change: direction,
            });
        }
    }
    plan
}

/// netNCP summary table for one perturbation scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub perturbation: Perturbation,
    pub summaries: Vec<NetNcpSummary>,
}

/// Relative change of mean netNCP against the baseline for one
/// (scenario, group, forest type) row
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelativeChange {
    pub perturbation: Perturbation,
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    pub baseline_mean: f64,
    pub perturbed_mean: f64,
    /// `(perturbed_mean - baseline_mean) / baseline_mean`; exactly 0 for
    /// the baseline scenario's own rows
    pub relative_change: f64,
}

/// Full output of a sensitivity analysis
#[derive(Debug, Clone, Serialize)]
pub struct SensitivityResult {
    pub scenarios: Vec<ScenarioOutcome>,
    pub relative_changes: Vec<RelativeChange>,
}

impl SensitivityResult {
    /// Relative changes for one perturbation
    pub fn changes_for(&self, perturbation: Perturbation) -> impl Iterator<Item = &RelativeChange> {
        self.relative_changes
            .iter()
            .filter(move |c| c.perturbation == perturbation)
    }

    /// The baseline scenario's summary table
    #[must_use]
    pub fn baseline(&self) -> Option<&ScenarioOutcome> {
        self.scenarios
            .iter()
            .find(|s| s.perturbation == Perturbation::Baseline)
    }
}

/// Run the sensitivity analysis with the default +/-10% plan
pub fn analyze(config: &StudyConfig, seed: u64) -> Result<SensitivityResult> {
    analyze_with_change(config, seed, DEFAULT_CHANGE)
}

/// Run the sensitivity analysis with a custom change magnitude.
///
/// All scenarios run with the same seed; with the `parallel` feature the
/// scenario evaluations run on the rayon thread pool.
pub fn analyze_with_change(
    config: &StudyConfig,
    seed: u64,
    change: f64,
) -> Result<SensitivityResult> {
    let plan = perturbation_plan(config, change);

    #[cfg(feature = "parallel")]
    let outcomes: Result<Vec<ScenarioOutcome>> = plan
        .par_iter()
        .map(|p| {
            let result = run_adjusted(config, seed, &p.adjustment())?;
            Ok(ScenarioOutcome {
                perturbation: *p,
                summaries: result.summaries,
            })
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let outcomes: Result<Vec<ScenarioOutcome>> = plan
        .iter()
        .map(|p| {
            let result = run_adjusted(config, seed, &p.adjustment())?;
            Ok(ScenarioOutcome {
                perturbation: *p,
                summaries: result.summaries,
            })
        })
        .collect();

    let scenarios = outcomes?;
    let relative_changes = relative_changes(&scenarios)?;

    Ok(SensitivityResult {
        scenarios,
        relative_changes,
    })
}

/// Join every scenario row against its baseline row on
/// (group, forest type) and compute the relative change.
fn relative_changes(scenarios: &[ScenarioOutcome]) -> Result<Vec<RelativeChange>> {
    let baseline = scenarios
        .iter()
        .find(|s| s.perturbation == Perturbation::Baseline)
        .map(|s| s.summaries.as_slice())
        .unwrap_or_default();

    let baseline_mean = |group: GroupId, forest_type: ForestTypeId| {
        baseline
            .iter()
            .find(|b| b.group == group && b.forest_type == forest_type)
            .map(|b| b.mean)
    };

    let mut rows = Vec::new();
    for scenario in scenarios {
        for summary in &scenario.summaries {
            let Some(base) = baseline_mean(summary.group, summary.forest_type) else {
                continue;
            };
            if base == 0.0 {
                return Err(PipelineError::DegenerateBaseline {
                    group: summary.group,
                    forest_type: summary.forest_type,
                });
            }
            rows.push(RelativeChange {
                perturbation: scenario.perturbation,
                group: summary.group,
                forest_type: summary.forest_type,
                baseline_mean: base,
                perturbed_mean: summary.mean,
                relative_change: (summary.mean - base) / base,
            });
        }
    }
    Ok(rows)
}
