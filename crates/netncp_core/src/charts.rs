//! Chart-ready data assembly
//!
//! Rendering is a presentation concern living outside this crate; these
//! helpers flatten pipeline and sensitivity results into the series and
//! bar groups the three chart families need, nothing more. Everything is
//! serializable so a front-end can consume it directly.

use serde::Serialize;

use crate::config::StudyConfig;
use crate::model::{ForestTypeId, GroupId, NcpId};
use crate::pipeline::PipelineResult;
use crate::sensitivity::{Perturbation, SensitivityKind, SensitivityResult};
use crate::transform::diagnostic_curve;

/// Supply-benefit curve for one NCP with the observed values overlaid
#[derive(Debug, Clone, Serialize)]
pub struct SupplyBenefitChart {
    pub ncp: NcpId,
    /// The shape evaluated over an evenly spaced diagnostic sequence
    pub curve: Vec<(f64, f64)>,
    /// Observed (realised supply, benefit) points from the run
    pub observed: Vec<(f64, f64)>,
}

/// One chart per configured NCP
#[must_use]
pub fn supply_benefit_charts(
    result: &PipelineResult,
    config: &StudyConfig,
) -> Vec<SupplyBenefitChart> {
    config
        .ncps
        .iter()
        .map(|spec| SupplyBenefitChart {
            ncp: spec.ncp,
            curve: diagnostic_curve(spec.shape, spec.supply_min, spec.supply_max, spec.threshold),
            observed: result
                .benefits
                .iter()
                .filter(|b| b.ncp == spec.ncp)
                .map(|b| (b.realised_supply, b.benefit))
                .collect(),
        })
        .collect()
}

/// One bar of the netNCP mean +/- sd chart
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NetNcpBar {
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    pub mean: f64,
    /// NaN when the cell has a single replicate; the renderer decides
    /// how to surface that
    pub sd: f64,
}

/// Bars for the netNCP summary chart, one per (group, forest type)
#[must_use]
pub fn net_ncp_bars(result: &PipelineResult) -> Vec<NetNcpBar> {
    result
        .summaries
        .iter()
        .map(|s| NetNcpBar {
            group: s.group,
            forest_type: s.forest_type,
            mean: s.mean,
            sd: s.sd,
        })
        .collect()
}

/// One bar of the sensitivity chart, faceted by perturbation kind
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SensitivityBar {
    pub kind: SensitivityKind,
    pub perturbation: Perturbation,
    pub group: GroupId,
    pub forest_type: ForestTypeId,
    pub relative_change: f64,
}

/// Bars for the relative sensitivity chart.
///
/// Baseline rows are skipped; their relative change is 0 by construction.
#[must_use]
pub fn sensitivity_bars(result: &SensitivityResult) -> Vec<SensitivityBar> {
    result
        .relative_changes
        .iter()
        .filter(|c| c.perturbation != Perturbation::Baseline)
        .map(|c| SensitivityBar {
            kind: c.perturbation.kind(),
            perturbation: c.perturbation,
            group: c.group,
            forest_type: c.forest_type,
            relative_change: c.relative_change,
        })
        .collect()
}
