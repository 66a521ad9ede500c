//! Aggregator/reporter
//!
//! Multiplies benefit scores by relative priorities, sums them across
//! NCPs into a per-replicate netNCP, and reduces replicates to mean and
//! sample standard deviation per (group, forest type).

use rustc_hash::FxHashMap;

use crate::model::{
    BenefitRecord, ForestTypeId, GroupId, NetNcpReplicate, NetNcpSummary, WeightedScore,
};
use crate::priority::GroupWeights;

/// Benefit x relative priority for every benefit record whose group
/// survived priority normalization
#[must_use]
pub fn weighted_scores(benefits: &[BenefitRecord], weights: &GroupWeights) -> Vec<WeightedScore> {
    benefits
        .iter()
        .filter_map(|b| {
            weights.weight(b.group, b.ncp).map(|w| WeightedScore {
                ncp: b.ncp,
                group: b.group,
                forest_type: b.forest_type,
                replicate: b.replicate,
                value: b.benefit * w,
            })
        })
        .collect()
}

/// Sum weighted scores across NCPs per (group, forest type, replicate)
#[must_use]
pub fn net_ncp_per_replicate(scores: &[WeightedScore]) -> Vec<NetNcpReplicate> {
    let mut sums: FxHashMap<(GroupId, ForestTypeId, u32), f64> = FxHashMap::default();
    for s in scores {
        *sums.entry((s.group, s.forest_type, s.replicate)).or_insert(0.0) += s.value;
    }

    let mut rows: Vec<NetNcpReplicate> = sums
        .into_iter()
        .map(|((group, forest_type, replicate), net_ncp)| NetNcpReplicate {
            group,
            forest_type,
            replicate,
            net_ncp,
        })
        .collect();
    // Stable output order regardless of hash map iteration
    rows.sort_by_key(|r| (r.group, r.forest_type, r.replicate));
    rows
}

/// Reduce per-replicate netNCP to mean and sample standard deviation per
/// (group, forest type).
///
/// The standard deviation uses the unbiased (n-1) estimator and is NaN
/// when a cell holds exactly one replicate; the caller surfaces that
/// explicitly rather than substituting a default.
#[must_use]
pub fn summarize(replicates: &[NetNcpReplicate]) -> Vec<NetNcpSummary> {
    let mut cells: FxHashMap<(GroupId, ForestTypeId), Vec<f64>> = FxHashMap::default();
    for r in replicates {
        cells
            .entry((r.group, r.forest_type))
            .or_default()
            .push(r.net_ncp);
    }

    let mut summaries: Vec<NetNcpSummary> = cells
        .into_iter()
        .map(|((group, forest_type), values)| {
            let (mean, sd) = mean_and_sample_sd(&values);
            NetNcpSummary {
                group,
                forest_type,
                mean,
                sd,
                replicates: values.len(),
            }
        })
        .collect();
    summaries.sort_by_key(|s| (s.group, s.forest_type));
    summaries
}

/// Mean and sample (n-1) standard deviation; sd is NaN for n < 2
fn mean_and_sample_sd(values: &[f64]) -> (f64, f64) {
    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    if n < 2 {
        return (mean, f64::NAN);
    }
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_sample_sd() {
        let (mean, sd) = mean_and_sample_sd(&[1.0, 2.0, 3.0]);
        assert!((mean - 2.0).abs() < 1e-12);
        assert!((sd - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_sd_is_nan() {
        let (mean, sd) = mean_and_sample_sd(&[4.2]);
        assert_eq!(mean, 4.2);
        assert!(sd.is_nan());
    }
}
