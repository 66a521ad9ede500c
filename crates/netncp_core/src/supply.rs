//! Supply aggregator
//!
//! Reduces raw indicator records into one potential supply value per NCP
//! per replicate. `MeanOfNormalized` aggregation is an explicit two-pass
//! computation: pass 1 collects each indicator's min/max over the entire
//! dataset, pass 2 rescales and averages. The extrema are global across
//! all forest types and replicates, so supply under that rule is
//! dataset-relative rather than absolute.

use rustc_hash::FxHashMap;

use crate::config::{AggregationRule, NcpSpec, StudyConfig};
use crate::model::{IndicatorId, IndicatorRecord, SupplyRecord};

/// Observed min/max of one indicator across the whole dataset
#[derive(Debug, Clone, Copy)]
struct Extrema {
    min: f64,
    max: f64,
}

impl Extrema {
    /// Rescale a value to [0, 1] against these extrema.
    ///
    /// When every observation is identical (max == min) the rescaled
    /// value is pinned to the midpoint 0.5 instead of dividing by zero.
    fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            0.5
        }
    }
}

/// Pass 1: observed extrema per indicator across all records
fn collect_extrema(records: &[IndicatorRecord]) -> FxHashMap<IndicatorId, Extrema> {
    let mut extrema: FxHashMap<IndicatorId, Extrema> = FxHashMap::default();
    for record in records {
        for (&indicator, &value) in &record.values {
            extrema
                .entry(indicator)
                .and_modify(|e| {
                    e.min = e.min.min(value);
                    e.max = e.max.max(value);
                })
                .or_insert(Extrema {
                    min: value,
                    max: value,
                });
        }
    }
    extrema
}

fn apply_rule(
    spec: &NcpSpec,
    record: &IndicatorRecord,
    extrema: &FxHashMap<IndicatorId, Extrema>,
) -> f64 {
    let value_of = |id: IndicatorId| record.values.get(&id).copied().unwrap_or(0.0);

    match &spec.aggregation {
        AggregationRule::Sum(ids) => ids.iter().map(|&id| value_of(id)).sum(),
        AggregationRule::Passthrough(id) => value_of(*id),
        AggregationRule::MeanOfNormalized(ids) => {
            if ids.is_empty() {
                return 0.0;
            }
            let total: f64 = ids
                .iter()
                .map(|id| match extrema.get(id) {
                    Some(e) => e.normalize(value_of(*id)),
                    None => 0.0,
                })
                .sum();
            total / ids.len() as f64
        }
    }
}

/// Derive potential supply per NCP for every indicator record.
///
/// Deterministic: no randomness, pure function of its inputs.
pub fn aggregate_supply(records: &[IndicatorRecord], config: &StudyConfig) -> Vec<SupplyRecord> {
    let extrema = collect_extrema(records);

    records
        .iter()
        .map(|record| {
            let supply = config
                .ncps
                .iter()
                .map(|spec| (spec.ncp, apply_rule(spec, record, &extrema)))
                .collect();
            SupplyRecord {
                forest_type: record.forest_type,
                replicate: record.replicate,
                supply,
            }
        })
        .collect()
}
