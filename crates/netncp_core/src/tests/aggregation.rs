//! Tests for supply aggregation
//!
//! These tests verify the three aggregation rules and the dataset-global
//! min-max normalization: extrema are collected across the entire
//! dataset, not per forest type, so an outlier anywhere moves every
//! record's normalized supply.

use rustc_hash::FxHashMap;

use crate::config::{AggregationRule, NcpSpec, StudyConfig};
use crate::model::{ForestTypeId, IndicatorId, IndicatorRecord, NcpId, SbShape};
use crate::supply::aggregate_supply;

fn record(forest_type: u16, replicate: u32, values: &[(u16, f64)]) -> IndicatorRecord {
    IndicatorRecord {
        forest_type: ForestTypeId(forest_type),
        replicate,
        values: values
            .iter()
            .map(|&(id, v)| (IndicatorId(id), v))
            .collect::<FxHashMap<_, _>>(),
    }
}

fn config_with_ncp(aggregation: AggregationRule) -> StudyConfig {
    StudyConfig {
        ncps: vec![NcpSpec {
            ncp: NcpId(0),
            aggregation,
            supply_min: 0.0,
            supply_max: 100.0,
            shape: SbShape::LinearBenefits,
            threshold: None,
        }],
        ..StudyConfig::default()
    }
}

#[test]
fn test_sum_rule() {
    let config = config_with_ncp(AggregationRule::Sum(vec![IndicatorId(0), IndicatorId(1)]));
    let records = vec![record(0, 0, &[(0, 3.0), (1, 4.0)])];

    let supply = aggregate_supply(&records, &config);
    assert_eq!(supply.len(), 1);
    assert_eq!(supply[0].supply[&NcpId(0)], 7.0);
}

#[test]
fn test_passthrough_rule() {
    let config = config_with_ncp(AggregationRule::Passthrough(IndicatorId(1)));
    let records = vec![record(0, 0, &[(0, 3.0), (1, 4.0)])];

    let supply = aggregate_supply(&records, &config);
    assert_eq!(supply[0].supply[&NcpId(0)], 4.0);
}

#[test]
fn test_mean_of_normalized_endpoints() {
    let config = config_with_ncp(AggregationRule::MeanOfNormalized(vec![
        IndicatorId(0),
        IndicatorId(1),
    ]));
    // Indicator 0 spans [0, 10], indicator 1 spans [0, 2]
    let records = vec![
        record(0, 0, &[(0, 0.0), (1, 0.0)]),
        record(0, 1, &[(0, 10.0), (1, 2.0)]),
        record(0, 2, &[(0, 5.0), (1, 1.0)]),
    ];

    let supply = aggregate_supply(&records, &config);
    assert_eq!(supply[0].supply[&NcpId(0)], 0.0);
    assert_eq!(supply[1].supply[&NcpId(0)], 1.0);
    assert!((supply[2].supply[&NcpId(0)] - 0.5).abs() < 1e-12);
}

/// Normalization extrema are global: an outlier in one forest type moves
/// the normalized supply of records in the other forest type
#[test]
fn test_normalization_is_global_across_forest_types() {
    let config = config_with_ncp(AggregationRule::MeanOfNormalized(vec![IndicatorId(0)]));

    let base = vec![
        record(0, 0, &[(0, 0.0)]),
        record(0, 1, &[(0, 10.0)]),
        record(1, 0, &[(0, 5.0)]),
    ];
    let supply = aggregate_supply(&base, &config);
    let conifer_without_outlier = supply[2].supply[&NcpId(0)];
    assert!((conifer_without_outlier - 0.5).abs() < 1e-12);

    // Same records plus a broadleaf outlier at 90: the conifer record's
    // value is unchanged but its score drops
    let mut with_outlier = base.clone();
    with_outlier.push(record(0, 2, &[(0, 90.0)]));
    let supply = aggregate_supply(&with_outlier, &config);
    let conifer_with_outlier = supply[2].supply[&NcpId(0)];
    assert!((conifer_with_outlier - 5.0 / 90.0).abs() < 1e-12);
    assert!(conifer_with_outlier < conifer_without_outlier);
}

/// Records missing an aggregated indicator contribute 0 for it
#[test]
fn test_missing_indicator_counts_as_zero() {
    let config = config_with_ncp(AggregationRule::Sum(vec![IndicatorId(0), IndicatorId(7)]));
    let records = vec![record(0, 0, &[(0, 3.0)])];

    let supply = aggregate_supply(&records, &config);
    assert_eq!(supply[0].supply[&NcpId(0)], 3.0);
}
