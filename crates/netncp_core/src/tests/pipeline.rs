//! End-to-end pipeline tests
//!
//! These tests verify reproducibility under a fixed seed, configuration
//! validation, the result structure, warning collection, and the
//! chart-data helpers.

use crate::charts::{net_ncp_bars, sensitivity_bars, supply_benefit_charts};
use crate::config::{NcpBuilder, StudyBuilder};
use crate::error::{ConfigError, Warning};
use crate::model::NcpId;
use crate::pipeline;
use crate::sensitivity;
use crate::tests::demo_study;

/// Two runs with the same seed produce identical tables
#[test]
fn test_run_is_deterministic_for_a_seed() {
    let (config, _) = demo_study();

    let a = pipeline::run(&config, 42).unwrap();
    let b = pipeline::run(&config, 42).unwrap();

    assert_eq!(a.summaries.len(), b.summaries.len());
    for (sa, sb) in a.summaries.iter().zip(&b.summaries) {
        assert_eq!(sa.group, sb.group);
        assert_eq!(sa.forest_type, sb.forest_type);
        assert_eq!(sa.mean, sb.mean);
        assert_eq!(sa.sd, sb.sd);
    }
}

#[test]
fn test_different_seeds_differ() {
    let (config, _) = demo_study();

    let a = pipeline::run(&config, 1).unwrap();
    let b = pipeline::run(&config, 2).unwrap();

    let differs = a
        .summaries
        .iter()
        .zip(&b.summaries)
        .any(|(sa, sb)| sa.mean != sb.mean);
    assert!(differs);
}

#[test]
fn test_result_dimensions() {
    let (config, _) = demo_study();
    let result = pipeline::run(&config, 5).unwrap();

    assert_eq!(result.indicators.len(), 12);
    assert_eq!(result.supply.len(), 12);
    // 3 groups x 2 forest types
    assert_eq!(result.summaries.len(), 6);
    // 3 groups x 3 NCPs
    assert_eq!(result.weights.len(), 9);
    for s in &result.summaries {
        assert_eq!(s.replicates, 6);
        assert!(s.sd.is_finite());
    }
}

/// A single replicate yields an explicit NaN standard deviation
#[test]
fn test_single_replicate_sd_is_nan() {
    let (config, metadata) = StudyBuilder::new()
        .forest_type("Broadleaf", 1)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(0.0, 40.0)
                .linear_benefits(),
        )
        .access("Timber", "Foresters", 1.0)
        .priority("Timber", "Foresters", 10.0)
        .build()
        .unwrap();

    let result = pipeline::run(&config, 3).unwrap();
    let group = metadata.group_id("Foresters").unwrap();
    let ft = metadata.forest_type_id("Broadleaf").unwrap();

    let summary = result.summary_for(group, ft).unwrap();
    assert_eq!(summary.replicates, 1);
    assert!(summary.sd.is_nan());
    assert!(summary.mean.is_finite());
}

#[test]
fn test_builder_assigns_ids_and_names() {
    let (config, metadata) = demo_study();

    assert_eq!(metadata.ncp_id("Timber"), Some(NcpId(0)));
    assert_eq!(metadata.ncp_name(NcpId(0)), Some("Timber"));
    assert_eq!(config.ncps.len(), 3);
    assert_eq!(config.groups.len(), 3);
    assert!(metadata.group_id("Poachers").is_none());
}

#[test]
fn test_validate_rejects_zero_replicates() {
    let err = StudyBuilder::new()
        .forest_type("Broadleaf", 0)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(NcpBuilder::new("Timber").sum_of(["basal_area"]))
        .access("Timber", "Foresters", 1.0)
        .priority("Timber", "Foresters", 1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidReplicateCount { .. }));
}

#[test]
fn test_validate_rejects_inverted_supply_range() {
    let err = StudyBuilder::new()
        .forest_type("Broadleaf", 2)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(40.0, 0.0),
        )
        .access("Timber", "Foresters", 1.0)
        .priority("Timber", "Foresters", 1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSupplyRange { .. }));
}

#[test]
fn test_validate_rejects_out_of_range_access() {
    let err = StudyBuilder::new()
        .forest_type("Broadleaf", 2)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(NcpBuilder::new("Timber").sum_of(["basal_area"]).supply_range(0.0, 40.0))
        .access("Timber", "Foresters", 1.5)
        .priority("Timber", "Foresters", 1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAccessFraction { .. }));
}

#[test]
fn test_validate_rejects_missing_threshold() {
    let err = StudyBuilder::new()
        .forest_type("Broadleaf", 2)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(0.0, 40.0)
                .shape(crate::model::SbShape::ThresholdCubicBenefits),
        )
        .access("Timber", "Foresters", 1.0)
        .priority("Timber", "Foresters", 1.0)
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingThreshold { .. }));
}

/// A threshold outside (min, max) warns on the run but does not fail
#[test]
fn test_misplaced_threshold_warns_but_runs() {
    let (config, _) = StudyBuilder::new()
        .forest_type("Broadleaf", 2)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(0.0, 40.0)
                .threshold_cubic_benefits(45.0),
        )
        .access("Timber", "Foresters", 1.0)
        .priority("Timber", "Foresters", 1.0)
        .build()
        .unwrap();

    let result = pipeline::run(&config, 9).unwrap();
    assert!(result
        .warnings
        .iter()
        .any(|w| matches!(w, Warning::ThresholdOutsideRange { threshold, .. } if *threshold == 45.0)));
}

/// Results serialize to JSON for external presentation layers
#[test]
fn test_result_serializes_to_json() {
    let (config, _) = demo_study();
    let result = pipeline::run(&config, 42).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"summaries\""));
    assert!(json.contains("\"warnings\""));
}

#[test]
fn test_chart_data_helpers() {
    let (config, _) = demo_study();
    let result = pipeline::run(&config, 42).unwrap();

    let curves = supply_benefit_charts(&result, &config);
    assert_eq!(curves.len(), 3);
    for chart in &curves {
        assert_eq!(chart.curve.len(), 50);
        // 12 supply records x 3 groups observed per NCP
        assert_eq!(chart.observed.len(), 36);
    }

    let bars = net_ncp_bars(&result);
    assert_eq!(bars.len(), result.summaries.len());

    let sens = sensitivity::analyze(&config, 42).unwrap();
    let sens_bars = sensitivity_bars(&sens);
    // Every non-baseline scenario contributes one bar per summary cell
    assert_eq!(sens_bars.len(), (sens.scenarios.len() - 1) * 6);
}
