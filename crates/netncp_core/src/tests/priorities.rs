//! Tests for priority normalization
//!
//! These tests verify that relative weights sum to 1 per group, that a
//! zero-sum group fails with `DegeneratePriority`, and that such a
//! failure aborts only the affected group.

use crate::config::{NcpBuilder, StudyBuilder};
use crate::error::PipelineError;
use crate::pipeline;
use crate::priority::compute_weights;
use crate::tests::demo_study;

/// Relative priorities for every surviving group sum to 1
#[test]
fn test_weights_sum_to_one_per_group() {
    let (config, _) = demo_study();
    let weights = compute_weights(&config);
    assert!(weights.failed.is_empty());

    for &group in &config.groups {
        let total: f64 = config
            .ncp_ids()
            .iter()
            .map(|&ncp| weights.weight(group, ncp).unwrap())
            .sum();
        assert!(
            (total - 1.0).abs() < 1e-12,
            "weights for group {group:?} sum to {total}"
        );
    }
}

/// Weights are proportional to raw points within a group
#[test]
fn test_weights_are_proportional() {
    let (config, metadata) = demo_study();
    let weights = compute_weights(&config);

    let foresters = metadata.group_id("Foresters").unwrap();
    let timber = metadata.ncp_id("Timber").unwrap();
    // Foresters: 30 of 40 points on Timber
    assert!((weights.weight(foresters, timber).unwrap() - 0.75).abs() < 1e-12);
}

/// A group whose points sum to zero is skipped; the other groups run to
/// completion with untouched results
#[test]
fn test_zero_sum_group_aborts_only_that_group() {
    let (config, metadata) = StudyBuilder::new()
        .forest_type("Broadleaf", 4)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .group("Foresters")
        .group("Hikers")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(0.0, 40.0)
                .linear_benefits(),
        )
        .access("Timber", "Foresters", 1.0)
        .access("Timber", "Hikers", 0.5)
        .priority("Timber", "Foresters", 0.0)
        .priority("Timber", "Hikers", 10.0)
        .build()
        .unwrap();

    let foresters = metadata.group_id("Foresters").unwrap();
    let hikers = metadata.group_id("Hikers").unwrap();
    let broadleaf = metadata.forest_type_id("Broadleaf").unwrap();

    let result = pipeline::run(&config, 11).unwrap();

    assert!(result.group_was_skipped(foresters));
    assert_eq!(result.skipped_groups.len(), 1);
    assert!(matches!(
        result.skipped_groups[0].error,
        PipelineError::DegeneratePriority { group } if group == foresters
    ));

    // Hikers are unaffected
    assert!(!result.group_was_skipped(hikers));
    assert!(result.summary_for(hikers, broadleaf).is_some());
    assert!(result.summary_for(foresters, broadleaf).is_none());
}
