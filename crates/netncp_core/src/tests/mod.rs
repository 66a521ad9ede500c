//! Integration tests for the netNCP scoring pipeline
//!
//! Tests are organized by topic:
//! - `shapes` - Supply-benefit shape functions and their boundary values
//! - `aggregation` - Supply aggregation rules and global normalization
//! - `access` - Access filtering and missing-entry handling
//! - `priorities` - Priority normalization and degenerate groups
//! - `pipeline` - End-to-end runs, determinism, result structure
//! - `sensitivity` - Perturbation plan and relative-change reporting

mod aggregation;
mod pipeline;
mod priorities;

use crate::config::{NcpBuilder, StudyBuilder, StudyConfig, StudyMetadata};

/// Small two-forest, three-group study used across the test modules
pub(crate) fn demo_study() -> (StudyConfig, StudyMetadata) {
    StudyBuilder::new()
        .forest_type("Broadleaf", 6)
        .forest_type("Conifer", 6)
        .indicator("Broadleaf", "basal_area", 12.0, 2.0)
        .indicator("Conifer", "basal_area", 16.0, 3.0)
        .indicator("Broadleaf", "canopy_cover", 0.7, 0.05)
        .indicator("Conifer", "canopy_cover", 0.5, 0.05)
        .indicator("Broadleaf", "deadwood", 5.0, 1.0)
        .indicator("Conifer", "deadwood", 3.0, 1.0)
        .group("Foresters")
        .group("Hikers")
        .group("Conservationists")
        .ncp(
            NcpBuilder::new("Timber")
                .sum_of(["basal_area"])
                .supply_range(0.0, 40.0)
                .threshold_cubic_benefits(5.0),
        )
        .ncp(
            NcpBuilder::new("Aesthetic")
                .mean_of_normalized(["canopy_cover", "deadwood"])
                .supply_range(0.0, 1.0)
                .linear_benefits(),
        )
        .ncp(
            NcpBuilder::new("TickRisk")
                .passthrough("deadwood")
                .supply_range(0.0, 10.0)
                .linear_detriments(),
        )
        .access("Timber", "Foresters", 1.0)
        .access("Timber", "Hikers", 0.1)
        .access("Timber", "Conservationists", 0.2)
        .access("Aesthetic", "Foresters", 0.5)
        .access("Aesthetic", "Hikers", 1.0)
        .access("Aesthetic", "Conservationists", 1.0)
        .access("TickRisk", "Foresters", 0.8)
        .access("TickRisk", "Hikers", 1.0)
        .access("TickRisk", "Conservationists", 0.6)
        .priority("Timber", "Foresters", 30.0)
        .priority("Aesthetic", "Foresters", 5.0)
        .priority("TickRisk", "Foresters", 5.0)
        .priority("Timber", "Hikers", 2.0)
        .priority("Aesthetic", "Hikers", 20.0)
        .priority("TickRisk", "Hikers", 10.0)
        .priority("Timber", "Conservationists", 5.0)
        .priority("Aesthetic", "Conservationists", 15.0)
        .priority("TickRisk", "Conservationists", 2.0)
        .build()
        .expect("demo study should validate")
}
