//! Criterion benchmarks for the netncp_core pipeline
//!
//! Run with: cargo bench -p netncp_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use netncp_core::config::{NcpBuilder, StudyBuilder, StudyConfig};
use netncp_core::{pipeline, sensitivity};

fn create_study(replicates: usize) -> StudyConfig {
    let (config, _) = StudyBuilder::new()
        .forest_type("Broadleaf", replicates)
        .forest_type("Conifer", replicates)
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
        .expect("bench study should validate");
    config
}

fn bench_pipeline_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    for replicates in [10, 100, 1000] {
        let config = create_study(replicates);
        group.bench_with_input(
            BenchmarkId::from_parameter(replicates),
            &config,
            |b, config| b.iter(|| pipeline::run(black_box(config), 42).unwrap()),
        );
    }
    group.finish();
}

fn bench_sensitivity_analyze(c: &mut Criterion) {
    let config = create_study(50);
    c.bench_function("sensitivity_analyze", |b| {
        b.iter(|| sensitivity::analyze(black_box(&config), 42).unwrap())
    });
}

criterion_group!(benches, bench_pipeline_run, bench_sensitivity_analyze);
criterion_main!(benches);
