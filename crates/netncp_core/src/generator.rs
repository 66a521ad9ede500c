//! Indicator generator
//!
//! Synthesizes per-replicate raw indicator values for each forest type by
//! sampling the configured normal distributions. The RNG is supplied by
//! the caller so the whole pipeline is reproducible from a single seed.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use rustc_hash::FxHashMap;

use crate::config::StudyConfig;
use crate::error::{ConfigError, Result};
use crate::model::IndicatorRecord;

/// Generate one `IndicatorRecord` per (forest type, replicate).
///
/// Forest types and indicators are visited in configuration order so the
/// output is deterministic for a given RNG state.
pub fn generate_indicators<R: Rng + ?Sized>(
    rng: &mut R,
    config: &StudyConfig,
) -> Result<Vec<IndicatorRecord>> {
    let mut records = Vec::new();

    for ft in &config.forest_types {
        if ft.replicates == 0 {
            return Err(ConfigError::InvalidReplicateCount {
                forest_type: ft.forest_type,
                replicates: ft.replicates,
            }
            .into());
        }

        // Build the samplers once per forest type, not once per replicate
        let mut samplers = Vec::with_capacity(ft.indicators.len());
        for dist in &ft.indicators {
            let normal = Normal::new(dist.mean, dist.std_dev).map_err(|_| {
                ConfigError::InvalidDistributionParameters {
                    indicator: dist.indicator,
                    mean: dist.mean,
                    std_dev: dist.std_dev,
                    reason: "std_dev must be non-negative and finite",
                }
            })?;
            samplers.push((dist.indicator, normal));
        }

        for replicate in 0..ft.replicates {
            let mut values = FxHashMap::default();
            for (indicator, normal) in &samplers {
                values.insert(*indicator, normal.sample(rng));
            }
            records.push(IndicatorRecord {
                forest_type: ft.forest_type,
                replicate: replicate as u32,
                values,
            });
        }
    }

    Ok(records)
}
