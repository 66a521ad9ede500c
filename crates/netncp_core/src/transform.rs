//! Supply-benefit transformer
//!
//! Maps realised supply to a benefit/detriment score through each NCP's
//! configured [`SbShape`]. Supply outside the declared range is
//! extrapolated with a collected `RangeViolation` warning rather than a
//! hard failure; threshold misplacement likewise warns and proceeds.

use rustc_hash::FxHashMap;

use crate::config::{NcpSpec, StudyConfig};
use crate::error::Warning;
use crate::model::{BenefitRecord, NcpId, RealisedSupply, SbShape};

/// Number of points in a diagnostic curve when no observed supply exists
pub const DIAGNOSTIC_CURVE_POINTS: usize = 50;

/// Transform realised supply rows into benefit records.
///
/// Shape-level warnings (threshold placement) are emitted once per NCP;
/// range violations once per offending row.
pub fn transform(
    realised: &[RealisedSupply],
    config: &StudyConfig,
    warnings: &mut Vec<Warning>,
) -> Vec<BenefitRecord> {
    let specs: FxHashMap<NcpId, &NcpSpec> = config.ncps.iter().map(|s| (s.ncp, s)).collect();

    for spec in &config.ncps {
        if spec.shape.needs_threshold()
            && let Some(t) = spec.threshold
            && (t <= spec.supply_min || t >= spec.supply_max)
        {
            warnings.push(Warning::ThresholdOutsideRange {
                ncp: spec.ncp,
                threshold: t,
                min: spec.supply_min,
                max: spec.supply_max,
            });
        }
    }

    realised
        .iter()
        .map(|row| {
            // Every realised row's NCP comes from the config, so the
            // lookup cannot miss
            let spec = specs[&row.ncp];
            let benefit = score(spec, row.realised, warnings);
            BenefitRecord {
                ncp: row.ncp,
                forest_type: row.forest_type,
                replicate: row.replicate,
                group: row.group,
                realised_supply: row.realised,
                benefit,
            }
        })
        .collect()
}

/// Score a single realised supply value against an NCP spec, collecting a
/// range-violation warning when the value lies outside [min, max].
pub fn score(spec: &NcpSpec, realised: f64, warnings: &mut Vec<Warning>) -> f64 {
    if realised < spec.supply_min || realised > spec.supply_max {
        warnings.push(Warning::RangeViolation {
            ncp: spec.ncp,
            supply: realised,
            min: spec.supply_min,
            max: spec.supply_max,
        });
    }
    spec.shape
        .benefit(realised, spec.supply_min, spec.supply_max, spec.threshold)
}

/// Evenly spaced diagnostic sequence across the declared supply range,
/// scored through the shape. Used to visualize a shape in isolation when
/// no observed supply values are available, and as the curve layer of the
/// supply-benefit charts.
#[must_use]
pub fn diagnostic_curve(
    shape: SbShape,
    supply_min: f64,
    supply_max: f64,
    threshold: Option<f64>,
) -> Vec<(f64, f64)> {
    let step = (supply_max - supply_min) / (DIAGNOSTIC_CURVE_POINTS - 1) as f64;
    (0..DIAGNOSTIC_CURVE_POINTS)
        .map(|i| {
            let s = supply_min + step * i as f64;
            (s, shape.benefit(s, supply_min, supply_max, threshold))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_curve_endpoints() {
        let curve = diagnostic_curve(SbShape::LinearBenefits, 0.0, 10.0, None);
        assert_eq!(curve.len(), DIAGNOSTIC_CURVE_POINTS);
        assert_eq!(curve[0], (0.0, 0.0));
        let (last_s, last_b) = curve[DIAGNOSTIC_CURVE_POINTS - 1];
        assert!((last_s - 10.0).abs() < 1e-12);
        assert!((last_b - 1.0).abs() < 1e-12);
    }
}
