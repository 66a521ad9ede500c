//! Fluent builder for one NCP category
//!
//! Collects the aggregation rule, supply range and supply-benefit shape
//! for a single NCP; indicator names are resolved to IDs when the parent
//! `StudyBuilder` builds the configuration.

use crate::model::SbShape;

/// How indicator names reduce to supply, before name resolution
#[derive(Debug, Clone)]
pub(crate) enum PendingAggregation {
    Sum(Vec<String>),
    Passthrough(String),
    MeanOfNormalized(Vec<String>),
}

/// Builder for a single NCP category
#[derive(Debug, Clone)]
pub struct NcpBuilder {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) aggregation: Option<PendingAggregation>,
    pub(crate) supply_min: f64,
    pub(crate) supply_max: f64,
    pub(crate) shape: SbShape,
    pub(crate) threshold: Option<f64>,
}

impl NcpBuilder {
    /// Start building an NCP with the given name.
    ///
    /// Defaults: supply range [0, 1], `LinearBenefits`, no threshold.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            aggregation: None,
            supply_min: 0.0,
            supply_max: 1.0,
            shape: SbShape::LinearBenefits,
            threshold: None,
        }
    }

    /// Attach a human-readable description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Aggregate supply as the sum of the named indicators
    #[must_use]
    pub fn sum_of<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregation = Some(PendingAggregation::Sum(
            indicators.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Pass a single indicator through as supply, unchanged
    #[must_use]
    pub fn passthrough(mut self, indicator: impl Into<String>) -> Self {
        self.aggregation = Some(PendingAggregation::Passthrough(indicator.into()));
        self
    }

    /// Aggregate supply as the mean of the named indicators after each is
    /// min-max normalized against the whole dataset
    #[must_use]
    pub fn mean_of_normalized<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aggregation = Some(PendingAggregation::MeanOfNormalized(
            indicators.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the declared supply range (must satisfy min < max)
    #[must_use]
    pub fn supply_range(mut self, min: f64, max: f64) -> Self {
        self.supply_min = min;
        self.supply_max = max;
        self
    }

    /// Use an explicit shape
    #[must_use]
    pub fn shape(mut self, shape: SbShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the threshold for a threshold shape
    #[must_use]
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Linearly increasing benefit: 0 at min, 1 at max
    #[must_use]
    pub fn linear_benefits(self) -> Self {
        self.shape(SbShape::LinearBenefits)
    }

    /// Linearly increasing detriment: 0 at min, -1 at max
    #[must_use]
    pub fn linear_detriments(self) -> Self {
        self.shape(SbShape::LinearDetriments)
    }

    /// Cubic benefit above a threshold, zero below it
    #[must_use]
    pub fn threshold_cubic_benefits(self, threshold: f64) -> Self {
        self.shape(SbShape::ThresholdCubicBenefits).threshold(threshold)
    }

    /// Linear score anchored at a threshold (negative below, positive above)
    #[must_use]
    pub fn detriments_threshold_benefits(self, threshold: f64) -> Self {
        self.shape(SbShape::DetrimentsThresholdBenefits)
            .threshold(threshold)
    }
}
