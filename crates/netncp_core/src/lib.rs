//! netNCP scoring pipeline library
//!
//! This crate computes a composite "net nature's contribution to people"
//! (netNCP) score from synthetic indicator data. The pipeline runs as a
//! linear sequence of table transformations over small in-memory
//! datasets:
//! - Indicator generation (seeded normal sampling per forest type)
//! - Supply aggregation (sum, passthrough, or mean of globally
//!   min-max-normalized indicators)
//! - Access filtering (per-group access fractions, full cross join)
//! - Supply-benefit transformation (four enumerated shape functions)
//! - Priority weighting (per-group normalization of priority points)
//! - netNCP reporting (mean and sample sd across replicates)
//! - Sensitivity analysis (+/-10% perturbations of supply and access)
//!
//! # Builder DSL
//!
//! Use the fluent builder API for ergonomic study setup:
//!
//! ```ignore
//! use netncp_core::config::{NcpBuilder, StudyBuilder};
//! use netncp_core::pipeline;
//!
//! let (config, metadata) = StudyBuilder::new()
//!     .forest_type("Broadleaf", 8)
//!     .indicator("Broadleaf", "basal_area", 12.0, 2.0)
//!     .group("Foresters")
//!     .ncp(NcpBuilder::new("Timber")
//!         .sum_of(["basal_area"])
//!         .supply_range(0.0, 20.0)
//!         .threshold_cubic_benefits(5.0))
//!     .access("Timber", "Foresters", 0.8)
//!     .priority("Timber", "Foresters", 30.0)
//!     .build()?;
//!
//! let result = pipeline::run(&config, 42)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod access;
pub mod charts;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod priority;
pub mod report;
pub mod sensitivity;
pub mod supply;
pub mod transform;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{NcpBuilder, StudyBuilder, StudyConfig, StudyMetadata};
pub use error::{ConfigError, PipelineError, Result, Warning};
pub use pipeline::{PipelineResult, run};
