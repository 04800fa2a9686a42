//! Analysis of measurement batches.
//!
//! Two entry points mirror the two ways logs are usually inspected:
//!
//! - [`analyze_measurements`]: characterize one batch of runs (mean power over
//!   time, energy per run, spread across runs, outlier-filtered distributions
//!   and their normality).
//! - [`compare_datasets`]: characterize two batches and test whether their
//!   power distributions differ.
//!
//! Statistical failures on a single sequence (too few values for a test, say)
//! are recorded in the report next to the item they belong to. They never
//! abort sibling items.

mod compare;
mod measurement;
mod report;

pub use compare::compare_datasets;
pub use measurement::analyze_measurements;
pub use report::{
    ComparisonReport, DistributionGroup, MeasurementReport, NormalityRow, TestVerdict,
    TotalEnergy, SET_LABELS,
};

/// Label of the pooled distribution group in a single-batch analysis.
pub const TOTAL_LABEL: &str = "Total";
