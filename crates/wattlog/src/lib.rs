//! # wattlog
//!
//! Load, characterize and compare energy and power measurement logs.
//!
//! A measurement log is a CSV file with a millisecond `Time` column and
//! either an instantaneous power column (Watts) or a cumulative energy
//! counter (Joules). This crate:
//!
//! - reads batches of such files into canonical time/power series
//!   (via [`wattlog_core`]),
//! - reports mean power over time, energy per run and spread across runs,
//! - filters outliers and tests each run's power distribution for normality,
//! - compares two batches with Welch's t-test, the Mann-Whitney U test and
//!   a pairwise dominance metric.
//!
//! ## Quick Start
//!
//! ```ignore
//! use wattlog::{analyze_measurements, data::load_batch, output::terminal, Config};
//!
//! let config = Config::default();
//! let batch = load_batch(&["idle1.csv", "idle2.csv"], &config)?;
//! let report = analyze_measurements(&batch, &config)?;
//! println!("{}", terminal::format_measurement_report(&report));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod data;
pub mod output;

pub use analysis::{
    analyze_measurements, compare_datasets, ComparisonReport, DistributionGroup,
    MeasurementReport, NormalityRow, TestVerdict, TotalEnergy,
};
pub use config::{Config, ConfigError};
pub use data::{load_batch, load_measurement_csv, DataError, LoadedFile};

// Re-export the core types callers need alongside reports
pub use wattlog_core::{
    AlignedTable, BatchError, Convention, ErrorBand, FileBatch, QuantityColumn, StatsError,
    TimePowerSeries,
};

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or parsing a file failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Extraction failed for a file in the batch.
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A statistics routine rejected its input.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
