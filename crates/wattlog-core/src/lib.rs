//! Core analysis for energy and power measurement logs.
//!
//! This crate turns raw measurement tables into canonical power series and
//! provides the statistics used to characterize and compare them:
//!
//! - [`extract`]: one table to a deduplicated time/power series plus total energy
//! - [`batch`]: many tables to per-file series, an outer-joined table and a mean series
//! - [`statistics`]: outlier filtering, Shapiro-Wilk, Welch's t-test,
//!   Mann-Whitney U and pairwise dominance
//!
//! It does no I/O. Reading CSV files, reporting and the command line live in
//! the `wattlog` crate.
//!
//! # Features
//!
//! - `parallel` (default): extract the files of a batch on the rayon pool
//!
//! ```ignore
//! use wattlog_core::{
//!     batch::read_batch,
//!     statistics::{filter_outliers, shapiro_wilk},
//!     types::{MeasurementTable, QuantityColumn},
//! };
//! ```

pub mod batch;
pub mod constants;
pub mod error;
pub mod extract;
pub mod statistics;
pub mod table;
pub mod types;

// Re-export commonly used items at crate root
pub use batch::{read_batch, read_batch_with, BatchOptions, ErrorBand, FileBatch};
pub use error::{BatchError, ExtractError, FormatIssue, StatsError, StatsResult};
pub use extract::{extract, extract_with_warmup, Extraction};
pub use statistics::{
    dominance_percent, filter_outliers, mann_whitney_u, shapiro_wilk, welch_t_test,
    NormalityResult, TestResult,
};
pub use table::AlignedTable;
pub use types::{Convention, MeasurementTable, QuantityColumn, Sample, TimePowerSeries};
