//! Error types for extraction, batching and statistics.

use serde::{Deserialize, Serialize};

/// Why a measurement table could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum FormatIssue {
    /// None of the four recognized quantity columns is present.
    #[error("no recognized quantity column (expected one of CPU_POWER (Watts), SYSTEM_POWER (Watts), CPU_ENERGY (J), PACKAGE_ENERGY (J)); found {found:?}")]
    MissingQuantityColumn {
        /// Headers that were present.
        found: Vec<String>,
    },

    /// The millisecond `Time` column is missing.
    #[error("missing Time column")]
    MissingTimeColumn,

    /// Not enough rows left after the warm-up skip.
    #[error("too few rows: got {got}, need at least {min}")]
    TooFewRows {
        /// Rows in the table.
        got: usize,
        /// Rows required (warm-up rows plus one retained row).
        min: usize,
    },
}

/// Errors from the series extractor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The table does not follow either recognized convention.
    #[error("unrecognized format: {0}")]
    UnrecognizedFormat(#[from] FormatIssue),
}

/// Errors from the batch reader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchError {
    /// No files were supplied.
    #[error("batch contains no files")]
    Empty,

    /// `names` and `tables` differ in length.
    #[error("got {names} names for {tables} tables")]
    NameMismatch {
        /// Number of names.
        names: usize,
        /// Number of tables.
        tables: usize,
    },

    /// One file failed extraction; the whole batch is rejected.
    #[error("file '{name}': {source}")]
    Extract {
        /// Display name of the failing file.
        name: String,
        /// Underlying extraction error.
        #[source]
        source: ExtractError,
    },
}

/// Errors from the statistics routines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum StatsError {
    /// The sequence is too short for the requested test.
    #[error("insufficient samples for {test}: got {got}, need at least {min}")]
    InsufficientSamples {
        /// Test that was requested.
        test: String,
        /// Number of values supplied.
        got: usize,
        /// Minimum required.
        min: usize,
    },

    /// Outlier threshold must be positive and finite.
    #[error("invalid outlier threshold {0}: must be positive and finite")]
    InvalidThreshold(f64),

    /// A reference distribution could not be constructed.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// The test implementation rejected its input.
    #[error("{test} failed: {message}")]
    Computation {
        /// Test that was requested.
        test: String,
        /// Message from the test implementation.
        message: String,
    },
}

impl StatsError {
    pub(crate) fn insufficient(test: &str, got: usize, min: usize) -> Self {
        StatsError::InsufficientSamples {
            test: test.to_string(),
            got,
            min,
        }
    }

    pub(crate) fn computation(test: &str, source: impl std::fmt::Display) -> Self {
        StatsError::Computation {
            test: test.to_string(),
            message: source.to_string(),
        }
    }
}

/// Result alias for statistics routines.
pub type StatsResult<T> = Result<T, StatsError>;
