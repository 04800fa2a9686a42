//! Loading measurement logs from CSV files.
//!
//! A measurement log is a CSV table with a millisecond `Time` column and one
//! recognized quantity column:
//!
//! - `CPU_POWER (Watts)` or `SYSTEM_POWER (Watts)`: instantaneous power
//! - `CPU_ENERGY (J)` or `PACKAGE_ENERGY (J)`: cumulative energy counter
//!
//! Any other columns (`Delta`, for instance) are ignored.
//!
//! # Example
//!
//! ```ignore
//! use wattlog::{data::load_batch, Config};
//!
//! let batch = load_batch(&["run1.csv", "run2.csv"], &Config::default())?;
//! println!("{} files, mean energy {:.2} J", batch.len(), batch.mean_total_energy());
//! ```

mod csv;

pub use self::csv::{load_measurement_csv, parse_measurement_csv};

use std::path::{Path, PathBuf};

use tracing::info;
use wattlog_core::{read_batch_with, FileBatch, FormatIssue, MeasurementTable};

use crate::config::Config;
use crate::Error;

/// Errors that can occur while reading measurement files.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (unbalanced quotes, invalid UTF-8, ...).
    #[error("CSV error in '{name}': {source}")]
    Csv {
        /// Display name of the file.
        name: String,
        /// Underlying parser error.
        #[source]
        source: ::csv::Error,
    },

    /// A cell in a used column is not a number.
    #[error("invalid value in '{name}' at line {line}, column '{column}': '{value}'")]
    InvalidValue {
        /// Display name of the file.
        name: String,
        /// Line number (1-indexed, header is line 1).
        line: u64,
        /// Column header.
        column: String,
        /// Raw cell text.
        value: String,
    },

    /// The headers do not match a recognized measurement layout.
    #[error("unrecognized format in '{name}': {issue}")]
    UnrecognizedFormat {
        /// Display name of the file.
        name: String,
        /// What is missing.
        #[source]
        issue: FormatIssue,
    },
}

/// A parsed measurement file with its display name.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFile {
    /// File name without directory or `.csv` suffix.
    pub name: String,
    /// Parsed table.
    pub table: MeasurementTable,
}

/// Display name for a measurement file: the file name minus a `.csv` suffix.
pub fn display_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    match file_name.len().checked_sub(4) {
        Some(stem_len)
            if file_name.is_char_boundary(stem_len)
                && file_name[stem_len..].eq_ignore_ascii_case(".csv") =>
        {
            file_name[..stem_len].to_string()
        }
        _ => file_name,
    }
}

/// Load and extract every file in `paths` as one batch.
///
/// Loading stops at the first file that cannot be read; extraction failures
/// reject the whole batch.
pub fn load_batch<P: AsRef<Path>>(paths: &[P], config: &Config) -> Result<FileBatch, Error> {
    config.validate()?;

    let files = paths
        .iter()
        .map(|p| load_measurement_csv(p.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    batch_from_files(files, config)
}

/// Extract already-loaded files as one batch.
pub fn batch_from_files(files: Vec<LoadedFile>, config: &Config) -> Result<FileBatch, Error> {
    let (names, tables): (Vec<String>, Vec<MeasurementTable>) =
        files.into_iter().map(|f| (f.name, f.table)).unzip();

    let batch = read_batch_with(&tables, &names, &config.batch_options())?;
    info!(
        files = batch.len(),
        mean_total_energy_j = batch.mean_total_energy(),
        "loaded measurement batch"
    );
    Ok(batch)
}
