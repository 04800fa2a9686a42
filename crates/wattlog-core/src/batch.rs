//! Batch reading: extract every file and aggregate across files.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DEFAULT_WARMUP_ROWS;
use crate::error::BatchError;
use crate::extract::{extract_with_warmup, Extraction};
use crate::statistics;
use crate::table::AlignedTable;
use crate::types::{MeasurementTable, QuantityColumn, TimePowerSeries};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Options for [`read_batch_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOptions {
    /// Leading rows dropped from each file.
    pub warmup_rows: usize,
    /// Extract files on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            warmup_rows: DEFAULT_WARMUP_ROWS,
            parallel: true,
        }
    }
}

/// One point of a cross-file error band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorBand {
    /// Elapsed time in seconds.
    #[serde(rename = "Time (s)")]
    pub time_s: f64,
    /// Mean power over the files present at this time.
    #[serde(rename = "MEAN")]
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two files present.
    #[serde(rename = "STD")]
    pub std: Option<f64>,
    /// Two standard deviations.
    #[serde(rename = "CONF")]
    pub conf: Option<f64>,
}

/// Extracted series of a batch of files plus their cross-file aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBatch {
    /// Display names, in input order.
    pub names: Vec<String>,
    /// Per-file deduplicated series, parallel to `names`.
    pub series: Vec<TimePowerSeries>,
    /// Per-file total energy in Joules, parallel to `names`.
    pub total_energies: Vec<f64>,
    /// Column each file was read from, parallel to `names`.
    pub columns: Vec<QuantityColumn>,
    /// All series outer-joined on time.
    pub table: AlignedTable,
    /// Row-wise mean of `table`, ignoring absent cells.
    pub mean: TimePowerSeries,
}

impl FileBatch {
    /// Number of files.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the batch has no files.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the batch holds exactly one file.
    pub fn is_single(&self) -> bool {
        self.names.len() == 1
    }

    /// Average of the per-file total energies.
    pub fn mean_total_energy(&self) -> f64 {
        statistics::mean(&self.total_energies).unwrap_or(0.0)
    }

    /// Mean, standard deviation and 2-sigma band at every time bucket.
    pub fn error_bands(&self) -> Vec<ErrorBand> {
        (0..self.table.len())
            .filter_map(|r| {
                let mean = self.table.row_mean(r)?;
                let std = self.table.row_std(r);
                Some(ErrorBand {
                    time_s: self.table.times[r],
                    mean,
                    std,
                    conf: std.map(|s| 2.0 * s),
                })
            })
            .collect()
    }

    /// Per-file power values with time discarded, in series order.
    pub fn stat_sequences(&self) -> Vec<Vec<f64>> {
        self.series.iter().map(TimePowerSeries::powers).collect()
    }

    /// `(name, total energy)` pairs in input order.
    pub fn total_energy_table(&self) -> Vec<(String, f64)> {
        self.names
            .iter()
            .cloned()
            .zip(self.total_energies.iter().copied())
            .collect()
    }
}

/// Read a batch with default options.
pub fn read_batch<S: AsRef<str> + Sync>(
    tables: &[MeasurementTable],
    names: &[S],
) -> Result<FileBatch, BatchError> {
    read_batch_with(tables, names, &BatchOptions::default())
}

/// Extract every table and build the cross-file aggregates.
///
/// # Errors
///
/// Fails as a whole if the batch is empty, if `names` and `tables` differ in
/// length, or if any single file fails extraction.
pub fn read_batch_with<S: AsRef<str> + Sync>(
    tables: &[MeasurementTable],
    names: &[S],
    options: &BatchOptions,
) -> Result<FileBatch, BatchError> {
    if tables.is_empty() {
        return Err(BatchError::Empty);
    }
    if tables.len() != names.len() {
        return Err(BatchError::NameMismatch {
            names: names.len(),
            tables: tables.len(),
        });
    }

    let extractions = extract_all(tables, names, options)?;

    let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut series = Vec::with_capacity(extractions.len());
    let mut total_energies = Vec::with_capacity(extractions.len());
    let mut columns = Vec::with_capacity(extractions.len());
    for extraction in extractions {
        series.push(extraction.series);
        total_energies.push(extraction.total_energy_j);
        columns.push(extraction.column);
    }

    let table = {
        let refs: Vec<&TimePowerSeries> = series.iter().collect();
        AlignedTable::outer_join(&names, &refs)
    };
    let mean = table.mean_series();

    debug!(
        files = names.len(),
        time_points = table.len(),
        "read measurement batch"
    );

    Ok(FileBatch {
        names,
        series,
        total_energies,
        columns,
        table,
        mean,
    })
}

fn extract_one<S: AsRef<str>>(
    table: &MeasurementTable,
    name: &S,
    warmup_rows: usize,
) -> Result<Extraction, BatchError> {
    extract_with_warmup(table, warmup_rows).map_err(|source| BatchError::Extract {
        name: name.as_ref().to_string(),
        source,
    })
}

#[cfg(feature = "parallel")]
fn extract_all<S: AsRef<str> + Sync>(
    tables: &[MeasurementTable],
    names: &[S],
    options: &BatchOptions,
) -> Result<Vec<Extraction>, BatchError> {
    if options.parallel && tables.len() > 1 {
        tables
            .par_iter()
            .zip(names.par_iter())
            .map(|(table, name)| extract_one(table, name, options.warmup_rows))
            .collect()
    } else {
        extract_sequential(tables, names, options.warmup_rows)
    }
}

#[cfg(not(feature = "parallel"))]
fn extract_all<S: AsRef<str> + Sync>(
    tables: &[MeasurementTable],
    names: &[S],
    options: &BatchOptions,
) -> Result<Vec<Extraction>, BatchError> {
    extract_sequential(tables, names, options.warmup_rows)
}

fn extract_sequential<S: AsRef<str>>(
    tables: &[MeasurementTable],
    names: &[S],
    warmup_rows: usize,
) -> Result<Vec<Extraction>, BatchError> {
    tables
        .iter()
        .zip(names)
        .map(|(table, name)| extract_one(table, name, warmup_rows))
        .collect()
}
