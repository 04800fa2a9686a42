//! Outer-joined tables of several power series on a shared time axis.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::statistics;
use crate::types::{bucket_time, Sample, TimePowerSeries};

/// Several series joined on the union of their time buckets.
///
/// A column has `None` wherever its series has no sample at that time. Absent
/// cells are excluded from row statistics; they are never read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    /// Union of all time buckets, ascending, in seconds.
    pub times: Vec<f64>,
    /// Column labels.
    pub names: Vec<String>,
    /// `columns[c][r]` is column `c` at `times[r]`.
    pub columns: Vec<Vec<Option<f64>>>,
}

impl AlignedTable {
    /// Outer-join `series` on time. `names` labels the columns in the same order.
    pub fn outer_join<S: AsRef<str>>(names: &[S], series: &[&TimePowerSeries]) -> Self {
        let buckets: BTreeSet<i64> = series
            .iter()
            .flat_map(|s| s.samples().iter().map(Sample::bucket))
            .collect();

        let columns = series
            .iter()
            .map(|s| buckets.iter().map(|&b| s.power_at(b)).collect())
            .collect();

        Self {
            times: buckets.into_iter().map(bucket_time).collect(),
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            columns,
        }
    }

    /// Number of time rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Cells of row `r`, one per column.
    pub fn row(&self, r: usize) -> Vec<Option<f64>> {
        self.columns
            .iter()
            .map(|col| col.get(r).copied().flatten())
            .collect()
    }

    /// Present values of row `r`.
    pub fn present(&self, r: usize) -> Vec<f64> {
        self.row(r).into_iter().flatten().collect()
    }

    /// Mean of the present values in row `r`.
    pub fn row_mean(&self, r: usize) -> Option<f64> {
        statistics::mean(&self.present(r))
    }

    /// Sample standard deviation of the present values in row `r`.
    ///
    /// `None` when fewer than two values are present.
    pub fn row_std(&self, r: usize) -> Option<f64> {
        statistics::sample_std(&self.present(r))
    }

    /// Row-wise mean series, ignoring absent cells.
    pub fn mean_series(&self) -> TimePowerSeries {
        self.times
            .iter()
            .enumerate()
            .filter_map(|(r, &t)| self.row_mean(r).map(|m| Sample::new(t, m)))
            .collect()
    }

    /// Number of absent cells in column `c`.
    pub fn absent_count(&self, c: usize) -> usize {
        self.columns
            .get(c)
            .map(|col| col.iter().filter(|v| v.is_none()).count())
            .unwrap_or(0)
    }
}
