//! Series extraction from raw measurement tables.
//!
//! A log reports either instantaneous power (Watts) or a cumulative energy
//! counter (Joules). Both are reduced to the same canonical output: a
//! [`TimePowerSeries`] on a 0.1 s grid plus the total energy of the run.
//!
//! # Row handling
//!
//! - The first `warmup_rows` rows are dropped.
//! - The first retained row anchors the time axis at 0.0 s and contributes
//!   no energy.
//! - Every later row is one raw step: `delta = (time[i] - time[i-1]) / 1000`,
//!   always against the preceding *raw* row.
//! - A step with a zero (or negative) delta yields no power sample and does
//!   not advance the clock.
//!
//! Samples that round to the same bucket are averaged by [`deduplicate`].
//! Total energy is summed over raw steps and is never deduplicated.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_WARMUP_ROWS, MS_PER_SECOND};
use crate::error::{ExtractError, FormatIssue};
use crate::types::{
    bucket_time, time_bucket, Convention, MeasurementTable, QuantityColumn, Sample,
    TimePowerSeries,
};

/// Output of [`extract`]: the cleaned series and the run's total energy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Deduplicated power series.
    pub series: TimePowerSeries,
    /// Total energy in Joules, accumulated over raw steps.
    pub total_energy_j: f64,
    /// Column the values were read from.
    pub column: QuantityColumn,
}

impl Extraction {
    /// Convention of the source column.
    pub fn convention(&self) -> Convention {
        self.column.convention()
    }
}

/// Extract a series using the default warm-up skip of two rows.
pub fn extract(table: &MeasurementTable) -> Result<Extraction, ExtractError> {
    extract_with_warmup(table, DEFAULT_WARMUP_ROWS)
}

/// Extract a series, dropping `warmup_rows` leading rows.
///
/// # Errors
///
/// Returns [`ExtractError::UnrecognizedFormat`] with
/// [`FormatIssue::TooFewRows`] if fewer than `warmup_rows + 1` rows exist.
pub fn extract_with_warmup(
    table: &MeasurementTable,
    warmup_rows: usize,
) -> Result<Extraction, ExtractError> {
    let rows = table.len();
    let min = warmup_rows + 1;
    if rows < min {
        return Err(FormatIssue::TooFewRows { got: rows, min }.into());
    }

    let time = &table.time_ms[..rows];
    let values = &table.values[..rows];
    let convention = table.convention();

    let mut elapsed = Vec::with_capacity(rows - warmup_rows);
    let mut power = Vec::with_capacity(rows - warmup_rows);
    let mut total_time = 0.0;
    let mut total_energy = 0.0;

    // Anchor row: time origin, no energy.
    let anchor = warmup_rows;
    let anchor_power = match convention {
        Convention::Power => Some(values[anchor]),
        Convention::Energy => anchor
            .checked_sub(1)
            .and_then(|prev| counter_power(time, values, prev, anchor)),
    };
    if let Some(p) = anchor_power.filter(|p| p.is_finite()) {
        elapsed.push(0.0);
        power.push(p);
    }

    let mut skipped_steps = 0usize;
    for i in (anchor + 1)..rows {
        let delta = (time[i] - time[i - 1]) / MS_PER_SECOND;

        let step_energy = match convention {
            Convention::Power => values[i] * delta,
            Convention::Energy => values[i] - values[i - 1],
        };

        if delta <= 0.0 || !delta.is_finite() {
            if delta < 0.0 {
                warn!(
                    row = i,
                    delta_s = delta,
                    "time goes backwards; step skipped"
                );
            }
            // The counter still moved; keep the total telescoping.
            if convention == Convention::Energy && step_energy.is_finite() {
                total_energy += step_energy;
            }
            skipped_steps += 1;
            continue;
        }

        total_time += delta;
        if step_energy.is_finite() {
            total_energy += step_energy;
        }

        let step_power = match convention {
            Convention::Power => values[i],
            Convention::Energy => step_energy / delta,
        };
        if step_power.is_finite() {
            elapsed.push(round_elapsed(total_time));
            power.push(step_power);
        }
    }

    let series = deduplicate(&elapsed, &power);

    debug!(
        column = %table.quantity,
        rows,
        raw_samples = elapsed.len(),
        samples = series.len(),
        skipped_steps,
        total_energy_j = total_energy,
        "extracted power series"
    );

    Ok(Extraction {
        series,
        total_energy_j: total_energy,
        column: table.quantity,
    })
}

/// Power derived from the counter step `prev -> i`, if the step has positive duration.
fn counter_power(time: &[f64], values: &[f64], prev: usize, i: usize) -> Option<f64> {
    let delta = (time[i] - time[prev]) / MS_PER_SECOND;
    (delta > 0.0).then(|| (values[i] - values[prev]) / delta)
}

/// Round accumulated seconds to one decimal.
fn round_elapsed(total_time: f64) -> f64 {
    bucket_time(time_bucket(total_time))
}

/// Collapse runs of equal rounded times into one sample each.
///
/// Each output sample carries the arithmetic mean of the power values in its
/// run. Output order follows first occurrence. Applying this to an already
/// deduplicated series returns it unchanged.
pub fn deduplicate(elapsed: &[f64], power: &[f64]) -> TimePowerSeries {
    // (bucket, power sum, count) per run
    let mut runs: Vec<(i64, f64, usize)> = Vec::with_capacity(elapsed.len().min(power.len()));

    for (&t, &p) in elapsed.iter().zip(power) {
        let bucket = time_bucket(t);
        if let Some(run) = runs.last_mut().filter(|run| run.0 == bucket) {
            run.1 += p;
            run.2 += 1;
        } else {
            runs.push((bucket, p, 1));
        }
    }

    runs.into_iter()
        .map(|(bucket, sum, count)| Sample::new(bucket_time(bucket), sum / count as f64))
        .collect()
}
