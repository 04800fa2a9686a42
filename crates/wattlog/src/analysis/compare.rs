//! Two-batch comparison.

use tracing::{info, warn};
use wattlog_core::{dominance_percent, mann_whitney_u, welch_t_test, AlignedTable, FileBatch};

use super::measurement::build_report;
use super::report::{ComparisonReport, TestVerdict, SET_LABELS};
use crate::config::Config;
use crate::Error;

const FIRST_TOTAL_LABEL: &str = "Total of First dataset";
const SECOND_TOTAL_LABEL: &str = "Total of Second dataset";

/// Compare two batches of measurement files.
///
/// Both batches are analyzed as in [`analyze_measurements`](super::analyze_measurements).
/// Welch's t-test, the Mann-Whitney U test and pairwise dominance then run
/// on the pooled outlier-filtered values of each batch. Dominance pairs
/// values by position, not by time.
///
/// # Errors
///
/// Fails only on an invalid `config`. Test failures are recorded in the
/// returned verdicts.
pub fn compare_datasets(
    first: &FileBatch,
    second: &FileBatch,
    config: &Config,
) -> Result<ComparisonReport, Error> {
    config.validate()?;

    let first_report = build_report(first, config, FIRST_TOTAL_LABEL)?;
    let second_report = build_report(second, config, SECOND_TOTAL_LABEL)?;

    let means = AlignedTable::outer_join(&SET_LABELS, &[&first.mean, &second.mean]);

    let data1 = first_report.pooled();
    let data2 = second_report.pooled();
    let alpha = config.significance_level;

    let welch_outcome = welch_t_test(data1, data2);
    let mann_whitney_outcome = mann_whitney_u(data1, data2);
    for (test, outcome) in [("Welch", &welch_outcome), ("Mann-Whitney", &mann_whitney_outcome)] {
        if let Err(e) = outcome {
            warn!(test, error = %e, "two-sample test failed");
        }
    }

    let welch = TestVerdict::new("Welch's t-test", welch_outcome, alpha);
    let mann_whitney = TestVerdict::new("Mann-Whitney U test", mann_whitney_outcome, alpha);
    let dominance = dominance_percent(data1, data2);

    info!(
        first_values = data1.len(),
        second_values = data2.len(),
        welch_significant = ?welch.significant,
        mann_whitney_significant = ?mann_whitney.significant,
        dominance_percent = dominance,
        "compared datasets"
    );

    Ok(ComparisonReport {
        means,
        first: first_report,
        second: second_report,
        welch,
        mann_whitney,
        dominance_percent: dominance,
        significance_level: alpha,
    })
}
