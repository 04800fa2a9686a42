//! Report structures for batch analysis and dataset comparison.

use serde::{Deserialize, Serialize};
use wattlog_core::{
    AlignedTable, ErrorBand, NormalityResult, StatsError, TestResult, TimePowerSeries,
};

/// Column labels of the joined mean table in a comparison.
pub const SET_LABELS: [&str; 2] = ["Set #1", "Set #2"];

/// Total energy of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalEnergy {
    /// Display name of the file.
    #[serde(rename = "NAME")]
    pub name: String,
    /// Energy in Joules.
    #[serde(rename = "TOTAL ENERGY")]
    pub joules: f64,
}

/// Shapiro-Wilk outcome for one filtered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityRow {
    /// Display name of the file.
    #[serde(rename = "FILE")]
    pub file: String,
    /// p-value above the significance level. `None` if the test failed.
    #[serde(rename = "NORMAL")]
    pub normal: Option<bool>,
    /// Shapiro-Wilk p-value.
    #[serde(rename = "P-VALUE")]
    pub p_value: Option<f64>,
    /// W statistic.
    #[serde(rename = "W")]
    pub statistic: Option<f64>,
    /// Why the test could not run.
    #[serde(rename = "ERROR", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StatsError>,
}

impl NormalityRow {
    /// Build a row from a test outcome at significance level `alpha`.
    pub fn new(file: &str, outcome: Result<NormalityResult, StatsError>, alpha: f64) -> Self {
        match outcome {
            Ok(result) => Self {
                file: file.to_string(),
                normal: Some(result.is_normal_at(alpha)),
                p_value: Some(result.p_value),
                statistic: Some(result.statistic),
                error: None,
            },
            Err(error) => Self {
                file: file.to_string(),
                normal: None,
                p_value: None,
                statistic: None,
                error: Some(error),
            },
        }
    }
}

/// Outlier-filtered power values of one file, or the pooled values of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionGroup {
    /// File name, or the pooled-group label.
    pub name: String,
    /// Values kept by the outlier filter, in series order.
    pub values: Vec<f64>,
    /// Number of values dropped as outliers.
    pub removed: usize,
}

/// Analysis of one batch of measurement files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    /// File names in input order.
    pub names: Vec<String>,
    /// The batch holds exactly one file.
    pub single: bool,
    /// Mean power over time across files.
    pub mean_series: TimePowerSeries,
    /// Per-file total energy.
    pub total_energies: Vec<TotalEnergy>,
    /// Average of the per-file total energies.
    pub mean_total_energy: f64,
    /// Spread across files per time point. `None` for a single file.
    pub error_bands: Option<Vec<ErrorBand>>,
    /// Threshold the outlier filter ran with.
    pub outlier_threshold: f64,
    /// Significance level used for the normality verdicts.
    pub significance_level: f64,
    /// Outlier-filtered values per file.
    pub filtered: Vec<DistributionGroup>,
    /// All filtered values of the batch concatenated.
    pub total: DistributionGroup,
    /// One Shapiro-Wilk row per file.
    pub normality: Vec<NormalityRow>,
}

impl MeasurementReport {
    /// Per-file groups followed by the pooled group.
    pub fn distribution_groups(&self) -> impl Iterator<Item = &DistributionGroup> {
        self.filtered.iter().chain(std::iter::once(&self.total))
    }

    /// Pooled outlier-filtered values.
    pub fn pooled(&self) -> &[f64] {
        &self.total.values
    }
}

/// Outcome of one two-sample test, with a readable verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVerdict {
    /// Test name as shown to users.
    pub test: String,
    /// Statistic and p-value, when the test could run.
    pub result: Option<TestResult>,
    /// p-value below the significance level.
    pub significant: Option<bool>,
    /// Why the test could not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StatsError>,
    /// One-line verdict, e.g. `Welch's t-test: significant difference (p = 0.0012)`.
    pub verdict: String,
}

impl TestVerdict {
    /// Build a verdict from a test outcome at significance level `alpha`.
    pub fn new(test: &str, outcome: Result<TestResult, StatsError>, alpha: f64) -> Self {
        match outcome {
            Ok(result) => {
                let significant = result.is_significant_at(alpha);
                let verdict = format!(
                    "{}: {} (p = {:.4})",
                    test,
                    if significant {
                        "significant difference"
                    } else {
                        "no significant difference"
                    },
                    result.p_value
                );
                Self {
                    test: test.to_string(),
                    result: Some(result),
                    significant: Some(significant),
                    error: None,
                    verdict,
                }
            }
            Err(error) => Self {
                test: test.to_string(),
                result: None,
                significant: None,
                verdict: format!("{}: not computed ({})", test, error),
                error: Some(error),
            },
        }
    }
}

/// Comparison of two batches of measurement files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Mean series of both sets joined on time, columns `Set #1` and `Set #2`.
    pub means: AlignedTable,
    /// Analysis of the first set.
    pub first: MeasurementReport,
    /// Analysis of the second set.
    pub second: MeasurementReport,
    /// Welch's t-test on the pooled filtered values.
    pub welch: TestVerdict,
    /// Mann-Whitney U test on the pooled filtered values.
    pub mann_whitney: TestVerdict,
    /// Share of positional pairs where the first set's value is larger, in percent.
    pub dominance_percent: f64,
    /// Significance level used for both tests.
    pub significance_level: f64,
}

impl ComparisonReport {
    /// Verdict lines in display order.
    pub fn verdicts(&self) -> Vec<String> {
        vec![
            self.welch.verdict.clone(),
            self.mann_whitney.verdict.clone(),
            format!(
                "Pairwise dominance: first set higher in {:.2}% of pairs",
                self.dominance_percent
            ),
        ]
    }
}
