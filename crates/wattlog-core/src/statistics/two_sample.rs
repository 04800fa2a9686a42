//! Two-sample significance tests and the pairwise dominance metric.

use anofox_statistics::nonparametric::wilcoxon;
use anofox_statistics::parametric::ttest::Alternative;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::constants::{DEFAULT_SIGNIFICANCE_LEVEL, MANN_WHITNEY_EXACT_MAX};
use crate::error::{StatsError, StatsResult};

use super::{mean, sample_variance};

/// Result of a two-sided two-sample test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Test statistic (t for Welch, U for Mann-Whitney).
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Welch-Satterthwaite degrees of freedom (Welch only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub df: Option<f64>,
}

impl TestResult {
    /// Significant at the default 0.05 level (p < 0.05).
    pub fn is_significant(&self) -> bool {
        self.is_significant_at(DEFAULT_SIGNIFICANCE_LEVEL)
    }

    /// Significant when the p-value is below `alpha`.
    pub fn is_significant_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Welch's unequal-variance t-test, two-sided.
///
/// If both samples have zero variance the test degenerates: equal means give
/// p = 1, different means give p = 0.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientSamples`] if either sample has fewer than two values.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> StatsResult<TestResult> {
    let shortest = a.len().min(b.len());
    if shortest < 2 {
        return Err(StatsError::insufficient("Welch's t-test", shortest, 2));
    }

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let (m1, m2) = (mean(a).unwrap_or(0.0), mean(b).unwrap_or(0.0));
    let (v1, v2) = (
        sample_variance(a).unwrap_or(0.0),
        sample_variance(b).unwrap_or(0.0),
    );

    let se1 = v1 / n1;
    let se2 = v2 / n2;
    let se = se1 + se2;

    if se == 0.0 {
        let (statistic, p_value) = if m1 == m2 {
            (0.0, 1.0)
        } else {
            ((m1 - m2).signum() * f64::INFINITY, 0.0)
        };
        return Ok(TestResult {
            statistic,
            p_value,
            df: None,
        });
    }

    let t = (m1 - m2) / se.sqrt();
    let df = se * se / (se1 * se1 / (n1 - 1.0) + se2 * se2 / (n2 - 1.0));

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
    let p_value = (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0);

    Ok(TestResult {
        statistic: t,
        p_value,
        df: Some(df),
    })
}

/// Whether `values` contains a repeated value.
fn has_ties(values: &[f64]) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.windows(2).any(|w| w[0] == w[1])
}

/// Mann-Whitney U test, two-sided.
///
/// Small tie-free samples (both at most 20 values) use the exact null
/// distribution. Otherwise the normal approximation with tie and continuity
/// correction is used.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientSamples`] if either sample is empty and
/// [`StatsError::Computation`] when the underlying test rejects the input.
pub fn mann_whitney_u(a: &[f64], b: &[f64]) -> StatsResult<TestResult> {
    const TEST_NAME: &str = "Mann-Whitney U";

    let shortest = a.len().min(b.len());
    if shortest < 1 {
        return Err(StatsError::insufficient(TEST_NAME, shortest, 1));
    }

    let pooled: Vec<f64> = a.iter().chain(b).copied().collect();
    let exact = a.len() <= MANN_WHITNEY_EXACT_MAX
        && b.len() <= MANN_WHITNEY_EXACT_MAX
        && !has_ties(&pooled);

    let result = wilcoxon::mann_whitney_u(a, b, Alternative::TwoSided, true, exact, None, None)
        .map_err(|e| StatsError::computation(TEST_NAME, e))?;

    Ok(TestResult {
        statistic: result.statistic,
        p_value: result.p_value.clamp(0.0, 1.0),
        df: None,
    })
}

/// Percentage of positions `i < min(len)` where `first[i] > second[i]`.
///
/// Pairs are positional, not time-aligned. Empty input gives 0.0; the result
/// never exceeds 100.
pub fn dominance_percent(first: &[f64], second: &[f64]) -> f64 {
    let pairs = first.len().min(second.len());
    if pairs == 0 {
        return 0.0;
    }
    let wins = first
        .iter()
        .zip(second)
        .filter(|(x, y)| x > y)
        .count();
    (wins as f64 / pairs as f64 * 100.0).min(100.0)
}
