//! Shapiro-Wilk normality test, backed by the `normality` crate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{DEFAULT_SIGNIFICANCE_LEVEL, MAX_NORMALITY_SAMPLES, MIN_NORMALITY_SAMPLES};
use crate::error::{StatsError, StatsResult};

const TEST_NAME: &str = "Shapiro-Wilk";

/// Outcome of a Shapiro-Wilk test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// W statistic in (0, 1].
    pub statistic: f64,
    /// p-value under the normality null hypothesis.
    pub p_value: f64,
    /// Number of values tested.
    pub n: usize,
}

impl NormalityResult {
    /// Normal at the default 0.05 level (p > 0.05).
    pub fn is_normal(&self) -> bool {
        self.is_normal_at(DEFAULT_SIGNIFICANCE_LEVEL)
    }

    /// Normal when the p-value exceeds `alpha`.
    pub fn is_normal_at(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Test `values` for normality.
///
/// A constant sequence returns W = 1 and p = 1.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientSamples`] for fewer than three values and
/// [`StatsError::Computation`] when the underlying test rejects the input.
pub fn shapiro_wilk(values: &[f64]) -> StatsResult<NormalityResult> {
    let n = values.len();
    if n < MIN_NORMALITY_SAMPLES {
        return Err(StatsError::insufficient(TEST_NAME, n, MIN_NORMALITY_SAMPLES));
    }
    if n > MAX_NORMALITY_SAMPLES {
        warn!(n, "Shapiro-Wilk is calibrated for at most 5000 samples");
    }

    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if hi - lo == 0.0 {
        return Ok(NormalityResult {
            statistic: 1.0,
            p_value: 1.0,
            n,
        });
    }

    let result = normality::shapiro_wilk(values.to_vec())
        .map_err(|e| StatsError::computation(TEST_NAME, e))?;

    Ok(NormalityResult {
        statistic: result.statistic,
        p_value: result.p_value.clamp(0.0, 1.0),
        n,
    })
}
