//! Z-score outlier removal.

use crate::error::{StatsError, StatsResult};

use super::{mean, population_variance};

/// Z-scores of `values` against their own mean and population standard deviation.
///
/// A constant sequence has zero spread; every score is then 0.0.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(mu), Some(var)) = (mean(values), population_variance(values)) else {
        return Vec::new();
    };
    let sigma = var.sqrt();
    if sigma == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - mu) / sigma).collect()
}

/// Keep the values whose |z-score| is strictly below `threshold`.
///
/// Each call uses only its own sequence's mean and spread, so filtering two
/// datasets never pools their statistics. Order is preserved.
///
/// # Errors
///
/// Returns [`StatsError::InvalidThreshold`] for a non-positive or non-finite threshold.
pub fn filter_outliers(values: &[f64], threshold: f64) -> StatsResult<Vec<f64>> {
    if !(threshold.is_finite() && threshold > 0.0) {
        return Err(StatsError::InvalidThreshold(threshold));
    }

    Ok(values
        .iter()
        .zip(z_scores(values))
        .filter(|(_, z)| z.abs() < threshold)
        .map(|(&v, _)| v)
        .collect())
}
