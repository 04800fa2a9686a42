//! Statistical routines over power-value sequences.
//!
//! - [`filter_outliers`]: z-score outlier removal, per sequence
//! - [`shapiro_wilk`]: normality test
//! - [`welch_t_test`], [`mann_whitney_u`]: two-sided two-sample tests
//! - [`dominance_percent`]: positional pairwise dominance

mod normality;
mod outlier;
mod two_sample;

pub use normality::{shapiro_wilk, NormalityResult};
pub use outlier::{filter_outliers, z_scores};
pub use two_sample::{dominance_percent, mann_whitney_u, welch_t_test, TestResult};

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (n denominator). Returns `None` for an empty slice.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator). Returns `None` below two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    Some(values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variances() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), Some(5.0));
        assert_eq!(population_variance(&values), Some(4.0));
        assert!((sample_variance(&values).unwrap() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(mean(&[]), None);
        assert_eq!(population_variance(&[]), None);
        assert_eq!(sample_std(&[3.0]), None);
    }
}
