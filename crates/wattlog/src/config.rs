//! Configuration for measurement analysis.

use serde::{Deserialize, Serialize};
use tracing::warn;
use wattlog_core::constants::{
    DEFAULT_OUTLIER_THRESHOLD, DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_WARMUP_ROWS,
    MIN_OUTLIER_THRESHOLD,
};
use wattlog_core::BatchOptions;

/// Environment variable that overrides the default outlier threshold.
pub const OUTLIER_THRESHOLD_ENV: &str = "WATTLOG_OUTLIER_THRESHOLD";

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Outlier threshold below the minimum or not finite.
    #[error("outlier_threshold must be >= {min}, got {value}")]
    OutlierThreshold {
        /// Offending value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
    },

    /// Significance level outside (0, 1).
    #[error("significance_level must be in (0, 1), got {0}")]
    SignificanceLevel(f64),
}

/// Main configuration for loading and analyzing measurement logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of standard deviations a value may lie from its sequence mean
    /// before it is dropped as an outlier.
    ///
    /// Default: 3.0. Minimum: 1.0.
    pub outlier_threshold: f64,

    /// Leading rows dropped from every file (sensor warm-up).
    ///
    /// Default: 2
    pub warmup_rows: usize,

    /// Significance level for normality and two-sample verdicts.
    ///
    /// Default: 0.05
    pub significance_level: f64,

    /// Extract files in parallel when the `parallel` feature is enabled.
    ///
    /// Default: true
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
            warmup_rows: DEFAULT_WARMUP_ROWS,
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            parallel: true,
        }
    }
}

impl Config {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the outlier threshold taken from
    /// `WATTLOG_OUTLIER_THRESHOLD` when it holds a number.
    pub fn from_env() -> Self {
        let value = std::env::var(OUTLIER_THRESHOLD_ENV).ok();
        Self {
            outlier_threshold: threshold_override(value.as_deref(), DEFAULT_OUTLIER_THRESHOLD),
            ..Self::default()
        }
    }

    /// Set the outlier threshold.
    pub fn with_outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = threshold;
        self
    }

    /// Set the number of warm-up rows dropped per file.
    pub fn with_warmup_rows(mut self, rows: usize) -> Self {
        self.warmup_rows = rows;
        self
    }

    /// Set the significance level.
    pub fn with_significance_level(mut self, alpha: f64) -> Self {
        self.significance_level = alpha;
        self
    }

    /// Extract files one after another.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.outlier_threshold.is_finite() && self.outlier_threshold >= MIN_OUTLIER_THRESHOLD)
        {
            return Err(ConfigError::OutlierThreshold {
                value: self.outlier_threshold,
                min: MIN_OUTLIER_THRESHOLD,
            });
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::SignificanceLevel(self.significance_level));
        }
        Ok(())
    }

    /// Options handed to the batch reader.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            warmup_rows: self.warmup_rows,
            parallel: self.parallel,
        }
    }
}

fn threshold_override(value: Option<&str>, default: f64) -> f64 {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(threshold) => threshold,
        Err(_) => {
            warn!(
                value = raw,
                "ignoring {} (not a number)", OUTLIER_THRESHOLD_ENV
            );
            default
        }
    }
}
