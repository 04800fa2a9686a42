//! Numeric constants shared across the pipeline.

/// Rows dropped from the head of every log (instrument warm-up).
pub const DEFAULT_WARMUP_ROWS: usize = 2;

/// Milliseconds per second, for converting the raw `Time` column.
pub const MS_PER_SECOND: f64 = 1000.0;

/// Time buckets per second. Elapsed time is rounded to 0.1 s.
pub const BUCKETS_PER_SECOND: f64 = 10.0;

// =============================================================================
// Statistics defaults
// =============================================================================

/// Default z-score cutoff for outlier removal.
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 3.0;

/// Smallest outlier cutoff accepted from callers.
pub const MIN_OUTLIER_THRESHOLD: f64 = 1.0;

/// Significance level for normality and two-sample tests.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Shapiro-Wilk needs at least this many values.
pub const MIN_NORMALITY_SAMPLES: usize = 3;

/// Upper sample size for which Royston's p-value approximation is calibrated.
pub const MAX_NORMALITY_SAMPLES: usize = 5000;

/// Mann-Whitney uses the exact null distribution up to this many values per group
/// (when there are no ties).
pub const MANN_WHITNEY_EXACT_MAX: usize = 20;
