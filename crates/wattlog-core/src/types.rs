//! Measurement tables and power series.

use serde::{Deserialize, Serialize};

use crate::constants::BUCKETS_PER_SECOND;

/// How a log reports its total quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Convention {
    /// Instantaneous power in Watts per sample.
    Power,
    /// Monotonically accumulating energy counter in Joules.
    Energy,
}

impl std::fmt::Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Convention::Power => write!(f, "power"),
            Convention::Energy => write!(f, "energy"),
        }
    }
}

/// The four recognized total-quantity columns.
///
/// Detection order is the declaration order of [`QuantityColumn::ALL`]:
/// CPU-scoped columns win over system/package-scoped ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityColumn {
    /// `CPU_POWER (Watts)`
    CpuPower,
    /// `SYSTEM_POWER (Watts)`
    SystemPower,
    /// `CPU_ENERGY (J)`
    CpuEnergy,
    /// `PACKAGE_ENERGY (J)`
    PackageEnergy,
}

impl QuantityColumn {
    /// All columns in detection order.
    pub const ALL: [QuantityColumn; 4] = [
        QuantityColumn::CpuPower,
        QuantityColumn::SystemPower,
        QuantityColumn::CpuEnergy,
        QuantityColumn::PackageEnergy,
    ];

    /// CSV header text for this column.
    pub fn header(&self) -> &'static str {
        match self {
            QuantityColumn::CpuPower => "CPU_POWER (Watts)",
            QuantityColumn::SystemPower => "SYSTEM_POWER (Watts)",
            QuantityColumn::CpuEnergy => "CPU_ENERGY (J)",
            QuantityColumn::PackageEnergy => "PACKAGE_ENERGY (J)",
        }
    }

    /// Convention implied by this column.
    pub fn convention(&self) -> Convention {
        match self {
            QuantityColumn::CpuPower | QuantityColumn::SystemPower => Convention::Power,
            QuantityColumn::CpuEnergy | QuantityColumn::PackageEnergy => Convention::Energy,
        }
    }

    /// Pick the preferred recognized column from a set of headers.
    ///
    /// Returns `None` if none of the four columns is present.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Option<QuantityColumn> {
        Self::ALL
            .into_iter()
            .find(|col| headers.iter().any(|h| h.as_ref().trim() == col.header()))
    }
}

impl std::fmt::Display for QuantityColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Header of the millisecond timestamp column.
pub const TIME_HEADER: &str = "Time";

/// One raw measurement log, reduced to its timestamp and quantity columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementTable {
    /// Timestamps in milliseconds, non-decreasing.
    pub time_ms: Vec<f64>,
    /// Which recognized column `values` came from.
    pub quantity: QuantityColumn,
    /// Column values, parallel to `time_ms`.
    pub values: Vec<f64>,
}

impl MeasurementTable {
    /// Create a table from parallel time and value columns.
    pub fn new(time_ms: Vec<f64>, quantity: QuantityColumn, values: Vec<f64>) -> Self {
        Self {
            time_ms,
            quantity,
            values,
        }
    }

    /// Number of rows (the shorter of the two columns).
    pub fn len(&self) -> usize {
        self.time_ms.len().min(self.values.len())
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convention of the quantity column.
    pub fn convention(&self) -> Convention {
        self.quantity.convention()
    }
}

/// A single point of a power series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds elapsed since the first retained row, rounded to 0.1 s.
    #[serde(rename = "Time (s)")]
    pub time_s: f64,
    /// Power in Watts.
    #[serde(rename = "Power (W)")]
    pub power_w: f64,
}

impl Sample {
    /// Create a sample.
    pub fn new(time_s: f64, power_w: f64) -> Self {
        Self { time_s, power_w }
    }

    /// Integer decisecond key of this sample's time.
    pub fn bucket(&self) -> i64 {
        time_bucket(self.time_s)
    }
}

/// Integer decisecond key for an elapsed time in seconds.
///
/// Rounds the exact decimal value of `time_s` to one place, ties to even, so
/// 0.35 (stored just below 0.35) lands in 0.3 and 0.25 lands in 0.2. Used for
/// joining series without comparing floats for equality.
pub fn time_bucket(time_s: f64) -> i64 {
    // `{:.1}` rounds the exact binary value; scaling by ten first does not.
    format!("{:.1}", time_s)
        .replace('.', "")
        .parse()
        .unwrap_or_else(|_| (time_s * BUCKETS_PER_SECOND).round() as i64)
}

/// Elapsed seconds for a decisecond key.
pub fn bucket_time(bucket: i64) -> f64 {
    bucket as f64 / BUCKETS_PER_SECOND
}

/// Round seconds to the 0.1 s bucket resolution.
pub fn round_to_bucket(time_s: f64) -> f64 {
    bucket_time(time_bucket(time_s))
}

/// Canonical (time, power) series of one file.
///
/// Times are strictly increasing once produced by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePowerSeries(pub Vec<Sample>);

impl TimePowerSeries {
    /// Wrap samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self(samples)
    }

    /// Samples in time order.
    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Elapsed times.
    pub fn times(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.time_s).collect()
    }

    /// Power values with time discarded.
    pub fn powers(&self) -> Vec<f64> {
        self.0.iter().map(|s| s.power_w).collect()
    }

    /// Power at an exact bucket, if the series has one.
    pub fn power_at(&self, bucket: i64) -> Option<f64> {
        self.0
            .binary_search_by_key(&bucket, Sample::bucket)
            .ok()
            .map(|idx| self.0[idx].power_w)
    }
}

impl FromIterator<Sample> for TimePowerSeries {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_cpu_column() {
        let headers = ["Time", "SYSTEM_POWER (Watts)", "CPU_POWER (Watts)"];
        assert_eq!(QuantityColumn::detect(&headers), Some(QuantityColumn::CpuPower));

        let headers = ["Time", "PACKAGE_ENERGY (J)", "CPU_ENERGY (J)"];
        assert_eq!(QuantityColumn::detect(&headers), Some(QuantityColumn::CpuEnergy));
    }

    #[test]
    fn test_detect_power_before_energy() {
        let headers = ["PACKAGE_ENERGY (J)", "SYSTEM_POWER (Watts)"];
        assert_eq!(
            QuantityColumn::detect(&headers),
            Some(QuantityColumn::SystemPower)
        );
    }

    #[test]
    fn test_detect_none() {
        let headers = ["Time", "Delta", "GPU_POWER (Watts)"];
        assert_eq!(QuantityColumn::detect(&headers), None);
    }

    #[test]
    fn test_detect_trims_headers() {
        let headers = ["Time", " CPU_ENERGY (J) "];
        assert_eq!(QuantityColumn::detect(&headers), Some(QuantityColumn::CpuEnergy));
    }

    #[test]
    fn test_time_bucket_rounding() {
        assert_eq!(time_bucket(0.0), 0);
        assert_eq!(time_bucket(1.04), 10);
        assert_eq!(time_bucket(1.06), 11);
        assert_eq!(round_to_bucket(2.349), 2.3);
        assert_eq!(time_bucket(-0.04), 0);
        assert_eq!(time_bucket(-1.26), -13);
    }

    #[test]
    fn test_time_bucket_half_steps() {
        // stored just below the decimal midpoint
        assert_eq!(time_bucket(0.15), 1);
        assert_eq!(time_bucket(0.35), 3);
        // exact binary ties go to the even decisecond
        assert_eq!(time_bucket(0.25), 2);
        assert_eq!(time_bucket(0.75), 8);
        assert_eq!(time_bucket(1.25), 12);
    }

    #[test]
    fn test_power_at() {
        let series = TimePowerSeries::new(vec![
            Sample::new(0.0, 1.0),
            Sample::new(0.5, 2.0),
            Sample::new(1.0, 3.0),
        ]);
        assert_eq!(series.power_at(5), Some(2.0));
        assert_eq!(series.power_at(7), None);
    }
}
