//! Single-batch analysis.

use tracing::{debug, warn};
use wattlog_core::{filter_outliers, shapiro_wilk, FileBatch};

use super::report::{DistributionGroup, MeasurementReport, NormalityRow, TotalEnergy};
use super::TOTAL_LABEL;
use crate::config::Config;
use crate::Error;

/// Characterize one batch of measurement files.
///
/// Error bands are only computed for batches of more than one file. Each
/// file's power values are outlier-filtered on their own mean and spread,
/// then tested for normality; the filtered values are also pooled into a
/// `Total` group.
///
/// # Errors
///
/// Fails only on an invalid `config`. Per-file normality failures are
/// recorded in [`MeasurementReport::normality`].
pub fn analyze_measurements(batch: &FileBatch, config: &Config) -> Result<MeasurementReport, Error> {
    config.validate()?;
    build_report(batch, config, TOTAL_LABEL)
}

pub(super) fn build_report(
    batch: &FileBatch,
    config: &Config,
    total_label: &str,
) -> Result<MeasurementReport, Error> {
    let filtered = batch
        .names
        .iter()
        .zip(batch.stat_sequences())
        .map(|(name, values)| -> Result<DistributionGroup, Error> {
            let kept = filter_outliers(&values, config.outlier_threshold)?;
            let removed = values.len() - kept.len();
            if removed > 0 {
                debug!(file = %name, removed, "removed outliers");
            }
            Ok(DistributionGroup {
                name: name.clone(),
                values: kept,
                removed,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let normality = filtered
        .iter()
        .map(|group| {
            let outcome = shapiro_wilk(&group.values);
            if let Err(e) = &outcome {
                warn!(file = %group.name, error = %e, "normality test failed");
            }
            NormalityRow::new(&group.name, outcome, config.significance_level)
        })
        .collect();

    let total = DistributionGroup {
        name: total_label.to_string(),
        values: filtered.iter().flat_map(|g| g.values.iter().copied()).collect(),
        removed: filtered.iter().map(|g| g.removed).sum(),
    };

    let total_energies = batch
        .total_energy_table()
        .into_iter()
        .map(|(name, joules)| TotalEnergy { name, joules })
        .collect();

    let error_bands = (!batch.is_single()).then(|| batch.error_bands());

    Ok(MeasurementReport {
        names: batch.names.clone(),
        single: batch.is_single(),
        mean_series: batch.mean.clone(),
        total_energies,
        mean_total_energy: batch.mean_total_energy(),
        error_bands,
        outlier_threshold: config.outlier_threshold,
        significance_level: config.significance_level,
        filtered,
        total,
        normality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wattlog_core::{read_batch, MeasurementTable, QuantityColumn};

    fn power_table(values: &[f64]) -> MeasurementTable {
        MeasurementTable::new(
            (0..values.len()).map(|i| i as f64 * 1000.0).collect(),
            QuantityColumn::CpuPower,
            values.to_vec(),
        )
    }

    #[test]
    fn test_single_file_has_no_error_bands() {
        let batch = read_batch(&[power_table(&[0.0, 0.0, 4.0, 5.0, 6.0, 5.0])], &["solo"]).unwrap();
        let report = analyze_measurements(&batch, &Config::default()).unwrap();

        assert!(report.single);
        assert!(report.error_bands.is_none());
        assert_eq!(report.filtered.len(), 1);
        assert_eq!(report.total.name, "Total");
        assert_eq!(report.pooled(), &[4.0, 5.0, 6.0, 5.0]);
        assert!(report.normality[0].p_value.is_some());
    }

    #[test]
    fn test_short_sequence_recorded_not_fatal() {
        let tables = vec![
            power_table(&[0.0, 0.0, 1.0, 2.0]),
            power_table(&[0.0, 0.0, 3.0, 4.0, 5.0, 4.0]),
        ];
        let batch = read_batch(&tables, &["short", "long"]).unwrap();
        let report = analyze_measurements(&batch, &Config::default()).unwrap();

        assert!(matches!(
            report.normality[0].error,
            Some(wattlog_core::StatsError::InsufficientSamples { got: 2, .. })
        ));
        assert!(report.normality[1].error.is_none());
        assert!(report.error_bands.is_some());
        assert_eq!(report.distribution_groups().count(), 3);
    }

    #[test]
    fn test_outliers_filtered_per_file() {
        let mut values = vec![0.0, 0.0];
        values.extend([10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 100.0]);
        let batch = read_batch(&[power_table(&values)], &["spiky"]).unwrap();

        let report = analyze_measurements(&batch, &Config::default()).unwrap();
        assert_eq!(report.filtered[0].removed, 1);
        assert!(!report.filtered[0].values.contains(&100.0));
        assert_eq!(report.total.removed, 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let batch = read_batch(&[power_table(&[1.0, 1.0, 1.0])], &["x"]).unwrap();
        let config = Config::default().with_outlier_threshold(0.5);
        assert!(matches!(
            analyze_measurements(&batch, &config),
            Err(Error::Config(_))
        ));
    }
}
