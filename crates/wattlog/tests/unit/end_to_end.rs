//! Single-dataset pipeline: CSV files to measurement report.

use tempfile::TempDir;
use wattlog::data::load_batch;
use wattlog::output::json::to_json;
use wattlog::{analyze_measurements, BatchError, Config, Error};

use crate::common::{energy_csv, power_csv, write_csv};

#[test]
fn two_constant_power_files() {
    let dir = TempDir::new().unwrap();
    let watts = [10.0; 5];
    let paths = vec![
        write_csv(&dir, "a.csv", &power_csv("CPU_POWER (Watts)", 1000, &watts)),
        write_csv(&dir, "b.csv", &power_csv("CPU_POWER (Watts)", 1000, &watts)),
    ];

    let config = Config::default();
    let batch = load_batch(&paths, &config).unwrap();

    assert_eq!(batch.names, vec!["a", "b"]);
    for series in &batch.series {
        assert_eq!(series.times(), vec![0.0, 1.0, 2.0]);
        assert_eq!(series.powers(), vec![10.0, 10.0, 10.0]);
    }
    assert_eq!(batch.mean.powers(), vec![10.0, 10.0, 10.0]);
    for energy in &batch.total_energies {
        assert!((energy - 20.0).abs() < 1e-9);
    }

    let report = analyze_measurements(&batch, &config).unwrap();
    assert!(!report.single);
    assert!((report.mean_total_energy - 20.0).abs() < 1e-9);

    let bands = report.error_bands.as_ref().unwrap();
    assert_eq!(bands.len(), 3);
    assert!(bands.iter().all(|b| b.mean == 10.0 && b.std == Some(0.0)));

    // constant sequences pass the filter untouched
    assert_eq!(report.total.values, vec![10.0; 6]);
    assert_eq!(report.normality.len(), 2);
    assert!(report.normality.iter().all(|row| row.normal == Some(true)));
}

#[test]
fn energy_counter_total_telescopes() {
    let dir = TempDir::new().unwrap();
    let counter = [0.0, 1.0, 5.0, 7.5, 9.0, 14.0, 20.0];
    let path = write_csv(&dir, "cpu.csv", &energy_csv("CPU_ENERGY (J)", 500, &counter));

    let batch = load_batch(&[path], &Config::default()).unwrap();
    // energy[last] - energy[first retained]
    assert!((batch.total_energies[0] - 15.0).abs() < 1e-9);
    assert!(batch.is_single());

    // anchor power from the preceding raw step: (5 - 1) J / 0.5 s
    assert_eq!(batch.series[0].powers()[0], 8.0);
}

#[test]
fn one_bad_file_fails_the_batch() {
    let dir = TempDir::new().unwrap();
    let paths = vec![
        write_csv(&dir, "good.csv", &power_csv("CPU_POWER (Watts)", 1000, &[1.0; 5])),
        write_csv(&dir, "short.csv", &power_csv("CPU_POWER (Watts)", 1000, &[1.0; 2])),
    ];

    match load_batch(&paths, &Config::default()) {
        Err(Error::Batch(BatchError::Extract { name, .. })) => assert_eq!(name, "short"),
        other => panic!("expected batch extraction error, got {:?}", other),
    }
}

#[test]
fn warmup_rows_configurable() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "w.csv",
        &power_csv("CPU_POWER (Watts)", 1000, &[1.0, 2.0, 3.0]),
    );

    let batch = load_batch(&[path], &Config::default().with_warmup_rows(0)).unwrap();
    assert_eq!(batch.series[0].powers(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn report_serializes() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "solo.csv",
        &power_csv("CPU_POWER (Watts)", 250, &[5.0, 5.0, 4.0, 6.0, 5.0, 5.5]),
    );

    let config = Config::default();
    let report = analyze_measurements(&load_batch(&[path], &config).unwrap(), &config).unwrap();
    let json = to_json(&report).unwrap();

    assert!(json.contains("\"single\":true"));
    assert!(json.contains("\"error_bands\":null"));
    assert!(json.contains("\"FILE\":\"solo\""));
}
