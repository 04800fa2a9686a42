//! Tests for reading measurement CSV files from disk.

use tempfile::TempDir;
use wattlog::data::{display_name, load_measurement_csv};
use wattlog::{Convention, DataError, QuantityColumn};

use crate::common::{energy_csv, power_csv, write_csv};

#[test]
fn loads_power_file_with_display_name() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "idle_run.csv",
        &power_csv("SYSTEM_POWER (Watts)", 100, &[1.0, 2.0, 3.0]),
    );

    let file = load_measurement_csv(&path).unwrap();
    assert_eq!(file.name, "idle_run");
    assert_eq!(file.table.quantity, QuantityColumn::SystemPower);
    assert_eq!(file.table.convention(), Convention::Power);
    assert_eq!(file.table.time_ms, vec![0.0, 100.0, 200.0]);
    assert_eq!(display_name(&path), "idle_run");
}

#[test]
fn loads_energy_file() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "pkg.csv",
        &energy_csv("PACKAGE_ENERGY (J)", 1000, &[10.0, 12.0, 15.0]),
    );

    let file = load_measurement_csv(&path).unwrap();
    assert_eq!(file.table.quantity, QuantityColumn::PackageEnergy);
    assert_eq!(file.table.convention(), Convention::Energy);
    assert_eq!(file.table.values, vec![10.0, 12.0, 15.0]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_measurement_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, DataError::Io { .. }));
}

#[test]
fn unrecognized_columns_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "gpu.csv", "Time,GPU_POWER (Watts)\n0,1\n10,2\n");

    let err = load_measurement_csv(&path).unwrap_err();
    assert!(matches!(err, DataError::UnrecognizedFormat { .. }));
    assert!(err.to_string().contains("gpu"));
}
