//! Two-dataset comparison from CSV files.

use tempfile::TempDir;
use wattlog::data::load_batch;
use wattlog::{compare_datasets, Config};

use crate::common::{power_csv, write_csv};

const COLUMN: &str = "CPU_POWER (Watts)";

#[test]
fn identical_datasets_not_significant() {
    let dir = TempDir::new().unwrap();
    let watts = [0.0, 0.0, 10.0, 11.0, 9.5, 10.5, 12.0, 10.2, 9.8];
    let first = vec![
        write_csv(&dir, "a1.csv", &power_csv(COLUMN, 1000, &watts)),
        write_csv(&dir, "a2.csv", &power_csv(COLUMN, 1000, &watts)),
    ];
    let second = vec![
        write_csv(&dir, "b1.csv", &power_csv(COLUMN, 1000, &watts)),
        write_csv(&dir, "b2.csv", &power_csv(COLUMN, 1000, &watts)),
    ];

    let config = Config::default();
    let report = compare_datasets(
        &load_batch(&first, &config).unwrap(),
        &load_batch(&second, &config).unwrap(),
        &config,
    )
    .unwrap();

    assert_eq!(report.welch.significant, Some(false));
    assert_eq!(report.mann_whitney.significant, Some(false));
    assert!(report.welch.result.unwrap().p_value >= 0.05);
    assert!(report.mann_whitney.result.unwrap().p_value >= 0.05);
    assert!(report.verdicts()[0].contains("no significant difference"));
}

#[test]
fn heavier_workload_detected() {
    let dir = TempDir::new().unwrap();
    let idle = [0.0, 0.0, 5.0, 5.2, 4.9, 5.1, 5.0, 4.8, 5.3, 5.0];
    let busy = [0.0, 0.0, 25.0, 26.0, 24.5, 25.5, 25.2, 24.8, 25.1, 25.9];
    let first = vec![write_csv(&dir, "busy.csv", &power_csv(COLUMN, 100, &busy))];
    let second = vec![write_csv(&dir, "idle.csv", &power_csv(COLUMN, 100, &idle))];

    let config = Config::default();
    let report = compare_datasets(
        &load_batch(&first, &config).unwrap(),
        &load_batch(&second, &config).unwrap(),
        &config,
    )
    .unwrap();

    assert_eq!(report.welch.significant, Some(true));
    assert_eq!(report.mann_whitney.significant, Some(true));
    assert_eq!(report.dominance_percent, 100.0);
    assert_eq!(report.means.names, vec!["Set #1", "Set #2"]);
    assert!(report.first.total_energies[0].joules > report.second.total_energies[0].joules);
}

#[test]
fn mean_series_joined_on_union_of_times() {
    let dir = TempDir::new().unwrap();
    let first = vec![write_csv(&dir, "fast.csv", &power_csv(COLUMN, 500, &[1.0; 6]))];
    let second = vec![write_csv(&dir, "slow.csv", &power_csv(COLUMN, 1000, &[2.0; 5]))];

    let config = Config::default();
    let report = compare_datasets(
        &load_batch(&first, &config).unwrap(),
        &load_batch(&second, &config).unwrap(),
        &config,
    )
    .unwrap();

    // fast: 0.0..1.5 every 0.5 s, slow: 0.0, 1.0, 2.0
    assert_eq!(report.means.times, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    assert_eq!(report.means.absent_count(0), 1);
    assert_eq!(report.means.absent_count(1), 2);
}
