//! Tests for configuration validation at the public entry points.

use tempfile::TempDir;
use wattlog::data::load_batch;
use wattlog::{Config, ConfigError, Error};

use crate::common::{power_csv, write_csv};

#[test]
fn outlier_threshold_below_one_rejected() {
    let config = Config::new().with_outlier_threshold(0.9);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutlierThreshold { .. })
    ));
}

#[test]
fn outlier_threshold_one_valid() {
    assert!(Config::new().with_outlier_threshold(1.0).validate().is_ok());
}

#[test]
fn load_batch_checks_config_first() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "x.csv", &power_csv("CPU_POWER (Watts)", 10, &[1.0; 4]));

    let config = Config::new().with_significance_level(1.5);
    assert!(matches!(
        load_batch(&[path], &config),
        Err(Error::Config(ConfigError::SignificanceLevel(_)))
    ));
}

#[test]
fn sequential_and_parallel_agree() {
    let dir = TempDir::new().unwrap();
    let paths: Vec<_> = (1..=4)
        .map(|k| {
            let watts: Vec<f64> = (0..8).map(|i| (i * k) as f64).collect();
            write_csv(
                &dir,
                &format!("run{}.csv", k),
                &power_csv("SYSTEM_POWER (Watts)", 100 * k as u64, &watts),
            )
        })
        .collect();

    let parallel = load_batch(&paths, &Config::default()).unwrap();
    let sequential = load_batch(&paths, &Config::default().sequential()).unwrap();
    assert_eq!(parallel, sequential);
}
