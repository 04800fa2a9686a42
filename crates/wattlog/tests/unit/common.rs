//! Shared fixtures for the integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `<dir>/<name>` and return its path.
pub fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// A power-convention log with `Time` at `step_ms` spacing.
pub fn power_csv(column: &str, step_ms: u64, watts: &[f64]) -> String {
    let mut out = format!("Time,Delta,{}\n", column);
    for (i, w) in watts.iter().enumerate() {
        let delta = if i == 0 { 0 } else { step_ms };
        out.push_str(&format!("{},{},{}\n", i as u64 * step_ms, delta, w));
    }
    out
}

/// An energy-convention log from cumulative counter readings.
pub fn energy_csv(column: &str, step_ms: u64, joules: &[f64]) -> String {
    let mut out = format!("Time,{}\n", column);
    for (i, j) in joules.iter().enumerate() {
        out.push_str(&format!("{},{}\n", i as u64 * step_ms, j));
    }
    out
}
