//! JSON serialization for analysis reports.

use serde::Serialize;

/// Render a measurement or comparison report as single-line JSON.
///
/// Field names follow the report's serde renames (`NAME`, `TOTAL ENERGY`, ...).
///
/// # Errors
///
/// Propagates the `serde_json` error.
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Indented variant of [`to_json`], used by `--pretty`.
///
/// # Errors
///
/// Same as [`to_json`].
pub fn to_json_pretty<T: Serialize + ?Sized>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
