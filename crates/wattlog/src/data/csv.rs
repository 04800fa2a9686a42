//! CSV parsing for measurement logs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;
use wattlog_core::types::TIME_HEADER;
use wattlog_core::{FormatIssue, MeasurementTable, QuantityColumn};

use super::{display_name, DataError, LoadedFile};

/// Load a measurement table from a CSV file.
///
/// # Errors
/// Returns `DataError` if the file cannot be read or parsed, or lacks a
/// recognized column layout.
pub fn load_measurement_csv(path: &Path) -> Result<LoadedFile, DataError> {
    let name = display_name(path);
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_measurement_csv(file, &name)?;
    Ok(LoadedFile { name, table })
}

/// Parse a measurement table from any reader. `name` is used in errors.
///
/// Headers are matched after trimming whitespace. Blank records are skipped.
pub fn parse_measurement_csv<R: Read>(reader: R, name: &str) -> Result<MeasurementTable, DataError> {
    let csv_error = |source| DataError::Csv {
        name: name.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let header_names: Vec<&str> = headers.iter().collect();

    let format_error = |issue| DataError::UnrecognizedFormat {
        name: name.to_string(),
        issue,
    };
    let quantity = QuantityColumn::detect(&header_names).ok_or_else(|| {
        format_error(FormatIssue::MissingQuantityColumn {
            found: header_names.iter().map(|h| h.to_string()).collect(),
        })
    })?;
    let time_idx = column_index(&headers, TIME_HEADER)
        .ok_or_else(|| format_error(FormatIssue::MissingTimeColumn))?;
    let value_idx = column_index(&headers, quantity.header()).ok_or_else(|| {
        format_error(FormatIssue::MissingQuantityColumn {
            found: header_names.iter().map(|h| h.to_string()).collect(),
        })
    })?;

    let mut time_ms = Vec::new();
    let mut values = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_error)?;

        // Skip blank records
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        time_ms.push(parse_cell(&record, time_idx, TIME_HEADER, line, name)?);
        values.push(parse_cell(&record, value_idx, quantity.header(), line, name)?);
    }

    debug!(
        file = name,
        column = %quantity,
        convention = %quantity.convention(),
        rows = time_ms.len(),
        "parsed measurement csv"
    );

    Ok(MeasurementTable::new(time_ms, quantity, values))
}

fn column_index(headers: &StringRecord, wanted: &str) -> Option<usize> {
    headers.iter().position(|h| h == wanted)
}

fn parse_cell(
    record: &StringRecord,
    idx: usize,
    column: &str,
    line: u64,
    name: &str,
) -> Result<f64, DataError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::InvalidValue {
            name: name.to_string(),
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}
