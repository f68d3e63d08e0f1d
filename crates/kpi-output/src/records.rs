//! Row-oriented CSV outputs written with `csv` + `serde`.

use std::fs::File;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use kpi_model::{
    COMBINED_COLUMNS, CORRELATION_LONG_COLUMNS, CombinedRecord, CorrelationEntry,
    FORECAST_COLUMNS, ForecastRecord,
};

use crate::error::{OutputError, Result, ensure_parent};

/// Write `header` followed by one serialized line per row.
///
/// The header is written explicitly so an empty table still produces a
/// well-formed file. Any existing file is replaced.
fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    ensure_parent(path)?;
    let file = File::create(path).map_err(|source| OutputError::io(path, source))?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer
        .write_record(header)
        .map_err(|source| OutputError::csv(path, source))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|source| OutputError::csv(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| OutputError::io(path, source))?;
    Ok(())
}

pub fn write_forecast_csv(path: &Path, rows: &[ForecastRecord]) -> Result<()> {
    write_rows(path, &FORECAST_COLUMNS, rows)?;
    info!(path = %path.display(), rows = rows.len(), "forecast written");
    Ok(())
}

pub fn write_combined_csv(path: &Path, rows: &[CombinedRecord]) -> Result<()> {
    write_rows(path, &COMBINED_COLUMNS, rows)?;
    info!(path = %path.display(), rows = rows.len(), "combined series written");
    Ok(())
}

pub fn write_correlation_long_csv(path: &Path, entries: &[CorrelationEntry]) -> Result<()> {
    write_rows(path, &CORRELATION_LONG_COLUMNS, entries)?;
    info!(path = %path.display(), rows = entries.len(), "long correlation table written");
    Ok(())
}
