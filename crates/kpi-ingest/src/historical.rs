use std::fs::File;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use kpi_model::{HISTORICAL_COLUMNS, HistoricalRecord};

use crate::error::{IngestError, Result};

/// Collapse inner whitespace and strip surrounding whitespace and a UTF-8 BOM.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_headers(raw: &StringRecord) -> StringRecord {
    raw.iter().map(normalize_header).collect()
}

fn require_columns(path: &Path, headers: &StringRecord, required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(IngestError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

/// Load the historical KPI file.
///
/// The header row is required and must name every column in
/// [`HISTORICAL_COLUMNS`]; extra columns are ignored. Months must be 1–12.
pub fn read_historical_csv(path: &Path) -> Result<Vec<HistoricalRecord>> {
    let start = Instant::now();
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| IngestError::io(path, source))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers = normalize_headers(
        reader
            .headers()
            .map_err(|source| IngestError::csv(path, source))?,
    );
    require_columns(path, &headers, &HISTORICAL_COLUMNS)?;
    debug!(path = %path.display(), columns = headers.len(), "historical headers");
    reader.set_headers(headers);

    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<HistoricalRecord>().enumerate() {
        let record = row.map_err(|source| IngestError::csv(path, source))?;
        if !(1..=12).contains(&record.month) {
            return Err(IngestError::InvalidValue {
                path: path.to_path_buf(),
                // Line 1 is the header.
                line: idx as u64 + 2,
                column: "month".to_string(),
                value: record.month.to_string(),
            });
        }
        records.push(record);
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        duration_ms = start.elapsed().as_millis(),
        "historical data loaded"
    );
    Ok(records)
}
