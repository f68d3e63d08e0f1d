use std::path::Path;
use std::time::Instant;

use polars::prelude::{AnyValue, Column, CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info, warn};

use kpi_model::{CombinedRecord, RecordKind};

use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_f64, any_to_i64, any_to_string, find_column};

/// Records loaded from a combined historical + forecast file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    pub records: Vec<CombinedRecord>,
    /// Whether the source carried a `type` column at all.
    pub has_type_column: bool,
}

impl CombinedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

struct Columns<'a> {
    account_id: &'a Column,
    english_name: &'a Column,
    year: &'a Column,
    month: &'a Column,
    monthly_value: &'a Column,
    kind: Option<&'a Column>,
}

fn required<'a>(path: &Path, df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    find_column(df, name).ok_or_else(|| IngestError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

fn cell<'a>(path: &Path, column: &'a Column, idx: usize) -> Result<AnyValue<'a>> {
    column
        .get(idx)
        .map_err(|source| IngestError::polars(path, source))
}

fn invalid(path: &Path, idx: usize, column: &str, value: String) -> IngestError {
    IngestError::InvalidValue {
        path: path.to_path_buf(),
        // Line 1 is the header.
        line: idx as u64 + 2,
        column: column.to_string(),
        value,
    }
}

/// Load a combined series file such as the one written by the forecast step.
///
/// Every cell is read as text so identifiers like `007` keep their leading
/// zeros. `monthly_value` may be blank; `type` is optional as a column and
/// unrecognized values map to `None`.
pub fn read_combined_csv(path: &Path) -> Result<CombinedTable> {
    let start = Instant::now();
    if !path.exists() {
        return Err(IngestError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|source| IngestError::polars(path, source))?
        .finish()
        .map_err(|source| IngestError::polars(path, source))?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "combined frame read"
    );

    let columns = Columns {
        account_id: required(path, &df, "account_id")?,
        english_name: required(path, &df, "english_name")?,
        year: required(path, &df, "year")?,
        month: required(path, &df, "month")?,
        monthly_value: required(path, &df, "monthly_value")?,
        kind: find_column(&df, "type"),
    };

    let mut records = Vec::with_capacity(df.height());
    let mut unrecognized_kinds = 0usize;
    for idx in 0..df.height() {
        let year_cell = cell(path, columns.year, idx)?;
        let year = any_to_i64(year_cell.clone())
            .and_then(|year| i32::try_from(year).ok())
            .ok_or_else(|| invalid(path, idx, "year", any_to_string(year_cell)))?;

        let month_cell = cell(path, columns.month, idx)?;
        let month = any_to_i64(month_cell.clone())
            .and_then(|month| u32::try_from(month).ok())
            .ok_or_else(|| invalid(path, idx, "month", any_to_string(month_cell)))?;

        let value_cell = cell(path, columns.monthly_value, idx)?;
        let monthly_value = match any_to_f64(value_cell.clone()) {
            Some(value) => Some(value),
            None => {
                let raw = any_to_string(value_cell);
                if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
                    None
                } else {
                    return Err(invalid(path, idx, "monthly_value", raw));
                }
            }
        };

        let kind = match columns.kind {
            Some(column) => {
                let raw = any_to_string(cell(path, column, idx)?);
                let parsed = raw.parse::<RecordKind>().ok();
                if parsed.is_none() && !raw.is_empty() {
                    unrecognized_kinds += 1;
                }
                parsed
            }
            None => None,
        };

        records.push(CombinedRecord {
            account_id: any_to_string(cell(path, columns.account_id, idx)?),
            english_name: any_to_string(cell(path, columns.english_name, idx)?),
            year,
            month,
            monthly_value,
            kind,
        });
    }

    if unrecognized_kinds > 0 {
        warn!(
            path = %path.display(),
            rows = unrecognized_kinds,
            "rows with an unrecognized type value"
        );
    }
    info!(
        path = %path.display(),
        rows = records.len(),
        has_type_column = columns.kind.is_some(),
        duration_ms = start.elapsed().as_millis(),
        "combined data loaded"
    );

    Ok(CombinedTable {
        records,
        has_type_column: columns.kind.is_some(),
    })
}
