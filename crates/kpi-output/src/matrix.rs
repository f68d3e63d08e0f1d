use std::fs::File;
use std::path::Path;

use polars::prelude::{
    Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};
use tracing::info;

use kpi_model::{CorrelationMatrix, ROW_AXIS_LABEL};

use crate::error::{OutputError, Result, ensure_parent};

/// Square matrix as a frame: a `KPI1` label column followed by one float
/// column per KPI, in matrix order. Undefined cells are null.
pub fn correlation_matrix_frame(matrix: &CorrelationMatrix) -> PolarsResult<DataFrame> {
    let labels = matrix.labels();
    let mut columns: Vec<Column> = Vec::with_capacity(labels.len() + 1);
    columns.push(Series::new(ROW_AXIS_LABEL.into(), labels.to_vec()).into_column());
    for (col, label) in labels.iter().enumerate() {
        let values: Vec<Option<f64>> = (0..labels.len()).map(|row| matrix.get(row, col)).collect();
        columns.push(Series::new(label.as_str().into(), values).into_column());
    }
    DataFrame::new(columns)
}

/// Write the wide matrix; the first header cell is `KPI1` and empty cells
/// mark undefined correlations.
pub fn write_correlation_matrix_csv(path: &Path, matrix: &CorrelationMatrix) -> Result<()> {
    let mut df =
        correlation_matrix_frame(matrix).map_err(|source| OutputError::polars(path, source))?;
    ensure_parent(path)?;
    let mut file = File::create(path).map_err(|source| OutputError::io(path, source))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|source| OutputError::polars(path, source))?;
    info!(path = %path.display(), kpis = matrix.len(), "correlation matrix written");
    Ok(())
}
