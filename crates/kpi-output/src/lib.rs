//! Output generation for the KPI pipelines.
//!
//! - **Forecast and combined series**: row CSVs via `csv` + `serde`
//! - **Correlation matrix**: wide CSV built as a Polars frame
//! - **Correlation long table**: tidy `KPI1, KPI2, Correlation` CSV
//! - **Run report**: pretty JSON with artifact SHA-256 digests

mod error;

pub mod digest;
pub mod matrix;
pub mod records;
pub mod report;

pub use digest::{Artifact, compute_file_sha256};
pub use error::{OutputError, Result};
pub use matrix::{correlation_matrix_frame, write_correlation_matrix_csv};
pub use records::{write_combined_csv, write_correlation_long_csv, write_forecast_csv};
pub use report::{
    CorrelationSummary, ForecastSummary, REPORT_SCHEMA, REPORT_SCHEMA_VERSION, RunReport,
    write_run_report,
};
