//! JSON run report.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use kpi_model::{CorrelationOptions, ForecastOptions};

use crate::digest::Artifact;
use crate::error::{OutputError, Result, ensure_parent};

pub const REPORT_SCHEMA: &str = "kpi-forecast.run-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Training and evaluation summary of a forecast run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub options: ForecastOptions,
    pub r2: f64,
    pub mae: f64,
    pub rmse: f64,
    pub train_rows: usize,
    pub test_rows: usize,
    pub accounts: usize,
    pub kpis: usize,
    pub historical_rows: usize,
    pub forecast_rows: usize,
    pub combined_rows: usize,
}

/// Shape of a correlation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    pub options: CorrelationOptions,
    pub input_rows: usize,
    pub rows_used: usize,
    pub periods: usize,
    pub kpis: usize,
    pub pairs: usize,
    pub undefined_pairs: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<CorrelationSummary>,
    pub artifacts: Vec<Artifact>,
}

impl RunReport {
    /// An empty report stamped with the current time.
    pub fn new() -> Self {
        Self {
            schema: REPORT_SCHEMA.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            forecast: None,
            correlation: None,
            artifacts: Vec::new(),
        }
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `report` as pretty JSON with a trailing newline.
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ensure_parent(path)?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| OutputError::io(path, source))?;
    info!(path = %path.display(), artifacts = report.artifacts.len(), "run report written");
    Ok(())
}
