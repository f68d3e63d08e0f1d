//! File-to-file pipeline stages.
//!
//! Each stage loads its input, runs the library pipeline, writes its
//! outputs and hashes them. The forecast stage's combined file is the only
//! hand-off between the two.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use kpi_correlate::run_correlation;
use kpi_forecast::run_forecast_with_progress;
use kpi_ingest::{read_combined_csv, read_historical_csv};
use kpi_model::{CorrelationOptions, ForecastOptions};
use kpi_output::{
    Artifact, CorrelationSummary, ForecastSummary, RunReport, write_combined_csv,
    write_correlation_long_csv, write_correlation_matrix_csv, write_forecast_csv,
};

use crate::types::{CorrelationPaths, CorrelationRun, ForecastPaths, ForecastRun, RunResult};

/// Load history from `input`, train, forecast and write both output files.
pub fn forecast_stage<P>(
    input: &Path,
    paths: &ForecastPaths,
    options: &ForecastOptions,
    on_tree: P,
) -> Result<ForecastRun>
where
    P: FnMut(usize),
{
    let span = info_span!("forecast_stage", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let history = read_historical_csv(input)
        .with_context(|| format!("load historical data from {}", input.display()))?;
    let outcome =
        run_forecast_with_progress(&history, options, on_tree).context("forecast pipeline")?;

    write_forecast_csv(&paths.forecast, &outcome.forecasts).context("write forecast output")?;
    write_combined_csv(&paths.combined, &outcome.combined).context("write combined output")?;
    let artifacts = vec![
        Artifact::from_file("forecast", &paths.forecast, outcome.forecasts.len())?,
        Artifact::from_file("combined", &paths.combined, outcome.combined.len())?,
    ];

    info!(
        historical_rows = history.len(),
        forecast_rows = outcome.forecasts.len(),
        duration_ms = start.elapsed().as_millis(),
        "forecast stage complete"
    );
    Ok(ForecastRun {
        input: input.to_path_buf(),
        options: options.clone(),
        historical_rows: history.len(),
        outcome,
        artifacts,
    })
}

/// Load a combined series from `input`, correlate and write both tables.
pub fn correlation_stage(
    input: &Path,
    paths: &CorrelationPaths,
    options: &CorrelationOptions,
) -> Result<CorrelationRun> {
    let span = info_span!("correlation_stage", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let table = read_combined_csv(input)
        .with_context(|| format!("load combined series from {}", input.display()))?;
    let outcome = run_correlation(&table.records, table.has_type_column, options)
        .context("correlation pipeline")?;

    write_correlation_matrix_csv(&paths.matrix, &outcome.matrix)
        .context("write correlation matrix")?;
    write_correlation_long_csv(&paths.long, &outcome.entries)
        .context("write long correlation table")?;
    let artifacts = vec![
        Artifact::from_file("correlation_matrix", &paths.matrix, outcome.matrix.len())?,
        Artifact::from_file("correlation_long", &paths.long, outcome.entries.len())?,
    ];

    info!(
        input_rows = table.len(),
        kpis = outcome.matrix.len(),
        duration_ms = start.elapsed().as_millis(),
        "correlation stage complete"
    );
    Ok(CorrelationRun {
        input: input.to_path_buf(),
        options: options.clone(),
        input_rows: table.len(),
        outcome,
        artifacts,
    })
}

/// Summarize a finished run as a JSON report payload.
pub fn build_report(result: &RunResult) -> RunReport {
    let mut report = RunReport::new();
    report.forecast = result.forecast.as_ref().map(|run| {
        let metrics = &run.outcome.metrics;
        ForecastSummary {
            options: run.options.clone(),
            r2: metrics.r2,
            mae: metrics.mae,
            rmse: metrics.rmse,
            train_rows: metrics.train_rows,
            test_rows: metrics.test_rows,
            accounts: run.outcome.accounts,
            kpis: run.outcome.kpis,
            historical_rows: run.historical_rows,
            forecast_rows: run.outcome.forecasts.len(),
            combined_rows: run.outcome.combined.len(),
        }
    });
    report.correlation = result.correlation.as_ref().map(|run| CorrelationSummary {
        options: run.options.clone(),
        input_rows: run.input_rows,
        rows_used: run.outcome.rows_used,
        periods: run.outcome.pivot.periods().len(),
        kpis: run.outcome.matrix.len(),
        pairs: run.outcome.entries.len(),
        undefined_pairs: run.outcome.undefined_pairs,
    });
    report.artifacts = result.artifacts().cloned().collect();
    report
}
