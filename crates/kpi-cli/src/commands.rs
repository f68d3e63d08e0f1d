use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use kpi_cli::pipeline::{build_report, correlation_stage, forecast_stage};
use kpi_cli::types::{CorrelationPaths, ForecastPaths, RunResult, resolve_output};
use kpi_output::write_run_report;

use crate::cli::{CommonArgs, CorrelateArgs, ForecastArgs, RunArgs};

pub fn run_forecast(args: &ForecastArgs) -> Result<RunResult> {
    let options = args.model.to_options();
    let output_dir = args.common.output_dir.as_deref();
    let paths = ForecastPaths {
        forecast: resolve_output(output_dir, &args.forecast_output),
        combined: resolve_output(output_dir, &args.combined_output),
    };

    let progress = training_progress(options.n_estimators as u64, &args.common);
    let forecast = forecast_stage(&args.input, &paths, &options, |done| {
        progress.set_position(done as u64);
    });
    progress.finish_and_clear();

    let mut result = RunResult {
        forecast: Some(forecast?),
        ..RunResult::default()
    };
    write_report(&mut result, &args.common)?;
    Ok(result)
}

pub fn run_correlate(args: &CorrelateArgs) -> Result<RunResult> {
    let options = args.correlation.to_options();
    let output_dir = args.common.output_dir.as_deref();
    let paths = CorrelationPaths {
        matrix: resolve_output(output_dir, &args.matrix_output),
        long: resolve_output(output_dir, &args.long_output),
    };

    let mut result = RunResult {
        correlation: Some(correlation_stage(&args.input, &paths, &options)?),
        ..RunResult::default()
    };
    write_report(&mut result, &args.common)?;
    Ok(result)
}

pub fn run_all(args: &RunArgs) -> Result<RunResult> {
    let forecast_options = args.model.to_options();
    let correlation_options = args.correlation.to_options();
    // Fail on bad correlation flags before spending time on training.
    correlation_options
        .validate()
        .context("invalid correlation options")?;

    let output_dir = args.common.output_dir.as_deref();
    let forecast_paths = ForecastPaths {
        forecast: resolve_output(output_dir, &args.forecast_output),
        combined: resolve_output(output_dir, &args.combined_output),
    };
    let correlation_paths = CorrelationPaths {
        matrix: resolve_output(output_dir, &args.matrix_output),
        long: resolve_output(output_dir, &args.long_output),
    };

    let progress = training_progress(forecast_options.n_estimators as u64, &args.common);
    let forecast = forecast_stage(&args.input, &forecast_paths, &forecast_options, |done| {
        progress.set_position(done as u64);
    });
    progress.finish_and_clear();
    let forecast = forecast?;

    let correlation = correlation_stage(
        &forecast_paths.combined,
        &correlation_paths,
        &correlation_options,
    )?;

    let mut result = RunResult {
        forecast: Some(forecast),
        correlation: Some(correlation),
        report: None,
    };
    write_report(&mut result, &args.common)?;
    Ok(result)
}

fn write_report(result: &mut RunResult, common: &CommonArgs) -> Result<()> {
    let Some(path) = common.report.as_deref() else {
        return Ok(());
    };
    let report = build_report(result);
    write_run_report(path, &report)
        .with_context(|| format!("write run report {}", path.display()))?;
    result.report = Some(path.to_path_buf());
    Ok(())
}

/// A per-tree progress bar on stderr; hidden when stderr is not a terminal
/// or `--no-progress` is given.
fn training_progress(trees: u64, common: &CommonArgs) -> ProgressBar {
    if common.no_progress || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(trees);
    if let Ok(style) =
        ProgressStyle::with_template("training {bar:40.cyan/blue} {pos}/{len} trees ({elapsed})")
    {
        bar.set_style(style);
    }
    bar
}
