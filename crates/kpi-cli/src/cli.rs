//! CLI argument definitions for the KPI toolkit.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use kpi_model::{
    CorrelationOptions, DEFAULT_COMBINED_FILE, DEFAULT_FORECAST_FILE, DEFAULT_HISTORICAL_FILE,
    DEFAULT_LONG_FILE, DEFAULT_MATRIX_FILE, ForecastOptions,
};

#[derive(Parser)]
#[command(
    name = "kpi-forecast",
    version,
    about = "Forecast monthly KPI values and correlate KPIs over time",
    long_about = "Forecast monthly per-account KPI values with a random forest, then \
                  compute pairwise Pearson correlations between KPIs.\n\n\
                  `run` executes both steps; the forecast step's combined \
                  historical + forecast file feeds the correlation step."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Train on historical data and write forecast and combined files.
    Forecast(ForecastArgs),

    /// Correlate KPIs from a combined historical + forecast file.
    Correlate(CorrelateArgs),

    /// Forecast, then correlate the combined output.
    Run(RunArgs),
}

#[derive(Args)]
pub struct ForecastArgs {
    /// Historical KPI file.
    #[arg(long = "input", value_name = "CSV", default_value = DEFAULT_HISTORICAL_FILE)]
    pub input: PathBuf,

    /// Forecast output file.
    #[arg(long = "forecast-output", value_name = "CSV", default_value = DEFAULT_FORECAST_FILE)]
    pub forecast_output: PathBuf,

    /// Combined historical + forecast output file.
    #[arg(long = "combined-output", value_name = "CSV", default_value = DEFAULT_COMBINED_FILE)]
    pub combined_output: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct CorrelateArgs {
    /// Combined historical + forecast file.
    #[arg(long = "input", value_name = "CSV", default_value = DEFAULT_COMBINED_FILE)]
    pub input: PathBuf,

    /// Wide correlation matrix output file.
    #[arg(long = "matrix-output", value_name = "CSV", default_value = DEFAULT_MATRIX_FILE)]
    pub matrix_output: PathBuf,

    /// Long (KPI1, KPI2, Correlation) output file.
    #[arg(long = "long-output", value_name = "CSV", default_value = DEFAULT_LONG_FILE)]
    pub long_output: PathBuf,

    #[command(flatten)]
    pub correlation: CorrelationArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args)]
pub struct RunArgs {
    /// Historical KPI file.
    #[arg(long = "input", value_name = "CSV", default_value = DEFAULT_HISTORICAL_FILE)]
    pub input: PathBuf,

    /// Forecast output file.
    #[arg(long = "forecast-output", value_name = "CSV", default_value = DEFAULT_FORECAST_FILE)]
    pub forecast_output: PathBuf,

    /// Combined output file, also the correlation input.
    #[arg(long = "combined-output", value_name = "CSV", default_value = DEFAULT_COMBINED_FILE)]
    pub combined_output: PathBuf,

    /// Wide correlation matrix output file.
    #[arg(long = "matrix-output", value_name = "CSV", default_value = DEFAULT_MATRIX_FILE)]
    pub matrix_output: PathBuf,

    /// Long (KPI1, KPI2, Correlation) output file.
    #[arg(long = "long-output", value_name = "CSV", default_value = DEFAULT_LONG_FILE)]
    pub long_output: PathBuf,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub correlation: CorrelationArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Model and future-horizon settings. Unset flags keep the library defaults.
#[derive(Args)]
pub struct ModelArgs {
    /// Year of the generated future rows (default: 2025).
    #[arg(long = "future-year", value_name = "YEAR")]
    pub future_year: Option<i32>,

    /// Comma-separated future months (default: 1,2,3).
    #[arg(long = "future-months", value_name = "MONTHS", value_delimiter = ',')]
    pub future_months: Option<Vec<u32>>,

    /// Fraction of rows held out for evaluation (default: 0.2).
    #[arg(long = "test-ratio", value_name = "RATIO")]
    pub test_ratio: Option<f64>,

    /// Number of trees (default: 200).
    #[arg(long = "n-estimators", value_name = "N")]
    pub n_estimators: Option<usize>,

    /// Maximum tree depth (default: unlimited).
    #[arg(long = "max-depth", value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Seed for the split and the bootstrap samples (default: 42).
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
}

impl ModelArgs {
    pub fn to_options(&self) -> ForecastOptions {
        let mut options = ForecastOptions::default();
        if let Some(year) = self.future_year {
            options = options.with_future_year(year);
        }
        if let Some(months) = &self.future_months {
            options = options.with_future_months(months.clone());
        }
        if let Some(ratio) = self.test_ratio {
            options = options.with_test_ratio(ratio);
        }
        if let Some(n_estimators) = self.n_estimators {
            options = options.with_n_estimators(n_estimators);
        }
        if self.max_depth.is_some() {
            options = options.with_max_depth(self.max_depth);
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}

#[derive(Args)]
pub struct CorrelationArgs {
    /// Keep forecast rows in the correlation input.
    #[arg(long = "include-forecast")]
    pub include_forecast: bool,

    /// Minimum overlapping months for a coefficient (default: 1).
    #[arg(long = "min-periods", value_name = "N")]
    pub min_periods: Option<usize>,
}

impl CorrelationArgs {
    pub fn to_options(&self) -> CorrelationOptions {
        let mut options = CorrelationOptions::default().with_historical_only(!self.include_forecast);
        if let Some(min_periods) = self.min_periods {
            options = options.with_min_periods(min_periods);
        }
        options
    }
}

#[derive(Args)]
pub struct CommonArgs {
    /// Directory for relative output paths.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write a JSON run report to this path.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Rows shown in the console sample tables.
    #[arg(long = "sample-rows", value_name = "N", default_value_t = 5)]
    pub sample_rows: usize,

    /// Disable the training progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
