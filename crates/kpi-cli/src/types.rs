use std::path::{Path, PathBuf};

use kpi_correlate::CorrelationOutcome;
use kpi_forecast::ForecastOutcome;
use kpi_model::{
    CorrelationOptions, DEFAULT_COMBINED_FILE, DEFAULT_FORECAST_FILE, DEFAULT_LONG_FILE,
    DEFAULT_MATRIX_FILE, ForecastOptions,
};
use kpi_output::Artifact;

/// Join `name` onto `output_dir` unless `name` is absolute.
pub fn resolve_output(output_dir: Option<&Path>, name: &Path) -> PathBuf {
    match output_dir {
        Some(dir) if !name.is_absolute() => dir.join(name),
        _ => name.to_path_buf(),
    }
}

/// Files written by the forecast stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastPaths {
    pub forecast: PathBuf,
    pub combined: PathBuf,
}

impl ForecastPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            forecast: dir.join(DEFAULT_FORECAST_FILE),
            combined: dir.join(DEFAULT_COMBINED_FILE),
        }
    }
}

impl Default for ForecastPaths {
    fn default() -> Self {
        Self {
            forecast: PathBuf::from(DEFAULT_FORECAST_FILE),
            combined: PathBuf::from(DEFAULT_COMBINED_FILE),
        }
    }
}

/// Files written by the correlation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationPaths {
    pub matrix: PathBuf,
    pub long: PathBuf,
}

impl CorrelationPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            matrix: dir.join(DEFAULT_MATRIX_FILE),
            long: dir.join(DEFAULT_LONG_FILE),
        }
    }
}

impl Default for CorrelationPaths {
    fn default() -> Self {
        Self {
            matrix: PathBuf::from(DEFAULT_MATRIX_FILE),
            long: PathBuf::from(DEFAULT_LONG_FILE),
        }
    }
}

#[derive(Debug)]
pub struct ForecastRun {
    pub input: PathBuf,
    pub options: ForecastOptions,
    pub historical_rows: usize,
    pub outcome: ForecastOutcome,
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug)]
pub struct CorrelationRun {
    pub input: PathBuf,
    pub options: CorrelationOptions,
    pub input_rows: usize,
    pub outcome: CorrelationOutcome,
    pub artifacts: Vec<Artifact>,
}

/// What a CLI invocation produced; either stage may be absent.
#[derive(Debug, Default)]
pub struct RunResult {
    pub forecast: Option<ForecastRun>,
    pub correlation: Option<CorrelationRun>,
    pub report: Option<PathBuf>,
}

impl RunResult {
    pub fn artifacts(&self) -> impl Iterator<Item = &Artifact> {
        let forecast = self.forecast.iter().flat_map(|run| run.artifacts.iter());
        let correlation = self
            .correlation
            .iter()
            .flat_map(|run| run.artifacts.iter());
        forecast.chain(correlation)
    }
}
