//! Configuration options for the forecast and correlation pipelines.

use serde::{Deserialize, Serialize};

use crate::error::{KpiError, Result};

pub const DEFAULT_HISTORICAL_FILE: &str = "FS-Data_80475.csv";
pub const DEFAULT_FORECAST_FILE: &str = "forecast_random_forest.csv";
pub const DEFAULT_COMBINED_FILE: &str = "historical_plus_forecast.csv";
pub const DEFAULT_MATRIX_FILE: &str = "correlation_matrix.csv";
pub const DEFAULT_LONG_FILE: &str = "correlation_long.csv";

/// Options controlling model training and future-row generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOptions {
    /// Year stamped on every generated future row.
    pub future_year: i32,
    /// Months (1–12) generated for each observed (account, KPI) pair.
    pub future_months: Vec<u32>,
    /// Fraction of rows held out for evaluation, in (0, 1).
    pub test_ratio: f64,
    /// Number of trees in the ensemble.
    pub n_estimators: usize,
    /// Depth limit per tree; `None` grows trees until leaves are pure.
    pub max_depth: Option<usize>,
    /// Seed for both the train/test shuffle and the bootstrap samples.
    pub seed: u64,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            future_year: 2025,
            future_months: vec![1, 2, 3],
            test_ratio: 0.2,
            n_estimators: 200,
            max_depth: None,
            seed: 42,
        }
    }
}

impl ForecastOptions {
    pub fn with_future_year(mut self, year: i32) -> Self {
        self.future_year = year;
        self
    }

    pub fn with_future_months(mut self, months: Vec<u32>) -> Self {
        self.future_months = months;
        self
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check option ranges before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`KpiError::InvalidOptions`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(KpiError::InvalidOptions(format!(
                "test ratio must be between 0 and 1 (exclusive), got {}",
                self.test_ratio
            )));
        }
        if self.n_estimators == 0 {
            return Err(KpiError::InvalidOptions(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(KpiError::InvalidOptions(
                "max_depth must be at least 1 when set".to_string(),
            ));
        }
        if self.future_months.is_empty() {
            return Err(KpiError::InvalidOptions(
                "at least one future month is required".to_string(),
            ));
        }
        if let Some(month) = self
            .future_months
            .iter()
            .find(|month| !(1..=12).contains(*month))
        {
            return Err(KpiError::InvalidOptions(format!(
                "future month {month} is outside 1-12"
            )));
        }
        Ok(())
    }
}

/// Options controlling the correlation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationOptions {
    /// Drop forecast rows before pivoting (applied only when the input
    /// carries a `type` column).
    pub historical_only: bool,
    /// Minimum number of overlapping months for a pair to get a coefficient.
    pub min_periods: usize,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            historical_only: true,
            min_periods: 1,
        }
    }
}

impl CorrelationOptions {
    pub fn with_historical_only(mut self, enable: bool) -> Self {
        self.historical_only = enable;
        self
    }

    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = min_periods;
        self
    }

    /// # Errors
    ///
    /// Returns [`KpiError::InvalidOptions`] when `min_periods` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.min_periods == 0 {
            return Err(KpiError::InvalidOptions(
                "min_periods must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
