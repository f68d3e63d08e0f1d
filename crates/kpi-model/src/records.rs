//! Row types exchanged between the forecast and correlation pipelines.
//!
//! Field names match the CSV column names, so every type here can be read
//! and written with `csv` + `serde` without renaming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KpiError;

/// One observed monthly KPI value for an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub account_id: String,
    /// KPI name.
    pub english_name: String,
    pub year: i32,
    pub month: u32,
    pub monthly_value: f64,
}

/// A predicted monthly KPI value for an (account, KPI) pair seen historically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub account_id: String,
    pub english_name: String,
    pub year: i32,
    pub month: u32,
    pub predicted_monthly_value: f64,
}

/// Discriminator for rows in the combined series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Historical,
    Forecast,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Historical => "historical",
            Self::Forecast => "forecast",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = KpiError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("historical") {
            Ok(Self::Historical)
        } else if trimmed.eq_ignore_ascii_case("forecast") {
            Ok(Self::Forecast)
        } else {
            Err(KpiError::UnknownRecordKind(trimmed.to_string()))
        }
    }
}

/// Row of the combined historical + forecast series.
///
/// This is the contract between the two pipelines. `monthly_value` is
/// optional because the combined file may be edited or produced elsewhere;
/// `kind` is `None` when the source has no `type` column or carries a value
/// other than `historical`/`forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRecord {
    pub account_id: String,
    pub english_name: String,
    pub year: i32,
    pub month: u32,
    pub monthly_value: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<RecordKind>,
}

impl CombinedRecord {
    pub fn historical(record: &HistoricalRecord) -> Self {
        Self {
            account_id: record.account_id.clone(),
            english_name: record.english_name.clone(),
            year: record.year,
            month: record.month,
            monthly_value: Some(record.monthly_value),
            kind: Some(RecordKind::Historical),
        }
    }

    pub fn forecast(record: &ForecastRecord) -> Self {
        Self {
            account_id: record.account_id.clone(),
            english_name: record.english_name.clone(),
            year: record.year,
            month: record.month,
            monthly_value: Some(record.predicted_monthly_value),
            kind: Some(RecordKind::Forecast),
        }
    }

    pub fn is_historical(&self) -> bool {
        self.kind == Some(RecordKind::Historical)
    }
}

/// Column order of the historical input file.
pub const HISTORICAL_COLUMNS: [&str; 5] =
    ["account_id", "english_name", "year", "month", "monthly_value"];

/// Column order of the forecast output file.
pub const FORECAST_COLUMNS: [&str; 5] = [
    "account_id",
    "english_name",
    "year",
    "month",
    "predicted_monthly_value",
];

/// Column order of the combined historical + forecast file.
pub const COMBINED_COLUMNS: [&str; 6] = [
    "account_id",
    "english_name",
    "year",
    "month",
    "monthly_value",
    "type",
];
