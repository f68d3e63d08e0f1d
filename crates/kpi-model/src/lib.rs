//! Shared data model for the KPI forecast and correlation pipelines.

pub mod correlation;
pub mod error;
pub mod options;
pub mod period;
pub mod records;

pub use correlation::{
    COLUMN_AXIS_LABEL, CORRELATION_LONG_COLUMNS, CorrelationEntry, CorrelationMatrix,
    ROW_AXIS_LABEL,
};
pub use error::{KpiError, Result};
pub use options::{
    CorrelationOptions, DEFAULT_COMBINED_FILE, DEFAULT_FORECAST_FILE, DEFAULT_HISTORICAL_FILE,
    DEFAULT_LONG_FILE, DEFAULT_MATRIX_FILE, ForecastOptions,
};
pub use period::YearMonth;
pub use records::{
    COMBINED_COLUMNS, CombinedRecord, FORECAST_COLUMNS, ForecastRecord, HISTORICAL_COLUMNS,
    HistoricalRecord, RecordKind,
};
