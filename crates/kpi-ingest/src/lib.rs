//! Loading of KPI series from CSV.
//!
//! The historical file is strictly typed and read with `csv` + `serde`; the
//! combined file is read through Polars because its `monthly_value` and
//! `type` columns may be blank or absent.

pub mod combined;
pub mod error;
pub mod historical;
pub mod polars_utils;

pub use combined::{CombinedTable, read_combined_csv};
pub use error::{IngestError, Result};
pub use historical::{normalize_header, read_historical_csv};
pub use polars_utils::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
