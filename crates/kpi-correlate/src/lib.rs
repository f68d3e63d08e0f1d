//! Pairwise Pearson correlation between KPIs over calendar months.
//!
//! The combined series is pivoted into a month × KPI matrix, every KPI
//! column is correlated with every other using only the months where both
//! have values, and the square result is flattened into a long table.

pub mod error;
pub mod filter;
pub mod pearson;
pub mod pipeline;
pub mod pivot;
pub mod reshape;

pub use error::{CorrelateError, Result};
pub use filter::select_rows;
pub use pearson::{correlate, pearson};
pub use pipeline::{CorrelationOutcome, run_correlation};
pub use pivot::KpiMatrix;
pub use reshape::to_long;
