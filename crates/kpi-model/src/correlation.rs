use serde::{Deserialize, Serialize};

/// Square KPI × KPI correlation matrix.
///
/// Rows and columns share the same labels in the same order. A `None` cell
/// means the correlation is undefined for that pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    labels: Vec<String>,
    values: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    /// Build a matrix from row-major values.
    ///
    /// Returns `None` when `values.len()` is not `labels.len()²`.
    pub fn from_row_major(labels: Vec<String>, values: Vec<Option<f64>>) -> Option<Self> {
        (values.len() == labels.len() * labels.len()).then_some(Self { labels, values })
    }

    /// Build a matrix by evaluating `cell(row, col)` for every position.
    pub fn from_fn<F>(labels: Vec<String>, mut cell: F) -> Self
    where
        F: FnMut(usize, usize) -> Option<f64>,
    {
        let n = labels.len();
        let values = (0..n * n).map(|idx| cell(idx / n, idx % n)).collect();
        Self { labels, values }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let n = self.labels.len();
        if row >= n || col >= n {
            return None;
        }
        self.values[row * n + col]
    }

    /// Row `row` as a slice, in label order.
    pub fn row(&self, row: usize) -> &[Option<f64>] {
        let n = self.labels.len();
        &self.values[row * n..(row + 1) * n]
    }
}

/// One row of the long (tidy) correlation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    #[serde(rename = "KPI1")]
    pub kpi1: String,
    #[serde(rename = "KPI2")]
    pub kpi2: String,
    #[serde(rename = "Correlation")]
    pub correlation: Option<f64>,
}

/// Axis label for matrix rows (and the first header cell of the wide file).
pub const ROW_AXIS_LABEL: &str = "KPI1";
/// Axis label for matrix columns.
pub const COLUMN_AXIS_LABEL: &str = "KPI2";

/// Column order of the long correlation file.
pub const CORRELATION_LONG_COLUMNS: [&str; 3] = ["KPI1", "KPI2", "Correlation"];
