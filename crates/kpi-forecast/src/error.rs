use kpi_model::KpiError;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("unknown {field} '{value}': not present in the historical data")]
    UnknownCategory { field: String, value: String },

    #[error("at least 2 historical rows are needed to train, got {rows}")]
    InsufficientData { rows: usize },

    #[error("train/test split left an empty partition (train {train}, test {test})")]
    EmptyPartition { train: usize, test: usize },

    #[error(transparent)]
    Model(#[from] KpiError),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
