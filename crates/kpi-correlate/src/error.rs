use kpi_model::KpiError;

#[derive(Debug, thiserror::Error)]
pub enum CorrelateError {
    #[error("row for '{kpi}' has an invalid period: {source}")]
    InvalidPeriod {
        kpi: String,
        #[source]
        source: KpiError,
    },

    #[error(transparent)]
    Model(#[from] KpiError),
}

pub type Result<T> = std::result::Result<T, CorrelateError>;
