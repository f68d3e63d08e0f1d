use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KpiError {
    #[error("invalid calendar month: year {year}, month {month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[error("unknown record type: {0}")]
    UnknownRecordKind(String),
}

pub type Result<T> = std::result::Result<T, KpiError>;
