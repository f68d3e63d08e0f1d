use std::path::PathBuf;

use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("CSV file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to load {path}: {source}")]
    Polars {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid {column} value '{value}' on line {line} of {path}")]
    InvalidValue {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },
}

impl IngestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn polars(path: impl Into<PathBuf>, source: PolarsError) -> Self {
        Self::Polars {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
