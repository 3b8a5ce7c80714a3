use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("column '{column}' not found in claims frame")]
    MissingColumn { column: String },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    #[error("invalid keyword pattern for root cause '{category}': {source}")]
    Pattern {
        category: String,
        #[source]
        source: regex::Error,
    },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
