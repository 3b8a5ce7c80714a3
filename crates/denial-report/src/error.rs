use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("rendered markup is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
