//! Error types for claims ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::csv::DetectionError;

/// Errors that can occur while accepting and loading a claims file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// The request carried no file part.
    #[error("no file part in request")]
    MissingUpload,

    /// A file part was present but had no filename.
    #[error("no file selected")]
    EmptyFilename,

    /// The filename does not end in `.csv`.
    #[error("unsupported file '{filename}': only .csv uploads are accepted")]
    WrongExtension { filename: String },

    /// The upload is not UTF-8 text.
    #[error("{filename} is not valid UTF-8: {source}")]
    InvalidEncoding {
        filename: String,
        #[source]
        source: std::str::Utf8Error,
    },

    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is too large ({size} bytes, limit {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Header Detection Errors ===
    #[error(transparent)]
    HeaderNotDetected(#[from] DetectionError),

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// True when the error was caused by what the client sent rather than by
    /// the server environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingUpload
                | Self::EmptyFilename
                | Self::WrongExtension { .. }
                | Self::InvalidEncoding { .. }
                | Self::FileTooLarge { .. }
                | Self::HeaderNotDetected(_)
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
