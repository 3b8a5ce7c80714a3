use std::path::PathBuf;

use thiserror::Error;

use denial_ingest::IngestError;
use denial_transform::TransformError;

/// Errors that end the processing of one upload.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("failed to read prediction model {path}: {source}")]
    ModelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// True for problems with the uploaded file itself.
    ///
    /// Servers map these to `400 Bad Request`; everything else is a server
    /// failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::Ingest(err) => err.is_client_error(),
            Self::Transform(TransformError::MissingColumn { .. }) => true,
            Self::Transform(_) | Self::ModelRead { .. } => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        let missing: PipelineError = IngestError::MissingUpload.into();
        assert!(missing.is_client_error());
        assert_eq!(missing.to_string(), "no file part in request");

        let io = PipelineError::ModelRead {
            path: PathBuf::from("denial_model.joblib"),
            source: std::io::Error::other("denied"),
        };
        assert!(!io.is_client_error());
    }
}
