//! Handle for the optional pre-trained prediction artifact.
//!
//! The artifact is loaded once at start-up and shared read-only. Its contents
//! are opaque to the dashboard: only the path, size, and SHA-256 digest are
//! recorded so the report can say which model was present.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{PipelineError, Result};

/// Default artifact location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "denial_model.joblib";

/// Environment variable overriding the artifact location.
pub const MODEL_PATH_ENV: &str = "DENIAL_MODEL_PATH";

const BUFFER_SIZE: usize = 65536;

/// A loaded prediction artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionModel {
    path: PathBuf,
    size_bytes: u64,
    sha256: String,
}

impl PredictionModel {
    /// Loads the artifact at `path`.
    ///
    /// Returns `Ok(None)` when no file exists there; the dashboard then runs
    /// without a model.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            info!(path = %path.display(), "no prediction model found; continuing without it");
            return Ok(None);
        }
        let read_err = |source| PipelineError::ModelRead {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(read_err)?;
        let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut size_bytes = 0u64;
        loop {
            let bytes_read = reader.read(&mut buffer).map_err(read_err)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            size_bytes += bytes_read as u64;
        }
        let sha256 = hex::encode(hasher.finalize());
        debug!(sha256 = %sha256, "prediction model digest");
        info!(path = %path.display(), size_bytes, "prediction model loaded");
        Ok(Some(Self {
            path: path.to_path_buf(),
            size_bytes,
            sha256,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Lowercase hex SHA-256 of the artifact bytes.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}
