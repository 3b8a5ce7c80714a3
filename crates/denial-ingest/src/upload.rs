//! Upload acceptance checks.
//!
//! Everything here runs before a single byte of the file is parsed.

use std::path::Path;

use crate::csv::check_file_size;
use crate::error::{IngestError, Result};

/// Accepted filename suffix. Matching is case-sensitive.
pub const CSV_EXTENSION: &str = ".csv";

/// A named CSV payload that passed the filename checks.
#[derive(Debug, Clone)]
pub struct CsvUpload {
    filename: String,
    bytes: Vec<u8>,
}

/// Rejects a missing file part, an empty filename, or a non-CSV filename.
pub fn validate_filename(filename: Option<&str>) -> Result<&str> {
    let filename = filename.ok_or(IngestError::MissingUpload)?;
    if filename.is_empty() {
        return Err(IngestError::EmptyFilename);
    }
    if !filename.ends_with(CSV_EXTENSION) {
        return Err(IngestError::WrongExtension {
            filename: filename.to_string(),
        });
    }
    Ok(filename)
}

impl CsvUpload {
    /// Accepts an uploaded file part; `filename` is `None` when the request
    /// carried no file at all.
    pub fn new(filename: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        let filename = validate_filename(filename)?.to_string();
        Ok(Self { filename, bytes })
    }

    /// Reads a local file, checking its name before touching the contents.
    pub fn from_path(path: &Path, max_size: u64) -> Result<Self> {
        let filename = path.file_name().and_then(|name| name.to_str());
        let filename = validate_filename(filename)?.to_string();
        check_file_size(path, max_size)?;
        let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { filename, bytes })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decodes the payload as UTF-8, dropping a leading byte-order mark.
    pub fn text(&self) -> Result<&str> {
        let text = std::str::from_utf8(&self.bytes).map_err(|e| IngestError::InvalidEncoding {
            filename: self.filename.clone(),
            source: e,
        })?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
    }
}
