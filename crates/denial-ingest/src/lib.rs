//! Claims data ingestion.
//!
//! This crate turns an uploaded claims export into a Polars DataFrame whose
//! headers follow the canonical claims schema.
//!
//! # Features
//!
//! - **Upload Checks**: Reject missing files and non-CSV filenames before parsing
//! - **Column Normalization**: Map messy header spellings onto canonical names
//! - **Header Detection**: Find the real header among the first three rows
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use denial_ingest::{CsvUpload, load_claims_text};
//!
//! let upload = CsvUpload::from_path(Path::new("claims.csv"), 50 * 1024 * 1024)?;
//! let loaded = load_claims_text(upload.text()?)?;
//! println!("header found on row {}", loaded.header_offset);
//! ```

mod columns;
mod csv;
mod error;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === Column Normalization ===
pub use columns::{canonical_column, normalize_column_name, normalize_columns, normalize_header};

// === CSV Reading ===
pub use self::csv::{
    DetectionError, HEADER_OFFSETS, LoadedTable, MISSING_VALUE_TOKENS, OffsetAttempt,
    OffsetRejection, RawTable, build_frame, check_file_size, detect_header, load_claims_text,
    normalize_cell, parse_with_header_at,
};

// === Upload Checks ===
pub use upload::{CSV_EXTENSION, CsvUpload, validate_filename};
