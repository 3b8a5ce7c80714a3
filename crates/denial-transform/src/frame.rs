//! Claims frame types.
//!
//! [`ClaimsFrame`] wraps the Polars DataFrame produced by ingestion together
//! with where it came from. [`CleanedClaims`] is the same frame after the
//! cleaner has coerced the currency columns and added `Is_Denied`; it is only
//! ever read from after that point.

use polars::prelude::DataFrame;

use denial_model::{CanonicalColumn, CleaningStats};

/// A claims table with canonical column names.
#[derive(Debug, Clone)]
pub struct ClaimsFrame {
    /// Name of the uploaded file.
    pub source: String,
    /// Non-blank row index of the header in the source file.
    pub header_offset: usize,
    /// The claims as a Polars DataFrame.
    pub data: DataFrame,
}

impl ClaimsFrame {
    pub fn new(source: impl Into<String>, header_offset: usize, data: DataFrame) -> Self {
        Self {
            source: source.into(),
            header_offset,
            data,
        }
    }

    /// Returns the number of claims in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn has_column(&self, column: CanonicalColumn) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == column.as_str())
    }
}

/// Output of the cleaning stage.
#[derive(Debug, Clone)]
pub struct CleanedClaims {
    frame: ClaimsFrame,
    stats: CleaningStats,
    denied: usize,
}

impl CleanedClaims {
    pub(crate) fn new(frame: ClaimsFrame, stats: CleaningStats, denied: usize) -> Self {
        Self {
            frame,
            stats,
            denied,
        }
    }

    pub fn frame(&self) -> &ClaimsFrame {
        &self.frame
    }

    pub fn data(&self) -> &DataFrame {
        &self.frame.data
    }

    pub fn stats(&self) -> CleaningStats {
        self.stats
    }

    pub fn record_count(&self) -> usize {
        self.frame.record_count()
    }

    pub fn denied_count(&self) -> usize {
        self.denied
    }
}
