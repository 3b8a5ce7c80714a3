//! Header-row detection.
//!
//! Claims exports often carry one or two banner rows above the real header.
//! Detection tries each candidate header position in a fixed order and keeps
//! the first one whose normalized columns cover the required schema.

use std::collections::BTreeSet;
use std::fmt;

use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::debug;

use denial_model::{CanonicalColumn, missing_columns};

use crate::error::Result;

use super::reader::{RawTable, build_frame, parse_with_header_at};

/// Candidate header positions, in priority order.
pub const HEADER_OFFSETS: [usize; 3] = [0, 1, 2];

/// Why a candidate header position was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffsetRejection {
    /// The text could not be read as CSV.
    Parse { message: String },
    /// The file has fewer non-blank rows than the offset.
    NoHeaderRow,
    /// A data row is wider than the header.
    RowTooLong {
        row: usize,
        fields: usize,
        expected: usize,
    },
    /// The header parsed but lacks canonical columns.
    MissingColumns(Vec<CanonicalColumn>),
}

impl fmt::Display for OffsetRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { message } => write!(f, "parse error: {message}"),
            Self::NoHeaderRow => f.write_str("no row at this position"),
            Self::RowTooLong {
                row,
                fields,
                expected,
            } => write!(f, "row {row} has {fields} fields, expected {expected}"),
            Self::MissingColumns(columns) => {
                let names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();
                write!(f, "missing columns: {}", names.join(", "))
            }
        }
    }
}

/// One rejected candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetAttempt {
    pub offset: usize,
    pub rejection: OffsetRejection,
}

/// No candidate header position produced the required columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not detect correct header format or missing required columns")]
pub struct DetectionError {
    pub attempts: Vec<OffsetAttempt>,
}

impl DetectionError {
    /// One line per rejected offset, for logs and diagnostics.
    pub fn details(&self) -> Vec<String> {
        self.attempts
            .iter()
            .map(|attempt| format!("header row {}: {}", attempt.offset, attempt.rejection))
            .collect()
    }
}

/// A claims table whose header satisfied the required schema.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub header_offset: usize,
    pub raw_headers: Vec<String>,
    pub data: DataFrame,
}

fn try_offset(
    text: &str,
    offset: usize,
    required: &BTreeSet<&str>,
) -> std::result::Result<RawTable, OffsetRejection> {
    let table = parse_with_header_at(text, offset)?;
    let missing: Vec<CanonicalColumn> = missing_columns(table.columns.iter().map(String::as_str))
        .into_iter()
        .filter(|column| required.contains(column.as_str()))
        .collect();
    if missing.is_empty() {
        Ok(table)
    } else {
        Err(OffsetRejection::MissingColumns(missing))
    }
}

/// Returns the first candidate table that carries every `required` column.
pub fn detect_header(
    text: &str,
    required: &BTreeSet<&str>,
) -> std::result::Result<RawTable, DetectionError> {
    let mut attempts = Vec::with_capacity(HEADER_OFFSETS.len());
    for offset in HEADER_OFFSETS {
        match try_offset(text, offset, required) {
            Ok(table) => {
                debug!(offset, columns = table.columns.len(), "header row accepted");
                return Ok(table);
            }
            Err(rejection) => {
                debug!(offset, reason = %rejection, "header row rejected");
                attempts.push(OffsetAttempt { offset, rejection });
            }
        }
    }
    Err(DetectionError { attempts })
}

/// Detects the header row and loads the claims into a DataFrame.
pub fn load_claims_text(text: &str) -> Result<LoadedTable> {
    let required = denial_model::required_columns();
    let table = detect_header(text, &required)?;
    let data = build_frame(&table)?;
    Ok(LoadedTable {
        header_offset: table.header_offset,
        raw_headers: table.raw_headers,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "CPT Code,Payer Name,Doctor Name,Paid Amount,Balance Amt,Reason for Denial";

    #[test]
    fn test_detects_header_at_each_offset() {
        let body = "99213,Aetna,Dr. Smith,$100.00,$0.00,\n";
        for junk in 0..3 {
            let mut text = String::new();
            for line in 0..junk {
                text.push_str(&format!("Banner line {line}\n"));
            }
            text.push_str(HEADER);
            text.push('\n');
            text.push_str(body);
            let loaded = load_claims_text(&text).unwrap();
            assert_eq!(loaded.header_offset, junk);
            assert_eq!(loaded.data.height(), 1);
        }
    }

    #[test]
    fn test_reports_every_rejected_offset() {
        let err = load_claims_text("a,b\n1,2\n3,4\n").unwrap_err();
        let crate::IngestError::HeaderNotDetected(detection) = err else {
            panic!("expected detection failure");
        };
        assert_eq!(detection.attempts.len(), 3);
        assert!(matches!(
            detection.attempts[0].rejection,
            OffsetRejection::MissingColumns(ref cols) if cols.len() == 6
        ));
        assert_eq!(detection.attempts[2].offset, 2);
        assert_eq!(detection.details().len(), 3);
    }

    #[test]
    fn test_header_beyond_third_row_is_not_found() {
        let text = format!("one\ntwo\nthree\n{HEADER}\n99213,Aetna,Dr. Smith,1,0,\n");
        assert!(load_claims_text(&text).is_err());
    }

    #[test]
    fn test_empty_text_fails_detection() {
        let err = detect_header("", &denial_model::required_columns()).unwrap_err();
        assert!(
            err.attempts
                .iter()
                .all(|a| a.rejection == OffsetRejection::NoHeaderRow)
        );
    }
}
