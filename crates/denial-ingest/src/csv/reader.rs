//! Delimited-text parsing with an explicit header row position.

use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::columns::normalize_columns;
use crate::error::{IngestError, Result};

use super::detect::OffsetRejection;

/// Cell texts treated as missing values (SPEC_FULL.md §4.2).
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "<NA>", "#N/A", "-NaN", "-nan",
    "#NA", "1.#IND", "1.#QNAN", "-1.#IND", "-1.#QNAN", "#N/A N/A",
];

/// Rejects a file larger than `max_size` bytes without reading it.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// A parsed table before it becomes a DataFrame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Index of the header among the non-blank rows.
    pub header_offset: usize,
    /// Header cells as they appeared in the file (trimmed).
    pub raw_headers: Vec<String>,
    /// Normalized, unique column names.
    pub columns: Vec<String>,
    /// Data rows, padded to the header width.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Trims a cell and maps empty text and NA spellings to `None`.
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() || MISSING_VALUE_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|value| value.trim().is_empty())
}

/// Parses `text` treating the non-blank row at `header_offset` as the header.
///
/// Rows before the header are discarded. A data row with more non-empty
/// fields than the header rejects the whole candidate; shorter rows are
/// padded with missing values.
pub fn parse_with_header_at(
    text: &str,
    header_offset: usize,
) -> std::result::Result<RawTable, OffsetRejection> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut non_blank = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| OffsetRejection::Parse {
            message: e.to_string(),
        })?;
        if is_blank(&record) {
            continue;
        }
        let index = non_blank;
        non_blank += 1;
        if index < header_offset {
            continue;
        }
        let Some(header_cells) = header.as_ref() else {
            header = Some(record.iter().map(|cell| cell.trim().to_string()).collect());
            continue;
        };
        let width = header_cells.len();
        let overflow = record.iter().skip(width).any(|cell| !cell.trim().is_empty());
        if overflow {
            return Err(OffsetRejection::RowTooLong {
                row: index,
                fields: record.len(),
                expected: width,
            });
        }
        let mut row = Vec::with_capacity(width);
        for idx in 0..width {
            row.push(record.get(idx).and_then(normalize_cell));
        }
        rows.push(row);
    }

    let raw_headers = header.ok_or(OffsetRejection::NoHeaderRow)?;
    let columns = normalize_columns(raw_headers.as_slice());
    Ok(RawTable {
        header_offset,
        raw_headers,
        columns,
        rows,
    })
}

/// Builds a DataFrame of string columns from a parsed table.
pub fn build_frame(table: &RawTable) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.columns.len());
    for (idx, name) in table.columns.iter().enumerate() {
        let values: Vec<Option<String>> =
            table.rows.iter().map(|row| row[idx].clone()).collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("  Aetna "), Some("Aetna".to_string()));
        assert_eq!(normalize_cell("   "), None);
        assert_eq!(normalize_cell("N/A"), None);
        assert_eq!(normalize_cell("null"), None);
        assert_eq!(normalize_cell("Not applicable"), Some("Not applicable".to_string()));
    }

    #[test]
    fn test_parse_header_at_zero() {
        let table = parse_with_header_at("CPT Code,Payer\n99213,Aetna\n", 0).unwrap();
        assert_eq!(table.raw_headers, vec!["CPT Code", "Payer"]);
        assert_eq!(table.columns, vec!["CPT_Code", "payer"]);
        assert_eq!(table.rows, vec![vec![Some("99213".to_string()), Some("Aetna".to_string())]]);
    }

    #[test]
    fn test_parse_skips_blank_lines_before_header() {
        let text = "Claims export\n\n,,\nCPT Code,Payer\n99213,Aetna\n";
        let table = parse_with_header_at(text, 1).unwrap();
        assert_eq!(table.columns, vec!["CPT_Code", "payer"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_with_header_at("a,b,c\n1\n", 0).unwrap();
        assert_eq!(table.rows, vec![vec![Some("1".to_string()), None, None]]);
    }

    #[test]
    fn test_long_rows_reject_candidate() {
        let result = parse_with_header_at("Report\na,b\n1,2\n", 0);
        assert!(matches!(
            result,
            Err(OffsetRejection::RowTooLong {
                row: 1,
                fields: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_trailing_empty_fields_are_tolerated() {
        let table = parse_with_header_at("a,b\n1,2,\n", 0).unwrap();
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_missing_header_row() {
        let result = parse_with_header_at("a,b\n", 2);
        assert!(matches!(result, Err(OffsetRejection::NoHeaderRow)));
    }

    #[test]
    fn test_build_frame_keeps_nulls() {
        let table = parse_with_header_at("a,b\n1,\n2,x\n", 0).unwrap();
        let df = build_frame(&table).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        let b = df.column("b").unwrap().str().unwrap();
        assert_eq!(b.get(0), None);
        assert_eq!(b.get(1), Some("x"));
    }

    #[test]
    fn test_check_file_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,2\n").unwrap();
        assert!(check_file_size(file.path(), 1024).is_ok());
        assert!(matches!(
            check_file_size(file.path(), 2),
            Err(IngestError::FileTooLarge { .. })
        ));
    }
}
