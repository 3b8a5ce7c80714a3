//! DataFrame value extraction.

use polars::prelude::{DataFrame, DataType};

use crate::error::{Result, TransformError};

fn column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> Result<&'a polars::prelude::Column> {
    df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })
}

/// Reads a column as optional strings, casting non-string columns first.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let casted = column(df, name)?.cast(&DataType::String)?;
    let values = casted
        .str()?
        .iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

/// Reads a boolean column, treating nulls as `false`.
pub fn flag_values(df: &DataFrame, name: &str) -> Result<Vec<bool>> {
    let values = column(df, name)?
        .bool()?
        .iter()
        .map(|value| value.unwrap_or(false))
        .collect();
    Ok(values)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
