//! Claims cleaning.
//!
//! Currency columns become floats and every row gets an `Is_Denied` flag.
//! Cleaning never rejects a file: unparseable amounts become `0.0` and are
//! only counted in [`CleaningStats`].

use polars::prelude::{NamedFrom, Series};
use tracing::debug;

use denial_model::{CanonicalColumn, CleaningStats, IS_DENIED};

use crate::data_utils::text_values;
use crate::error::{Result, TransformError};
use crate::frame::{ClaimsFrame, CleanedClaims};

/// Strips `$` and `,` and parses the rest as a decimal number.
///
/// Returns `None` for empty or non-numeric text.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|ch| !matches!(ch, '$' | ',')).collect();
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// True when the denial reason has any non-whitespace text.
pub fn is_denial_reason(reason: Option<&str>) -> bool {
    reason.is_some_and(|text| !text.trim().is_empty())
}

/// Coerces a currency column, returning the values and how many non-empty
/// cells had to be defaulted.
fn coerce_currency(values: &[Option<String>]) -> (Vec<f64>, u64) {
    let mut defaulted = 0u64;
    let numbers = values
        .iter()
        .map(|cell| match cell.as_deref() {
            None => 0.0,
            Some(text) => parse_currency(text).unwrap_or_else(|| {
                if !text.trim().is_empty() {
                    defaulted += 1;
                }
                0.0
            }),
        })
        .collect();
    (numbers, defaulted)
}

/// Cleans a claims frame whose header already satisfied the canonical schema.
pub fn clean_claims(frame: ClaimsFrame) -> Result<CleanedClaims> {
    if let Some(column) = CanonicalColumn::ALL
        .into_iter()
        .find(|column| !frame.has_column(*column))
    {
        return Err(TransformError::MissingColumn {
            column: column.as_str().to_string(),
        });
    }
    let ClaimsFrame {
        source,
        header_offset,
        mut data,
    } = frame;

    let mut stats = CleaningStats::default();
    for column in CanonicalColumn::ALL
        .into_iter()
        .filter(|column| column.is_currency())
    {
        let values = text_values(&data, column.as_str())?;
        let (numbers, defaulted) = coerce_currency(&values);
        stats.record_defaulted(column, defaulted);
        data.with_column(Series::new(column.as_str().into(), numbers))?;
    }

    let reasons = text_values(&data, CanonicalColumn::DenialReason.as_str())?;
    let flags: Vec<bool> = reasons
        .iter()
        .map(|reason| is_denial_reason(reason.as_deref()))
        .collect();
    let denied = flags.iter().filter(|flag| **flag).count();
    data.with_column(Series::new(IS_DENIED.into(), flags))?;

    debug!(
        source = %source,
        rows = data.height(),
        denied,
        payment_amount_defaulted = stats.payment_amount_defaulted,
        balance_defaulted = stats.balance_defaulted,
        "claims cleaned"
    );

    Ok(CleanedClaims::new(
        ClaimsFrame::new(source, header_offset, data),
        stats,
        denied,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
        assert_eq!(parse_currency(" 80 "), Some(80.0));
        assert_eq!(parse_currency("-$5.00"), Some(-5.0));
        assert_eq!(parse_currency("N/A"), None);
        assert_eq!(parse_currency("$"), None);
        assert_eq!(parse_currency("inf"), None);
    }

    #[test]
    fn test_is_denial_reason() {
        assert!(is_denial_reason(Some("CO-16 missing info")));
        assert!(!is_denial_reason(Some("   ")));
        assert!(!is_denial_reason(None));
    }

    #[test]
    fn test_coerce_counts_only_bad_text() {
        let values = vec![
            Some("$10".to_string()),
            None,
            Some("pending".to_string()),
            Some("  ".to_string()),
        ];
        let (numbers, defaulted) = coerce_currency(&values);
        assert_eq!(numbers, vec![10.0, 0.0, 0.0, 0.0]);
        assert_eq!(defaulted, 1);
    }
}
