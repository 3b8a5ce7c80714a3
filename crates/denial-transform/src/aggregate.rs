//! Denial aggregations by procedure code, payer, and provider.
//!
//! Groups are formed in ascending key order and then stably sorted by count,
//! so rows with equal counts stay in key order. Rows whose key is missing do
//! not form a group.

use std::collections::BTreeMap;

use denial_model::{
    CanonicalColumn, CptDenialRow, DenialCount, IS_DENIED, PayerDenialRow, ProviderDenialRow,
};

use crate::data_utils::{flag_values, round2, text_values};
use crate::error::Result;
use crate::frame::CleanedClaims;

/// `denied / total * 100` rounded to two decimals, or `0.0` for an empty group.
pub fn denial_rate(denied: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(denied as f64 / total as f64 * 100.0)
    }
}

/// Total and denied claims per CPT code, most-denied first.
///
/// Every code appears, including codes without a single denial.
pub fn cpt_denial_analysis(claims: &CleanedClaims) -> Result<Vec<CptDenialRow>> {
    let df = claims.data();
    let codes = text_values(df, CanonicalColumn::CptCode.as_str())?;
    let flags = flag_values(df, IS_DENIED)?;

    let mut groups: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for (code, denied) in codes.into_iter().zip(flags) {
        let Some(code) = code else {
            continue;
        };
        let entry = groups.entry(code).or_default();
        entry.0 += 1;
        if denied {
            entry.1 += 1;
        }
    }

    let mut rows: Vec<CptDenialRow> = groups
        .into_iter()
        .map(|(cpt_code, (total_claims, denied_claims))| CptDenialRow {
            cpt_code,
            total_claims,
            denied_claims,
            denial_rate: denial_rate(denied_claims, total_claims),
        })
        .collect();
    rows.sort_by(|a, b| b.denied_claims.cmp(&a.denied_claims));
    Ok(rows)
}

/// Counts denied claims per value of the row type's key column, most-denied
/// first.
pub fn denied_counts<R: DenialCount>(claims: &CleanedClaims) -> Result<Vec<R>> {
    let df = claims.data();
    let keys = text_values(df, R::KEY_COLUMN.as_str())?;
    let flags = flag_values(df, IS_DENIED)?;

    let mut groups: BTreeMap<String, u64> = BTreeMap::new();
    for (key, denied) in keys.into_iter().zip(flags) {
        if !denied {
            continue;
        }
        if let Some(key) = key {
            *groups.entry(key).or_default() += 1;
        }
    }

    let mut rows: Vec<R> = groups
        .into_iter()
        .map(|(key, count)| R::new(key, count))
        .collect();
    rows.sort_by(|a, b| b.denied_claims_count().cmp(&a.denied_claims_count()));
    Ok(rows)
}

/// Denied claims per insurance company.
pub fn payer_denials(claims: &CleanedClaims) -> Result<Vec<PayerDenialRow>> {
    denied_counts(claims)
}

/// Denied claims per physician.
pub fn provider_denials(claims: &CleanedClaims) -> Result<Vec<ProviderDenialRow>> {
    denied_counts(claims)
}
