//! Header normalization onto the canonical claims schema.

use std::collections::BTreeSet;

use denial_model::CanonicalColumn;

/// Known header spellings, keyed by their normalized form.
const COLUMN_SYNONYMS: &[(&str, CanonicalColumn)] = &[
    ("cptcode", CanonicalColumn::CptCode),
    ("procedurecode", CanonicalColumn::CptCode),
    ("insurancecompany", CanonicalColumn::InsuranceCompany),
    ("payername", CanonicalColumn::InsuranceCompany),
    ("insurancename", CanonicalColumn::InsuranceCompany),
    ("physicianname", CanonicalColumn::PhysicianName),
    ("doctorfullname", CanonicalColumn::PhysicianName),
    ("doctorname", CanonicalColumn::PhysicianName),
    ("paymentamount", CanonicalColumn::PaymentAmount),
    ("paidamount", CanonicalColumn::PaymentAmount),
    ("balance", CanonicalColumn::Balance),
    ("balanceamt", CanonicalColumn::Balance),
    ("outstandingbalance", CanonicalColumn::Balance),
    ("denialreason", CanonicalColumn::DenialReason),
    ("reasonfordenial", CanonicalColumn::DenialReason),
];

/// Trims, lowercases, and drops every character outside `[a-z0-9]`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

/// Looks up the canonical column for an already-normalized header.
pub fn canonical_column(normalized: &str) -> Option<CanonicalColumn> {
    COLUMN_SYNONYMS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, column)| *column)
}

/// Normalizes a single header, mapping known synonyms to canonical names.
///
/// Unknown headers keep their normalized form.
pub fn normalize_column_name(raw: &str) -> String {
    let normalized = normalize_header(raw);
    match canonical_column(&normalized) {
        Some(column) => column.as_str().to_string(),
        None => normalized,
    }
}

/// Normalizes a full header row.
///
/// Headers that normalize to nothing become `unnamed{index}`. A name that was
/// already taken by an earlier column gets a `_2`, `_3`, ... suffix, so the
/// first occurrence keeps the canonical name.
pub fn normalize_columns<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::with_capacity(raw.len());
    for (idx, header) in raw.iter().enumerate() {
        let mut name = normalize_column_name(header.as_ref());
        if name.is_empty() {
            name = format!("unnamed{idx}");
        }
        if seen.contains(&name) {
            let base = name;
            let mut suffix = 2usize;
            name = format!("{base}_{suffix}");
            while seen.contains(&name) {
                suffix += 1;
                name = format!("{base}_{suffix}");
            }
            tracing::warn!(
                column = %header.as_ref(),
                renamed = %name,
                "duplicate column after header normalization"
            );
        }
        seen.insert(name.clone());
        columns.push(name);
    }
    columns
}
