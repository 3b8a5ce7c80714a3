//! Canonical claims schema.
//!
//! Every uploaded file is renamed onto this fixed set of columns before any
//! cleaning or aggregation runs. Columns outside the set are carried along
//! untouched.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the derived boolean column added by the cleaner.
pub const IS_DENIED: &str = "Is_Denied";

/// One of the six columns every claims file must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalColumn {
    #[serde(rename = "CPT_Code")]
    CptCode,
    #[serde(rename = "Insurance_Company")]
    InsuranceCompany,
    #[serde(rename = "Physician_Name")]
    PhysicianName,
    #[serde(rename = "Payment_Amount")]
    PaymentAmount,
    #[serde(rename = "Balance")]
    Balance,
    #[serde(rename = "Denial_Reason")]
    DenialReason,
}

impl CanonicalColumn {
    /// All canonical columns in schema order.
    pub const ALL: [CanonicalColumn; 6] = [
        CanonicalColumn::CptCode,
        CanonicalColumn::InsuranceCompany,
        CanonicalColumn::PhysicianName,
        CanonicalColumn::PaymentAmount,
        CanonicalColumn::Balance,
        CanonicalColumn::DenialReason,
    ];

    /// Column name as it appears in a normalized frame.
    pub const fn as_str(self) -> &'static str {
        match self {
            CanonicalColumn::CptCode => "CPT_Code",
            CanonicalColumn::InsuranceCompany => "Insurance_Company",
            CanonicalColumn::PhysicianName => "Physician_Name",
            CanonicalColumn::PaymentAmount => "Payment_Amount",
            CanonicalColumn::Balance => "Balance",
            CanonicalColumn::DenialReason => "Denial_Reason",
        }
    }

    /// True for the currency columns coerced to numbers by the cleaner.
    pub const fn is_currency(self) -> bool {
        matches!(
            self,
            CanonicalColumn::PaymentAmount | CanonicalColumn::Balance
        )
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The required column set as plain names.
pub fn required_columns() -> BTreeSet<&'static str> {
    CanonicalColumn::ALL
        .into_iter()
        .map(CanonicalColumn::as_str)
        .collect()
}

/// Returns the canonical columns absent from `columns`, in schema order.
pub fn missing_columns<'a, I>(columns: I) -> Vec<CanonicalColumn>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: BTreeSet<&str> = columns.into_iter().collect();
    CanonicalColumn::ALL
        .into_iter()
        .filter(|column| !present.contains(column.as_str()))
        .collect()
}
