//! Summary rows produced by the aggregation and classification stages.

use serde::{Deserialize, Serialize};

use crate::schema::CanonicalColumn;

/// Per procedure code totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CptDenialRow {
    #[serde(rename = "CPT_Code")]
    pub cpt_code: String,
    #[serde(rename = "Total_Claims")]
    pub total_claims: u64,
    #[serde(rename = "Denied_Claims")]
    pub denied_claims: u64,
    /// Percentage rounded to two decimals.
    #[serde(rename = "Denial_Rate")]
    pub denial_rate: f64,
}

/// A denied-claim count keyed by one grouping column.
///
/// The payer and provider tables share this shape but serialize their key
/// under the column they were grouped by.
pub trait DenialCount {
    /// Column the claims were grouped by.
    const KEY_COLUMN: CanonicalColumn;

    fn new(key: String, denied_claims_count: u64) -> Self;

    fn key(&self) -> &str;

    fn denied_claims_count(&self) -> u64;
}

/// Denied claims for one insurance company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerDenialRow {
    #[serde(rename = "Insurance_Company")]
    pub insurance_company: String,
    #[serde(rename = "Denied_Claims_Count")]
    pub denied_claims_count: u64,
}

impl DenialCount for PayerDenialRow {
    const KEY_COLUMN: CanonicalColumn = CanonicalColumn::InsuranceCompany;

    fn new(key: String, denied_claims_count: u64) -> Self {
        Self {
            insurance_company: key,
            denied_claims_count,
        }
    }

    fn key(&self) -> &str {
        &self.insurance_company
    }

    fn denied_claims_count(&self) -> u64 {
        self.denied_claims_count
    }
}

/// Denied claims for one physician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDenialRow {
    #[serde(rename = "Physician_Name")]
    pub physician_name: String,
    #[serde(rename = "Denied_Claims_Count")]
    pub denied_claims_count: u64,
}

impl DenialCount for ProviderDenialRow {
    const KEY_COLUMN: CanonicalColumn = CanonicalColumn::PhysicianName;

    fn new(key: String, denied_claims_count: u64) -> Self {
        Self {
            physician_name: key,
            denied_claims_count,
        }
    }

    fn key(&self) -> &str {
        &self.physician_name
    }

    fn denied_claims_count(&self) -> u64 {
        self.denied_claims_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootCauseRow {
    #[serde(rename = "Root Cause")]
    pub root_cause: String,
    #[serde(rename = "Count")]
    pub count: u64,
    #[serde(rename = "Logical Reason")]
    pub logical_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRow {
    #[serde(rename = "Root Cause")]
    pub root_cause: String,
    #[serde(rename = "Recommended Strategy")]
    pub recommended_strategy: String,
}

/// Cells the cleaner replaced with zero because they were not numbers.
///
/// Missing cells are not counted, only cells with text that failed to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub payment_amount_defaulted: u64,
    pub balance_defaulted: u64,
}

impl CleaningStats {
    pub fn total_defaulted(&self) -> u64 {
        self.payment_amount_defaulted + self.balance_defaulted
    }

    /// Stores the defaulted count for a currency column; other columns are
    /// never coerced and are ignored.
    pub fn record_defaulted(&mut self, column: CanonicalColumn, count: u64) {
        match column {
            CanonicalColumn::PaymentAmount => self.payment_amount_defaulted = count,
            CanonicalColumn::Balance => self.balance_defaulted = count,
            _ => {}
        }
    }
}
