use serde::{Deserialize, Serialize};

use crate::summary::{
    CleaningStats, CptDenialRow, PayerDenialRow, ProviderDenialRow, RecommendationRow,
    RootCauseRow,
};

/// Everything computed for one uploaded claims file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenialReport {
    pub source: String,
    /// Index of the non-blank row that held the header.
    pub header_offset: usize,
    pub total_claims: u64,
    pub denied_claims: u64,
    pub cpt_analysis: Vec<CptDenialRow>,
    pub payer_denials: Vec<PayerDenialRow>,
    pub provider_denials: Vec<ProviderDenialRow>,
    pub root_causes: Vec<RootCauseRow>,
    pub recommendations: Vec<RecommendationRow>,
    pub cleaning: CleaningStats,
    pub model_loaded: bool,
}

impl DenialReport {
    pub fn has_denials(&self) -> bool {
        self.denied_claims > 0
    }
}
