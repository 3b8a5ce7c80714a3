pub mod report;
pub mod schema;
pub mod summary;

pub use report::DenialReport;
pub use schema::{CanonicalColumn, IS_DENIED, missing_columns, required_columns};
pub use summary::{
    CleaningStats, CptDenialRow, DenialCount, PayerDenialRow, ProviderDenialRow, RecommendationRow,
    RootCauseRow,
};
