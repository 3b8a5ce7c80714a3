//! Claims transformation for denial analytics.
//!
//! - **frame**: claims frame types before and after cleaning
//! - **cleaning**: currency coercion and the `Is_Denied` flag
//! - **aggregate**: denial counts by CPT code, payer, and provider
//! - **root_cause**: table-driven keyword classification of denial reasons
//! - **data_utils**: DataFrame value extraction

pub mod aggregate;
pub mod cleaning;
pub mod data_utils;
pub mod error;
pub mod frame;
pub mod root_cause;

pub use aggregate::{cpt_denial_analysis, denial_rate, payer_denials, provider_denials};
pub use cleaning::{clean_claims, parse_currency};
pub use error::{Result, TransformError};
pub use frame::{ClaimsFrame, CleanedClaims};
pub use root_cause::{
    ROOT_CAUSE_TAXONOMY, RootCauseCategory, RootCauseClassifier, denial_reasons,
};
