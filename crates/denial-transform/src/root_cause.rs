//! Root-cause classification of denial reasons.
//!
//! The taxonomy is a single table: each category owns its keywords, the
//! explanation shown next to its count, and the recommended fix. A reason is
//! counted in every category with a matching keyword, so categories overlap.

use regex::{Regex, RegexBuilder};

use denial_model::{CanonicalColumn, IS_DENIED, RecommendationRow, RootCauseRow};

use crate::data_utils::{flag_values, text_values};
use crate::error::{Result, TransformError};
use crate::frame::CleanedClaims;

/// One root-cause category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootCauseCategory {
    pub name: &'static str,
    /// Case-insensitive substrings; any one of them matches.
    pub keywords: &'static [&'static str],
    pub logical_reason: &'static str,
    pub recommended_strategy: &'static str,
}

// The bare numbers are denial reason codes; they also match inside longer
// numbers (e.g. "2016").
pub const ROOT_CAUSE_TAXONOMY: &[RootCauseCategory] = &[
    RootCauseCategory {
        name: "Modifier Issues",
        keywords: &["modifier"],
        logical_reason: "Missing/incorrect modifiers can lead to denials.",
        recommended_strategy: "✔ Train staff on modifier rules, run pre-checks before submission.",
    },
    RootCauseCategory {
        name: "LCD/NCD Mismatch",
        keywords: &["LCD", "NCD", "medical necessity"],
        logical_reason: "Claim doesn’t meet Medicare LCD/NCD criteria.",
        recommended_strategy: "✔ Check coverage policies, attach additional docs when appealing.",
    },
    RootCauseCategory {
        name: "Bundling Edits (NCCI)",
        keywords: &["bundl"],
        logical_reason: "Service bundled incorrectly under NCCI edits.",
        recommended_strategy: "✔ Educate coders on bundling, only override with documentation.",
    },
    RootCauseCategory {
        name: "Lack of Documentation",
        keywords: &["documentation", "record", "16"],
        logical_reason: "Insufficient documentation to prove necessity.",
        recommended_strategy: "✔ Use templates, audit charts before billing.",
    },
    RootCauseCategory {
        name: "Prior Authorization Problems",
        keywords: &["prior authorization", "auth"],
        logical_reason: "No valid prior authorization at time of service.",
        recommended_strategy: "✔ Track prior auths, verify before service.",
    },
    RootCauseCategory {
        name: "Credentialing or Enrollment Issues",
        keywords: &["credentialing", "enrollment", "provider eligibility"],
        logical_reason: "Provider not enrolled/credentialed properly.",
        recommended_strategy: "✔ Audit provider credentialing regularly.",
    },
    RootCauseCategory {
        name: "Charge Exceeds Fee Schedule",
        keywords: &["45", "charge exceeds fee schedule"],
        logical_reason: "Claimed charge exceeded the payer’s fee schedule.",
        recommended_strategy: "✔ Review fee schedules; negotiate rates with payers.",
    },
    RootCauseCategory {
        name: "Non-covered Service",
        keywords: &["96", "non-covered service"],
        logical_reason: "Service not covered under patient’s insurance plan.",
        recommended_strategy: "✔ Inform patients before service, use ABNs when required.",
    },
];

fn compile(category: &RootCauseCategory) -> Result<Regex> {
    let pattern = category
        .keywords
        .iter()
        .map(|keyword| regex::escape(keyword))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| TransformError::Pattern {
            category: category.name.to_string(),
            source,
        })
}

/// Keyword matcher compiled from a taxonomy.
#[derive(Debug, Clone)]
pub struct RootCauseClassifier {
    matchers: Vec<(&'static RootCauseCategory, Regex)>,
}

impl RootCauseClassifier {
    /// Compiles the built-in taxonomy.
    pub fn new() -> Result<Self> {
        Self::with_taxonomy(ROOT_CAUSE_TAXONOMY)
    }

    pub fn with_taxonomy(taxonomy: &'static [RootCauseCategory]) -> Result<Self> {
        let matchers = taxonomy
            .iter()
            .map(|category| Ok((category, compile(category)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn categories(&self) -> impl Iterator<Item = &'static RootCauseCategory> + '_ {
        self.matchers.iter().map(|(category, _)| *category)
    }

    /// Names of every category whose keywords occur in `reason`.
    pub fn categories_for(&self, reason: &str) -> Vec<&'static str> {
        self.matchers
            .iter()
            .filter(|(_, regex)| regex.is_match(reason))
            .map(|(category, _)| category.name)
            .collect()
    }

    /// Counts matching reasons per category, largest count first.
    ///
    /// Categories with equal counts keep taxonomy order.
    pub fn classify<'r, I>(&self, reasons: I) -> Vec<RootCauseRow>
    where
        I: IntoIterator<Item = &'r str>,
    {
        let mut counts = vec![0u64; self.matchers.len()];
        for reason in reasons {
            for (idx, (_, regex)) in self.matchers.iter().enumerate() {
                if regex.is_match(reason) {
                    counts[idx] += 1;
                }
            }
        }
        let mut rows: Vec<RootCauseRow> = self
            .matchers
            .iter()
            .zip(counts)
            .map(|((category, _), count)| RootCauseRow {
                root_cause: category.name.to_string(),
                count,
                logical_reason: category.logical_reason.to_string(),
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// One recommendation per category, in taxonomy order.
    pub fn recommendations(&self) -> Vec<RecommendationRow> {
        self.categories()
            .map(|category| RecommendationRow {
                root_cause: category.name.to_string(),
                recommended_strategy: category.recommended_strategy.to_string(),
            })
            .collect()
    }
}

/// Denial reason text of every denied claim.
pub fn denial_reasons(claims: &CleanedClaims) -> Result<Vec<String>> {
    let df = claims.data();
    let reasons = text_values(df, CanonicalColumn::DenialReason.as_str())?;
    let flags = flag_values(df, IS_DENIED)?;
    Ok(reasons
        .into_iter()
        .zip(flags)
        .filter(|(_, denied)| *denied)
        .filter_map(|(reason, _)| reason)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> RootCauseClassifier {
        RootCauseClassifier::new().expect("taxonomy compiles")
    }

    fn count_of(rows: &[RootCauseRow], name: &str) -> u64 {
        rows.iter()
            .find(|row| row.root_cause == name)
            .map(|row| row.count)
            .unwrap_or_default()
    }

    #[test]
    fn test_categories_overlap() {
        let matched = classifier().categories_for("Missing modifier 59, bundling issue");
        assert_eq!(matched, vec!["Modifier Issues", "Bundling Edits (NCCI)"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.categories_for("lcd not met"), vec!["LCD/NCD Mismatch"]);
        assert_eq!(
            c.categories_for("NO PRIOR AUTHORIZATION"),
            vec!["Prior Authorization Problems"]
        );
    }

    #[test]
    fn test_numeric_codes_are_substrings() {
        let c = classifier();
        assert_eq!(c.categories_for("CO-16"), vec!["Lack of Documentation"]);
        assert_eq!(c.categories_for("CO-45"), vec!["Charge Exceeds Fee Schedule"]);
        assert_eq!(c.categories_for("CO-96"), vec!["Non-covered Service"]);
        assert!(c.categories_for("CO-97").is_empty());
    }

    #[test]
    fn test_classify_counts_and_orders() {
        let rows = classifier().classify([
            "Missing modifier 59, bundling issue",
            "modifier 25 missing",
            "Bundled service",
            "Prior auth required",
        ]);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].root_cause, "Modifier Issues");
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].root_cause, "Bundling Edits (NCCI)");
        assert_eq!(rows[1].count, 2);
        assert_eq!(count_of(&rows, "Prior Authorization Problems"), 1);
        assert_eq!(count_of(&rows, "Non-covered Service"), 0);
        // zero counts keep taxonomy order
        assert_eq!(rows[3].root_cause, "LCD/NCD Mismatch");
    }

    #[test]
    fn test_recommendations_follow_taxonomy() {
        let recs = classifier().recommendations();
        assert_eq!(recs.len(), ROOT_CAUSE_TAXONOMY.len());
        assert_eq!(recs[0].root_cause, "Modifier Issues");
        assert_eq!(recs[7].root_cause, "Non-covered Service");
    }
}
