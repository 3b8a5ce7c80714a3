//! Tests for claims cleaning, aggregation, and root-cause classification.

use polars::prelude::*;

use denial_model::IS_DENIED;
use denial_transform::{
    ClaimsFrame, CleanedClaims, RootCauseClassifier, clean_claims, cpt_denial_analysis,
    denial_reasons, payer_denials, provider_denials,
};

type Row<'a> = (&'a str, &'a str, &'a str, &'a str, &'a str, Option<&'a str>);

fn test_df(rows: &[Row<'_>]) -> DataFrame {
    let cpt: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let payer: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let physician: Vec<&str> = rows.iter().map(|r| r.2).collect();
    let payment: Vec<&str> = rows.iter().map(|r| r.3).collect();
    let balance: Vec<&str> = rows.iter().map(|r| r.4).collect();
    let reason: Vec<Option<&str>> = rows.iter().map(|r| r.5).collect();
    DataFrame::new(vec![
        Series::new("CPT_Code".into(), cpt).into(),
        Series::new("Insurance_Company".into(), payer).into(),
        Series::new("Physician_Name".into(), physician).into(),
        Series::new("Payment_Amount".into(), payment).into(),
        Series::new("Balance".into(), balance).into(),
        Series::new("Denial_Reason".into(), reason).into(),
    ])
    .unwrap()
}

fn cleaned(rows: &[Row<'_>]) -> CleanedClaims {
    clean_claims(ClaimsFrame::new("claims.csv", 0, test_df(rows))).unwrap()
}

#[test]
fn test_cleaning_coerces_currency_and_flags_denials() {
    let claims = cleaned(&[
        ("99213", "Aetna", "Dr. A", "$1,234.56", "N/A", Some("CO-16")),
        ("99214", "Cigna", "Dr. B", "80", "$0.00", None),
        ("99215", "Cigna", "Dr. B", "", "12", Some("  ")),
    ]);

    let payment = claims.data().column("Payment_Amount").unwrap().f64().unwrap();
    assert_eq!(payment.get(0), Some(1234.56));
    assert_eq!(payment.get(1), Some(80.0));
    assert_eq!(payment.get(2), Some(0.0));

    let balance = claims.data().column("Balance").unwrap().f64().unwrap();
    assert_eq!(balance.get(0), Some(0.0));
    assert_eq!(balance.get(2), Some(12.0));

    let denied = claims.data().column(IS_DENIED).unwrap().bool().unwrap();
    assert_eq!(denied.get(0), Some(true));
    assert_eq!(denied.get(1), Some(false));
    assert_eq!(denied.get(2), Some(false));

    assert_eq!(claims.denied_count(), 1);
    assert_eq!(claims.record_count(), 3);
    assert_eq!(claims.stats().balance_defaulted, 1);
    assert_eq!(claims.stats().payment_amount_defaulted, 0);
}

#[test]
fn test_cleaning_requires_canonical_columns() {
    let df = DataFrame::new(vec![Series::new("CPT_Code".into(), vec!["99213"]).into()]).unwrap();
    let err = clean_claims(ClaimsFrame::new("claims.csv", 0, df)).unwrap_err();
    assert!(err.to_string().contains("Insurance_Company"));
}

#[test]
fn test_cpt_analysis_includes_codes_without_denials() {
    let claims = cleaned(&[
        ("99213", "Aetna", "Dr. A", "10", "0", Some("CO-16")),
        ("99213", "Aetna", "Dr. A", "10", "0", None),
        ("99213", "Aetna", "Dr. A", "10", "0", None),
        ("99213", "Aetna", "Dr. A", "10", "0", None),
        ("99214", "Aetna", "Dr. A", "10", "0", None),
    ]);

    let rows = cpt_denial_analysis(&claims).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cpt_code, "99213");
    assert_eq!(rows[0].total_claims, 4);
    assert_eq!(rows[0].denied_claims, 1);
    assert_eq!(rows[0].denial_rate, 25.0);
    assert_eq!(rows[1].cpt_code, "99214");
    assert_eq!(rows[1].denied_claims, 0);
    assert_eq!(rows[1].denial_rate, 0.0);
}

#[test]
fn test_all_claims_denied() {
    let claims = cleaned(&[
        ("99213", "Aetna", "Dr. A", "0", "10", Some("modifier missing")),
        ("99213", "Cigna", "Dr. B", "0", "10", Some("auth required")),
    ]);

    let rows = cpt_denial_analysis(&claims).unwrap();
    assert_eq!(rows[0].denial_rate, 100.0);
    assert_eq!(payer_denials(&claims).unwrap().len(), 2);
}

#[test]
fn test_zero_denials_yield_empty_groupings() {
    let claims = cleaned(&[
        ("99213", "Aetna", "Dr. A", "10", "0", None),
        ("99214", "Cigna", "Dr. B", "10", "0", Some("")),
    ]);

    assert!(payer_denials(&claims).unwrap().is_empty());
    assert!(provider_denials(&claims).unwrap().is_empty());
    assert!(denial_reasons(&claims).unwrap().is_empty());

    let causes = RootCauseClassifier::new()
        .unwrap()
        .classify(Vec::<&str>::new());
    assert_eq!(causes.len(), 8);
    assert!(causes.iter().all(|row| row.count == 0));
}

#[test]
fn test_payer_and_provider_counts() {
    let claims = cleaned(&[
        ("99213", "Cigna", "Dr. B", "0", "0", Some("CO-45")),
        ("99213", "Aetna", "Dr. A", "0", "0", Some("CO-96")),
        ("99213", "Cigna", "Dr. A", "0", "0", Some("CO-16")),
        ("99213", "Medicare", "Dr. C", "0", "0", None),
    ]);

    let payers = payer_denials(&claims).unwrap();
    insta::assert_json_snapshot!(payers, @r#"
    [
      {
        "Insurance_Company": "Cigna",
        "Denied_Claims_Count": 2
      },
      {
        "Insurance_Company": "Aetna",
        "Denied_Claims_Count": 1
      }
    ]
    "#);

    let providers = provider_denials(&claims).unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0].physician_name, "Dr. A");
    assert_eq!(providers[0].denied_claims_count, 2);
}

#[test]
fn test_root_causes_from_denied_reasons() {
    let claims = cleaned(&[
        (
            "99213",
            "Aetna",
            "Dr. A",
            "0",
            "0",
            Some("Missing modifier 59, bundling issue"),
        ),
        ("99214", "Aetna", "Dr. A", "0", "0", None),
    ]);

    let reasons = denial_reasons(&claims).unwrap();
    assert_eq!(reasons, vec!["Missing modifier 59, bundling issue"]);

    let rows = RootCauseClassifier::new()
        .unwrap()
        .classify(reasons.iter().map(String::as_str));
    let matched: Vec<&str> = rows
        .iter()
        .filter(|row| row.count == 1)
        .map(|row| row.root_cause.as_str())
        .collect();
    assert_eq!(matched, vec!["Modifier Issues", "Bundling Edits (NCCI)"]);
}

#[test]
fn test_missing_group_keys_are_not_grouped() {
    let df = DataFrame::new(vec![
        Series::new("CPT_Code".into(), vec![Some("99213"), None, Some("99213")]).into(),
        Series::new("Insurance_Company".into(), vec![Some("Aetna"), Some("Aetna"), None]).into(),
        Series::new("Physician_Name".into(), vec![None, Some("Dr. A"), Some("Dr. A")]).into(),
        Series::new("Payment_Amount".into(), vec!["0", "0", "0"]).into(),
        Series::new("Balance".into(), vec!["0", "0", "0"]).into(),
        Series::new(
            "Denial_Reason".into(),
            vec![Some("CO-16"), Some("CO-45"), Some("CO-96")],
        )
        .into(),
    ])
    .unwrap();
    let claims = clean_claims(ClaimsFrame::new("claims.csv", 0, df)).unwrap();
    assert_eq!(claims.record_count(), 3);
    assert_eq!(claims.denied_count(), 3);

    let cpt = cpt_denial_analysis(&claims).unwrap();
    assert_eq!(cpt.len(), 1);
    assert_eq!(cpt[0].cpt_code, "99213");
    assert_eq!(cpt[0].total_claims, 2);
    assert_eq!(cpt[0].denied_claims, 2);

    let payers = payer_denials(&claims).unwrap();
    assert_eq!(payers.len(), 1);
    assert_eq!(payers[0].insurance_company, "Aetna");
    assert_eq!(payers[0].denied_claims_count, 2);

    let providers = provider_denials(&claims).unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].physician_name, "Dr. A");
    assert_eq!(providers[0].denied_claims_count, 2);
}
