//! Tests for the dashboard page and JSON output.

use denial_model::{
    CleaningStats, CptDenialRow, DenialCount, DenialReport, PayerDenialRow, ProviderDenialRow,
    RecommendationRow, RootCauseRow,
};
use denial_report::{
    DashboardOptions, render_dashboard, report_json, write_report_json,
};

fn payer(name: &str, count: u64) -> PayerDenialRow {
    PayerDenialRow::new(name.to_string(), count)
}

fn report(payers: Vec<PayerDenialRow>) -> DenialReport {
    DenialReport {
        source: "claims.csv".to_string(),
        header_offset: 1,
        total_claims: 4,
        denied_claims: payers.iter().map(|row| row.denied_claims_count).sum(),
        cpt_analysis: vec![CptDenialRow {
            cpt_code: "99213".to_string(),
            total_claims: 4,
            denied_claims: 1,
            denial_rate: 25.0,
        }],
        provider_denials: payers
            .iter()
            .map(|row| {
                ProviderDenialRow::new(
                    format!("Dr. {}", row.insurance_company),
                    row.denied_claims_count,
                )
            })
            .collect(),
        payer_denials: payers,
        root_causes: vec![RootCauseRow {
            root_cause: "Modifier Issues".to_string(),
            count: 1,
            logical_reason: "Missing/incorrect modifiers can lead to denials.".to_string(),
        }],
        recommendations: vec![RecommendationRow {
            root_cause: "Modifier Issues".to_string(),
            recommended_strategy: "✔ Train staff on modifier rules, run pre-checks before submission."
                .to_string(),
        }],
        cleaning: CleaningStats {
            payment_amount_defaulted: 0,
            balance_defaulted: 2,
        },
        model_loaded: false,
    }
}

#[test]
fn test_empty_page_has_only_the_form() {
    let html = render_dashboard(None, &DashboardOptions::default()).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
    assert!(html.contains(r#"name="file""#));
    assert!(!html.contains("<table"));
    assert!(!html.contains("<svg"));
}

#[test]
fn test_dashboard_has_five_tables_and_three_charts() {
    let report = report(vec![payer("Aetna", 1)]);
    let html = render_dashboard(Some(&report), &DashboardOptions::default()).unwrap();

    assert_eq!(html.matches(r#"<table class="styled-table">"#).count(), 5);
    assert_eq!(html.matches("<svg").count(), 3);
    assert!(html.contains("Top CPT Codes by Denials"));
    assert!(html.contains("Top Payers by Denials"));
    assert!(html.contains("Top Providers by Denials"));
    assert!(html.contains("<th>Insurance_Company</th>"));
    assert!(html.contains("<th>Physician_Name</th>"));
    assert!(html.contains("25.00"));
    assert!(html.contains("header found on row 2"));
    assert!(html.contains("2 non-numeric amount(s) counted as 0"));
    assert!(html.contains("✔ Train staff on modifier rules"));
}

#[test]
fn test_empty_tables_omit_their_charts() {
    let report = report(Vec::new());
    let html = render_dashboard(Some(&report), &DashboardOptions::default()).unwrap();

    assert_eq!(html.matches(r#"<table class="styled-table">"#).count(), 5);
    assert_eq!(html.matches("<svg").count(), 1);
    assert!(html.contains("Top CPT Codes by Denials"));
    assert!(!html.contains("Top Payers by Denials"));
    assert!(!html.contains("Top Providers by Denials"));
}

#[test]
fn test_chart_top_n_limits_bars() {
    let payers = (0..15)
        .map(|idx| payer(&format!("Payer {idx:02}"), 20 - idx))
        .collect();
    let report = report(payers);
    let options = DashboardOptions {
        chart_top_n: 5,
        model_status: Some("Prediction model: loaded".to_string()),
    };
    let html = render_dashboard(Some(&report), &options).unwrap();

    // one CPT bar plus five payer and five provider bars
    assert_eq!(html.matches("<rect").count(), 11);
    assert!(html.contains("Prediction model: loaded"));
}

#[test]
fn test_cells_are_escaped() {
    let report = report(vec![payer("<Blue> & Co", 1)]);
    let html = render_dashboard(Some(&report), &DashboardOptions::default()).unwrap();
    assert!(html.contains("&lt;Blue&gt; &amp; Co"));
    assert!(!html.contains("<Blue>"));
}

#[test]
fn test_json_report_shape() {
    let report = report(vec![payer("Aetna", 1)]);
    let json: serde_json::Value = serde_json::from_str(&report_json(&report).unwrap()).unwrap();
    assert_eq!(json["source"], "claims.csv");
    assert_eq!(json["cpt_analysis"][0]["Denial_Rate"], 25.0);
    assert_eq!(json["payer_denials"][0]["Insurance_Company"], "Aetna");
    assert_eq!(json["payer_denials"][0]["Denied_Claims_Count"], 1);
    assert_eq!(json["provider_denials"][0]["Physician_Name"], "Dr. Aetna");
    assert_eq!(json["root_causes"][0]["Root Cause"], "Modifier Issues");
    assert_eq!(json["cleaning"]["balance_defaulted"], 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report.json");
    write_report_json(&path, &report).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"Denied_Claims_Count\": 1"));
}
