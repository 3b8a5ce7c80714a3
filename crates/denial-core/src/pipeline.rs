//! The per-upload analysis pipeline.
//!
//! Stages run in a fixed order and each one consumes the previous stage's
//! output: load and detect the header, clean, aggregate, classify. A failure
//! in any stage ends the request; nothing is retried.

use std::time::Instant;

use tracing::{info, info_span};

use denial_ingest::{CsvUpload, load_claims_text};
use denial_model::DenialReport;
use denial_transform::{
    ClaimsFrame, CleanedClaims, RootCauseClassifier, clean_claims, cpt_denial_analysis,
    denial_reasons, payer_denials, provider_denials,
};

use crate::error::Result;
use crate::prediction::PredictionModel;

/// Loads an upload into a claims frame with canonical headers.
pub fn ingest(upload: &CsvUpload) -> Result<ClaimsFrame> {
    let span = info_span!("ingest", source = %upload.filename(), bytes = upload.len());
    let _guard = span.enter();
    let start = Instant::now();

    let loaded = load_claims_text(upload.text()?)?;
    info!(
        header_offset = loaded.header_offset,
        rows = loaded.data.height(),
        columns = loaded.data.width(),
        duration_ms = start.elapsed().as_millis(),
        "claims loaded"
    );
    Ok(ClaimsFrame::new(
        upload.filename(),
        loaded.header_offset,
        loaded.data,
    ))
}

/// Aggregates and classifies cleaned claims into a report.
pub fn summarize(
    claims: &CleanedClaims,
    classifier: &RootCauseClassifier,
    model: Option<&PredictionModel>,
) -> Result<DenialReport> {
    let span = info_span!("summarize", source = %claims.frame().source);
    let _guard = span.enter();
    let start = Instant::now();

    let cpt_analysis = cpt_denial_analysis(claims)?;
    let payer_rows = payer_denials(claims)?;
    let provider_rows = provider_denials(claims)?;
    let reasons = denial_reasons(claims)?;
    let root_causes = classifier.classify(reasons.iter().map(String::as_str));
    let recommendations = classifier.recommendations();

    info!(
        cpt_codes = cpt_analysis.len(),
        payers = payer_rows.len(),
        providers = provider_rows.len(),
        reasons = reasons.len(),
        duration_ms = start.elapsed().as_millis(),
        "denials summarized"
    );

    Ok(DenialReport {
        source: claims.frame().source.clone(),
        header_offset: claims.frame().header_offset,
        total_claims: claims.record_count() as u64,
        denied_claims: claims.denied_count() as u64,
        cpt_analysis,
        payer_denials: payer_rows,
        provider_denials: provider_rows,
        root_causes,
        recommendations,
        cleaning: claims.stats(),
        model_loaded: model.is_some(),
    })
}

/// Runs every stage for one upload.
pub fn analyze_upload(upload: &CsvUpload, model: Option<&PredictionModel>) -> Result<DenialReport> {
    let classifier = RootCauseClassifier::new()?;
    analyze_with(upload, &classifier, model)
}

/// Runs every stage with a classifier compiled by the caller.
pub fn analyze_with(
    upload: &CsvUpload,
    classifier: &RootCauseClassifier,
    model: Option<&PredictionModel>,
) -> Result<DenialReport> {
    let frame = ingest(upload)?;
    let cleaned = {
        let span = info_span!("clean", source = %frame.source);
        span.in_scope(|| clean_claims(frame))?
    };
    if cleaned.stats().total_defaulted() > 0 {
        info!(
            payment_amount_defaulted = cleaned.stats().payment_amount_defaulted,
            balance_defaulted = cleaned.stats().balance_defaulted,
            "non-numeric amounts replaced with 0"
        );
    }
    summarize(&cleaned, classifier, model)
}
