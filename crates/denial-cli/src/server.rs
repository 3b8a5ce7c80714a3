//! HTTP upload server for the dashboard.
//!
//! `GET /` serves the empty upload page and `POST /` analyzes the multipart
//! field `file`. Problems with the upload answer `400` with a plain-text
//! message. Each analysis runs on the blocking pool.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use axum::routing::get;
use tracing::{error, info, warn};

use denial_core::{PredictionModel, analyze_with};
use denial_ingest::{CsvUpload, IngestError};
use denial_report::{DashboardOptions, render_dashboard};
use denial_transform::RootCauseClassifier;

use crate::config::DashboardConfig;

/// Multipart field carrying the CSV.
pub const UPLOAD_FIELD: &str = "file";

/// Read-only state shared by every request.
#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    pub model: Option<Arc<PredictionModel>>,
    pub classifier: RootCauseClassifier,
}

impl AppState {
    pub fn new(config: DashboardConfig, model: Option<Arc<PredictionModel>>) -> Result<Self> {
        let classifier = RootCauseClassifier::new().context("compile root-cause taxonomy")?;
        Ok(Self {
            config,
            model,
            classifier,
        })
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            chart_top_n: self.config.chart_top_n,
            model_status: Some(model_status(self.model.as_deref())),
        }
    }
}

/// One-line description of the prediction model for the page.
pub fn model_status(model: Option<&PredictionModel>) -> String {
    match model {
        Some(model) => format!(
            "Prediction model loaded from {} ({} bytes, sha256 {})",
            model.path().display(),
            model.size_bytes(),
            model.sha256()
        ),
        None => "Prediction model not loaded".to_string(),
    }
}

/// An error answer: status code plus plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReply {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorReply {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<IngestError> for ErrorReply {
    fn from(err: IngestError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

/// Runs the pipeline on one uploaded file and renders the dashboard.
///
/// `filename` is `None` when the request had no file part.
pub fn analyze_upload_bytes(
    state: &AppState,
    filename: Option<&str>,
    bytes: Vec<u8>,
) -> std::result::Result<String, ErrorReply> {
    let upload = CsvUpload::new(filename, bytes).map_err(|err| {
        info!(reason = %err, "upload rejected");
        ErrorReply::from(err)
    })?;
    let start = Instant::now();
    let report = analyze_with(&upload, &state.classifier, state.model.as_deref()).map_err(|err| {
        if err.is_client_error() {
            info!(source = %upload.filename(), reason = %err, "upload rejected");
            ErrorReply::bad_request(err.to_string())
        } else {
            error!(source = %upload.filename(), error = %err, "analysis failed");
            ErrorReply::internal(err.to_string())
        }
    })?;
    info!(
        source = %report.source,
        rows = report.total_claims,
        denied = report.denied_claims,
        duration_ms = start.elapsed().as_millis(),
        "upload analyzed"
    );
    render_dashboard(Some(&report), &state.dashboard_options()).map_err(|err| {
        error!(error = %err, "dashboard rendering failed");
        ErrorReply::internal(err.to_string())
    })
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    match render_dashboard(None, &state.dashboard_options()) {
        Ok(html) => Html(html).into_response(),
        Err(err) => ErrorReply::internal(err.to_string()).into_response(),
    }
}

async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((filename, bytes.to_vec())),
                    Err(err) => {
                        warn!(error = %err, "failed to read upload");
                        return (err.status(), err.body_text()).into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "malformed multipart request");
                return (err.status(), err.body_text()).into_response();
            }
        }
    }

    let (filename, bytes) = match file {
        Some((filename, bytes)) => (Some(filename), bytes),
        None => (None, Vec::new()),
    };
    let result = tokio::task::spawn_blocking(move || {
        analyze_upload_bytes(&state, filename.as_deref(), bytes)
    })
    .await;
    match result {
        Ok(Ok(html)) => Html(html).into_response(),
        Ok(Err(reply)) => reply.into_response(),
        Err(err) => {
            error!(error = %err, "analysis task failed");
            ErrorReply::internal("analysis task failed").into_response()
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(state.config.max_upload_bytes).unwrap_or(usize::MAX);
    Router::new()
        .route("/", get(index).post(upload))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Binds the configured address and serves until interrupted.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = state.config.bind;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(addr = %addr, model_loaded = state.model.is_some(), "dashboard listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown requested");
            }
        })
        .await
        .context("serve dashboard")
}
