use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use denial_cli::config::{ConfigOverrides, DashboardConfig};
use denial_cli::sample::{SampleOptions, SampleSummary, sample_file};
use denial_cli::server::{AppState, model_status, serve};
use denial_core::{PredictionModel, analyze_upload};
use denial_ingest::CsvUpload;
use denial_model::DenialReport;
use denial_report::{DashboardOptions, write_dashboard, write_report_json};
use denial_transform::ROOT_CAUSE_TAXONOMY;

use crate::cli::{AnalyzeArgs, SampleArgs, ServeArgs};
use crate::summary::{apply_table_style, header_cell};

/// Loads the prediction artifact once; a missing file is not an error.
fn load_model(path: &Path) -> Result<Option<Arc<PredictionModel>>> {
    let model = PredictionModel::load(path)
        .with_context(|| format!("load prediction model {}", path.display()))?;
    Ok(model.map(Arc::new))
}

pub struct AnalyzeOutcome {
    pub report: DenialReport,
    pub model_status: String,
}

pub fn run_analyze(args: &AnalyzeArgs, config_file: Option<&Path>) -> Result<AnalyzeOutcome> {
    let config = DashboardConfig::resolve(
        config_file,
        ConfigOverrides {
            model_path: args.model.clone(),
            chart_top_n: args.top_n,
            ..ConfigOverrides::default()
        },
    )?;
    let span = info_span!("analyze", input = %args.input.display());
    let _guard = span.enter();

    let model = load_model(&config.model_path)?;
    let upload = CsvUpload::from_path(&args.input, config.max_upload_bytes)
        .with_context(|| format!("read {}", args.input.display()))?;
    let report = analyze_upload(&upload, model.as_deref())
        .with_context(|| format!("analyze {}", args.input.display()))?;
    let status = model_status(model.as_deref());

    if let Some(path) = &args.html {
        let options = DashboardOptions {
            chart_top_n: config.chart_top_n,
            model_status: Some(status.clone()),
        };
        write_dashboard(path, &report, &options)
            .with_context(|| format!("write {}", path.display()))?;
    }
    if let Some(path) = &args.json {
        write_report_json(path, &report).with_context(|| format!("write {}", path.display()))?;
    }
    info!(
        rows = report.total_claims,
        denied = report.denied_claims,
        "analysis complete"
    );
    Ok(AnalyzeOutcome {
        report,
        model_status: status,
    })
}

pub fn run_serve(args: &ServeArgs, config_file: Option<&Path>) -> Result<()> {
    let config = DashboardConfig::resolve(
        config_file,
        ConfigOverrides {
            bind: args.bind,
            model_path: args.model.clone(),
            max_upload_bytes: args.max_upload_bytes,
            chart_top_n: args.top_n,
        },
    )?;
    let model = load_model(&config.model_path)?;
    let state = Arc::new(AppState::new(config, model)?);
    let runtime = tokio::runtime::Runtime::new().context("start async runtime")?;
    runtime.block_on(serve(state))
}

pub fn run_sample(args: &SampleArgs) -> Result<SampleSummary> {
    let options = SampleOptions {
        rows: args.rows,
        seed: args.seed,
        skip_rows: args.skip_rows,
    };
    sample_file(&args.input, &args.output, &options)
}

pub fn run_taxonomy() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Root Cause"),
        header_cell("Keywords"),
        header_cell("Logical Reason"),
        header_cell("Recommended Strategy"),
    ]);
    apply_table_style(&mut table);
    for category in ROOT_CAUSE_TAXONOMY {
        table.add_row(vec![
            Cell::new(category.name),
            Cell::new(category.keywords.join(", ")),
            Cell::new(category.logical_reason),
            Cell::new(category.recommended_strategy),
        ]);
    }
    println!("{table}");
}
