//! CLI argument definitions for the claims denial dashboard.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use denial_cli::sample::{
    DEFAULT_SAMPLE_OUTPUT, DEFAULT_SAMPLE_ROWS, DEFAULT_SAMPLE_SEED, DEFAULT_SKIP_ROWS,
};

#[derive(Parser)]
#[command(
    name = "denial-cli",
    version,
    about = "Claims denial dashboard - analyze medical billing denials",
    long_about = "Analyze a medical claims CSV export for denial patterns.\n\n\
                  Reports denials by CPT code, payer, and provider, classifies\n\
                  denial reasons into root causes, and serves an upload dashboard."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Dashboard configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze a claims CSV and print the denial summary.
    Analyze(AnalyzeArgs),

    /// Serve the upload dashboard over HTTP.
    Serve(ServeArgs),

    /// Write a synthetic dataset by sampling rows of a claims CSV.
    Sample(SampleArgs),

    /// List the root-cause categories and their keywords.
    Taxonomy,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Claims CSV to analyze.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Write the dashboard page to this file.
    #[arg(long = "html", value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// Write the report as JSON to this file.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Prediction model artifact.
    #[arg(long = "model", value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Bars per chart in the dashboard page.
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long = "bind", value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Prediction model artifact.
    #[arg(long = "model", value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Largest accepted upload in bytes.
    #[arg(long = "max-upload-bytes", value_name = "BYTES")]
    pub max_upload_bytes: Option<u64>,

    /// Bars per chart in the dashboard page.
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,
}

#[derive(Parser)]
pub struct SampleArgs {
    /// Source claims CSV.
    #[arg(value_name = "CSV", default_value = "data.csv")]
    pub input: PathBuf,

    /// Output CSV.
    #[arg(long = "output", short = 'o', value_name = "PATH", default_value = DEFAULT_SAMPLE_OUTPUT)]
    pub output: PathBuf,

    /// Rows to draw (with replacement).
    #[arg(long = "rows", default_value_t = DEFAULT_SAMPLE_ROWS)]
    pub rows: usize,

    /// Random seed.
    #[arg(long = "seed", default_value_t = DEFAULT_SAMPLE_SEED)]
    pub seed: u64,

    /// Leading lines to skip before the header.
    #[arg(long = "skip-rows", default_value_t = DEFAULT_SKIP_ROWS)]
    pub skip_rows: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
