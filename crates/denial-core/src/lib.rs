//! Denial analytics pipeline.
//!
//! Ties ingestion, cleaning, aggregation, and root-cause classification into
//! a single call per upload, and owns the optional prediction-model handle
//! that is loaded once at start-up.

pub mod error;
pub mod pipeline;
pub mod prediction;

pub use error::{PipelineError, Result};
pub use pipeline::{analyze_upload, analyze_with, ingest, summarize};
pub use prediction::{DEFAULT_MODEL_PATH, MODEL_PATH_ENV, PredictionModel};
