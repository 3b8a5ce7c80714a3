//! Synthetic claims datasets by row sampling with replacement.
//!
//! Whole rows are drawn, so relationships between columns survive. The
//! sequence of drawn rows is fixed by the seed.

use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

/// Name of the row-number column some exports carry.
pub const INDEX_COLUMN: &str = "#";
pub const DEFAULT_SAMPLE_ROWS: usize = 3000;
pub const DEFAULT_SAMPLE_SEED: u64 = 42;
pub const DEFAULT_SKIP_ROWS: usize = 2;
pub const DEFAULT_SAMPLE_OUTPUT: &str = "synthetic_claims_dataset.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleOptions {
    /// Rows to draw.
    pub rows: usize,
    pub seed: u64,
    /// Leading lines dropped before the header.
    pub skip_rows: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SAMPLE_ROWS,
            seed: DEFAULT_SAMPLE_SEED,
            skip_rows: DEFAULT_SKIP_ROWS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSummary {
    pub source_rows: usize,
    pub rows_written: usize,
    pub dropped_index_column: bool,
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        rest = rest.split_once('\n').map_or("", |(_, tail)| tail);
    }
    rest
}

fn without_column(record: &StringRecord, column: Option<usize>) -> StringRecord {
    match column {
        Some(skip) => record
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != skip)
            .map(|(_, field)| field)
            .collect(),
        None => record.clone(),
    }
}

/// Draws `options.rows` rows from `text` and writes them as CSV to `writer`.
pub fn sample_text<W: std::io::Write>(
    text: &str,
    writer: W,
    options: &SampleOptions,
) -> Result<SampleSummary> {
    let body = skip_lines(text, options.skip_rows);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader.headers().context("read header")?.clone();
    let index_column = headers.iter().position(|name| name.trim() == INDEX_COLUMN);
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("read rows")?;
    if records.is_empty() {
        bail!("no data rows to sample");
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut out = WriterBuilder::new().flexible(true).from_writer(writer);
    out.write_record(&without_column(&headers, index_column))?;
    for _ in 0..options.rows {
        let pick = rng.random_range(0..records.len());
        out.write_record(&without_column(&records[pick], index_column))?;
    }
    out.flush()?;

    Ok(SampleSummary {
        source_rows: records.len(),
        rows_written: options.rows,
        dropped_index_column: index_column.is_some(),
    })
}

/// Samples the CSV at `input` into `output`.
pub fn sample_file(input: &Path, output: &Path, options: &SampleOptions) -> Result<SampleSummary> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("read {}", input.display()))?;
    let file = std::fs::File::create(output)
        .with_context(|| format!("create {}", output.display()))?;
    let summary = sample_text(&text, file, options)
        .with_context(|| format!("sample {}", input.display()))?;
    if summary.dropped_index_column {
        warn!(column = INDEX_COLUMN, "dropped index column");
    }
    info!(
        input = %input.display(),
        output = %output.display(),
        source_rows = summary.source_rows,
        rows = summary.rows_written,
        seed = options.seed,
        "sample written"
    );
    Ok(summary)
}
