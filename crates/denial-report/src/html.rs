//! Dashboard page rendering.
//!
//! The page always carries the upload form. When a report is present it is
//! followed by the five summary tables, each using the `styled-table` class,
//! and up to three charts. A chart is left out when its table has no rows.

use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use denial_model::{DenialCount, DenialReport, PayerDenialRow, ProviderDenialRow};

use crate::chart::{BarChart, cpt_chart, payer_chart, provider_chart, write_bar_chart};
use crate::error::{ReportError, Result};

pub const PAGE_TITLE: &str = "Claims Denial Dashboard";
pub const TABLE_CLASS: &str = "styled-table";
pub const DEFAULT_CHART_TOP_N: usize = 10;

const STYLE: &str = "
body { font-family: Arial, Helvetica, sans-serif; margin: 2rem; color: #222; }
h1 { margin-bottom: 0.5rem; }
.upload { margin-bottom: 1.5rem; }
.summary, .model-status { color: #555; }
.styled-table { border-collapse: collapse; margin: 1rem 0; min-width: 480px; }
.styled-table th { background: #4682b4; color: #fff; text-align: left; }
.styled-table th, .styled-table td { border: 1px solid #ddd; padding: 6px 12px; }
.styled-table tbody tr:nth-of-type(even) { background: #f5f5f5; }
.chart { display: block; margin: 1rem 0; }
";

/// Page-level settings that do not come from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Bars per chart.
    pub chart_top_n: usize,
    /// Line describing the prediction model, e.g. its digest.
    pub model_status: Option<String>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            chart_top_n: DEFAULT_CHART_TOP_N,
            model_status: None,
        }
    }
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    start(writer, name, &[])?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn empty<W: Write>(writer: &mut Writer<W>, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

/// Writes a table with a header row and one body row per entry.
pub fn write_table<W: Write>(
    writer: &mut Writer<W>,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<()> {
    start(writer, "table", &[("class", TABLE_CLASS)])?;
    start(writer, "thead", &[])?;
    start(writer, "tr", &[])?;
    for header in headers {
        text_element(writer, "th", header)?;
    }
    end(writer, "tr")?;
    end(writer, "thead")?;
    start(writer, "tbody", &[])?;
    for row in rows {
        start(writer, "tr", &[])?;
        for cell in row {
            text_element(writer, "td", cell)?;
        }
        end(writer, "tr")?;
    }
    end(writer, "tbody")?;
    end(writer, "table")
}

fn count_rows<R: DenialCount>(rows: &[R]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| vec![row.key().to_string(), row.denied_claims_count().to_string()])
        .collect()
}

fn count_headers<R: DenialCount>() -> [&'static str; 2] {
    [R::KEY_COLUMN.as_str(), "Denied_Claims_Count"]
}

fn write_section<W: Write>(
    writer: &mut Writer<W>,
    heading: &str,
    headers: &[&str],
    rows: &[Vec<String>],
    chart: Option<&BarChart>,
) -> Result<()> {
    start(writer, "section", &[])?;
    text_element(writer, "h2", heading)?;
    write_table(writer, headers, rows)?;
    if let Some(chart) = chart {
        write_bar_chart(writer, chart)?;
    }
    end(writer, "section")
}

fn write_upload_form<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    start(
        writer,
        "form",
        &[
            ("class", "upload"),
            ("method", "post"),
            ("action", "/"),
            ("enctype", "multipart/form-data"),
        ],
    )?;
    empty(
        writer,
        "input",
        &[("type", "file"), ("name", "file"), ("accept", ".csv")],
    )?;
    text_element(writer, "button", "Upload")?;
    end(writer, "form")
}

fn write_report<W: Write>(
    writer: &mut Writer<W>,
    report: &DenialReport,
    options: &DashboardOptions,
) -> Result<()> {
    let top_n = options.chart_top_n;
    let mut summary = format!(
        "{}: {} claims, {} denied",
        report.source, report.total_claims, report.denied_claims
    );
    if report.header_offset > 0 {
        summary.push_str(&format!(", header found on row {}", report.header_offset + 1));
    }
    start(writer, "p", &[("class", "summary")])?;
    writer.write_event(Event::Text(BytesText::new(&summary)))?;
    end(writer, "p")?;

    let defaulted = report.cleaning.total_defaulted();
    if defaulted > 0 {
        let note = format!(
            "{defaulted} non-numeric amount(s) counted as 0 (Payment_Amount: {}, Balance: {})",
            report.cleaning.payment_amount_defaulted, report.cleaning.balance_defaulted
        );
        start(writer, "p", &[("class", "summary")])?;
        writer.write_event(Event::Text(BytesText::new(&note)))?;
        end(writer, "p")?;
    }

    let cpt_rows: Vec<Vec<String>> = report
        .cpt_analysis
        .iter()
        .map(|row| {
            vec![
                row.cpt_code.clone(),
                row.total_claims.to_string(),
                row.denied_claims.to_string(),
                format!("{:.2}", row.denial_rate),
            ]
        })
        .collect();
    write_section(
        writer,
        "CPT Code Denial Analysis",
        &["CPT_Code", "Total_Claims", "Denied_Claims", "Denial_Rate"],
        &cpt_rows,
        cpt_chart(&report.cpt_analysis, top_n).as_ref(),
    )?;

    write_section(
        writer,
        "Denials by Payer",
        &count_headers::<PayerDenialRow>(),
        &count_rows(&report.payer_denials),
        payer_chart(&report.payer_denials, top_n).as_ref(),
    )?;

    write_section(
        writer,
        "Denials by Provider",
        &count_headers::<ProviderDenialRow>(),
        &count_rows(&report.provider_denials),
        provider_chart(&report.provider_denials, top_n).as_ref(),
    )?;

    let cause_rows: Vec<Vec<String>> = report
        .root_causes
        .iter()
        .map(|row| {
            vec![
                row.root_cause.clone(),
                row.count.to_string(),
                row.logical_reason.clone(),
            ]
        })
        .collect();
    write_section(
        writer,
        "Root Cause Analysis",
        &["Root Cause", "Count", "Logical Reason"],
        &cause_rows,
        None,
    )?;

    let recommendation_rows: Vec<Vec<String>> = report
        .recommendations
        .iter()
        .map(|row| vec![row.root_cause.clone(), row.recommended_strategy.clone()])
        .collect();
    write_section(
        writer,
        "Recommendations",
        &["Root Cause", "Recommended Strategy"],
        &recommendation_rows,
        None,
    )
}

/// Renders the dashboard. Without a report only the upload form is shown.
pub fn render_dashboard(report: Option<&DenialReport>, options: &DashboardOptions) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    start(&mut writer, "html", &[("lang", "en")])?;

    start(&mut writer, "head", &[])?;
    empty(&mut writer, "meta", &[("charset", "utf-8")])?;
    text_element(&mut writer, "title", PAGE_TITLE)?;
    text_element(&mut writer, "style", STYLE)?;
    end(&mut writer, "head")?;

    start(&mut writer, "body", &[])?;
    text_element(&mut writer, "h1", PAGE_TITLE)?;
    write_upload_form(&mut writer)?;
    if let Some(status) = options.model_status.as_deref() {
        start(&mut writer, "p", &[("class", "model-status")])?;
        writer.write_event(Event::Text(BytesText::new(status)))?;
        end(&mut writer, "p")?;
    }
    if let Some(report) = report {
        write_report(&mut writer, report, options)?;
    }
    end(&mut writer, "body")?;
    end(&mut writer, "html")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Renders the dashboard for `report` and writes it to `path`.
pub fn write_dashboard(path: &Path, report: &DenialReport, options: &DashboardOptions) -> Result<()> {
    let html = render_dashboard(Some(report), options)?;
    std::fs::write(path, html).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "dashboard written");
    Ok(())
}
