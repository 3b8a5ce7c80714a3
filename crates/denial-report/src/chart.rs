//! Horizontal bar charts rendered as inline SVG.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use denial_model::{CptDenialRow, DenialCount, PayerDenialRow, ProviderDenialRow};

use crate::error::Result;

pub const CPT_CHART_TITLE: &str = "Top CPT Codes by Denials";
pub const PAYER_CHART_TITLE: &str = "Top Payers by Denials";
pub const PROVIDER_CHART_TITLE: &str = "Top Providers by Denials";

pub const CPT_CHART_COLOR: &str = "steelblue";
pub const PAYER_CHART_COLOR: &str = "salmon";
pub const PROVIDER_CHART_COLOR: &str = "seagreen";

const WIDTH: u32 = 760;
const LABEL_WIDTH: u32 = 200;
const VALUE_GUTTER: u32 = 60;
const TITLE_HEIGHT: u32 = 40;
const ROW_HEIGHT: u32 = 26;
const BAR_HEIGHT: u32 = 18;
const BOTTOM_MARGIN: u32 = 16;

/// One bar chart: labels with their denied claim counts, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub color: &'static str,
    pub value_label: &'static str,
    pub bars: Vec<(String, u64)>,
}

impl BarChart {
    /// Builds a chart from the first `top_n` entries, or `None` when there is
    /// nothing to plot.
    pub fn top_n<I>(
        title: &'static str,
        color: &'static str,
        value_label: &'static str,
        entries: I,
        top_n: usize,
    ) -> Option<Self>
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let bars: Vec<(String, u64)> = entries.into_iter().take(top_n).collect();
        if bars.is_empty() {
            return None;
        }
        Some(Self {
            title,
            color,
            value_label,
            bars,
        })
    }

    pub fn height(&self) -> u32 {
        TITLE_HEIGHT + ROW_HEIGHT * self.bars.len() as u32 + BOTTOM_MARGIN
    }
}

/// Denied claims per CPT code.
pub fn cpt_chart(rows: &[CptDenialRow], top_n: usize) -> Option<BarChart> {
    BarChart::top_n(
        CPT_CHART_TITLE,
        CPT_CHART_COLOR,
        "Denied_Claims",
        rows.iter()
            .map(|row| (row.cpt_code.clone(), row.denied_claims)),
        top_n,
    )
}

/// Denied claims per payer.
pub fn payer_chart(rows: &[PayerDenialRow], top_n: usize) -> Option<BarChart> {
    count_chart(PAYER_CHART_TITLE, PAYER_CHART_COLOR, rows, top_n)
}

/// Denied claims per provider.
pub fn provider_chart(rows: &[ProviderDenialRow], top_n: usize) -> Option<BarChart> {
    count_chart(PROVIDER_CHART_TITLE, PROVIDER_CHART_COLOR, rows, top_n)
}

fn count_chart<R: DenialCount>(
    title: &'static str,
    color: &'static str,
    rows: &[R],
    top_n: usize,
) -> Option<BarChart> {
    BarChart::top_n(
        title,
        color,
        "Denied_Claims_Count",
        rows.iter()
            .map(|row| (row.key().to_string(), row.denied_claims_count())),
        top_n,
    )
}

fn text_element<W: Write>(
    writer: &mut Writer<W>,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new("text");
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}

/// Writes `chart` as an `<svg>` element.
pub fn write_bar_chart<W: Write>(writer: &mut Writer<W>, chart: &BarChart) -> Result<()> {
    let height = chart.height().to_string();
    let view_box = format!("0 0 {WIDTH} {height}");
    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
    svg.push_attribute(("class", "chart"));
    svg.push_attribute(("width", WIDTH.to_string().as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    svg.push_attribute(("role", "img"));
    svg.push_attribute(("aria-label", chart.title));
    writer.write_event(Event::Start(svg))?;

    let center = (WIDTH / 2).to_string();
    text_element(
        writer,
        &[
            ("x", center.as_str()),
            ("y", "24"),
            ("text-anchor", "middle"),
            ("font-size", "16"),
            ("font-weight", "bold"),
        ],
        chart.title,
    )?;

    let max = chart.bars.iter().map(|(_, value)| *value).max().unwrap_or(0);
    let plot_width = WIDTH - LABEL_WIDTH - VALUE_GUTTER;
    for (idx, (label, value)) in chart.bars.iter().enumerate() {
        let top = TITLE_HEIGHT + ROW_HEIGHT * idx as u32;
        let bar_width = if max == 0 {
            0
        } else {
            (*value as f64 / max as f64 * f64::from(plot_width)).round() as u32
        };
        let baseline = (top + BAR_HEIGHT - 4).to_string();

        text_element(
            writer,
            &[
                ("x", (LABEL_WIDTH - 8).to_string().as_str()),
                ("y", baseline.as_str()),
                ("text-anchor", "end"),
                ("font-size", "12"),
            ],
            label,
        )?;

        let mut rect = BytesStart::new("rect");
        rect.push_attribute(("x", LABEL_WIDTH.to_string().as_str()));
        rect.push_attribute(("y", top.to_string().as_str()));
        rect.push_attribute(("width", bar_width.to_string().as_str()));
        rect.push_attribute(("height", BAR_HEIGHT.to_string().as_str()));
        rect.push_attribute(("fill", chart.color));
        writer.write_event(Event::Start(rect))?;
        let tooltip = format!("{label}: {value} {}", chart.value_label);
        writer.write_event(Event::Start(BytesStart::new("title")))?;
        writer.write_event(Event::Text(BytesText::new(&tooltip)))?;
        writer.write_event(Event::End(BytesEnd::new("title")))?;
        writer.write_event(Event::End(BytesEnd::new("rect")))?;

        text_element(
            writer,
            &[
                ("x", (LABEL_WIDTH + bar_width + 6).to_string().as_str()),
                ("y", baseline.as_str()),
                ("font-size", "12"),
            ],
            &value.to_string(),
        )?;
    }

    writer.write_event(Event::End(BytesEnd::new("svg")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts<R: DenialCount>(values: &[(&str, u64)]) -> Vec<R> {
        values
            .iter()
            .map(|(key, count)| R::new(key.to_string(), *count))
            .collect()
    }

    #[test]
    fn test_empty_rows_have_no_chart() {
        assert!(payer_chart(&[], 10).is_none());
        assert!(cpt_chart(&[], 10).is_none());
    }

    #[test]
    fn test_chart_keeps_top_n() {
        let rows: Vec<ProviderDenialRow> = counts(&[("A", 5), ("B", 3), ("C", 1)]);
        let chart = provider_chart(&rows, 2).unwrap();
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0], ("A".to_string(), 5));
        assert_eq!(chart.color, PROVIDER_CHART_COLOR);
    }

    #[test]
    fn test_svg_markup() {
        let rows: Vec<PayerDenialRow> = counts(&[("Aetna & Co", 4), ("Cigna", 2)]);
        let chart = payer_chart(&rows, 10).unwrap();
        let mut writer = Writer::new(Vec::new());
        write_bar_chart(&mut writer, &chart).unwrap();
        let svg = String::from_utf8(writer.into_inner()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(PAYER_CHART_TITLE));
        assert!(svg.contains("Aetna &amp; Co"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(r#"fill="salmon""#));
        assert!(svg.contains(r#"width="500""#));
    }
}
