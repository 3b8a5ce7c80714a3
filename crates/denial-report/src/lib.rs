//! Denial report output.
//!
//! - **html**: the dashboard page with the upload form and summary tables
//! - **chart**: top-N horizontal bar charts as inline SVG
//! - **json**: machine-readable report files

pub mod chart;
pub mod error;
pub mod html;
pub mod json;

pub use chart::{BarChart, cpt_chart, payer_chart, provider_chart, write_bar_chart};
pub use error::{ReportError, Result};
pub use html::{
    DEFAULT_CHART_TOP_N, DashboardOptions, PAGE_TITLE, TABLE_CLASS, render_dashboard,
    write_dashboard,
};
pub use json::{report_json, write_report_json};
