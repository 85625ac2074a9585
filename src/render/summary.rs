use crate::config::ReportConfig;
use crate::core::dashboard::DashboardOutcome;
use crate::core::export::Download;
use crate::core::metrics::{format_count, format_price};
use crate::domain::model::LocationCount;
use crate::utils::error::Result;
use serde::Serialize;

/// Machine-readable view of a pass.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Summary<'a> {
    NoResults {
        message: &'static str,
        remedy_command: &'a str,
    },
    ResultsAvailable {
        generated_at: String,
        total_tours: usize,
        city_count: Option<usize>,
        average_price: Option<f64>,
        city_count_label: String,
        average_price_label: String,
        table: Option<TableSummary<'a>>,
        top_locations: Option<&'a [LocationCount]>,
        downloads: Vec<DownloadSummary<'a>>,
    },
}

#[derive(Debug, Serialize)]
pub struct TableSummary<'a> {
    pub columns: &'a [String],
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct DownloadSummary<'a> {
    #[serde(flatten)]
    pub download: &'a Download,
    pub size: usize,
}

pub fn summarize<'a>(outcome: &'a DashboardOutcome, config: &'a ReportConfig) -> Summary<'a> {
    match outcome {
        DashboardOutcome::NoResults => Summary::NoResults {
            message: super::NO_RESULTS_MESSAGE,
            remedy_command: &config.remedy_command,
        },
        DashboardOutcome::Ready(report) => {
            let metrics = &report.metrics;
            Summary::ResultsAvailable {
                generated_at: report.generated_at.to_rfc3339(),
                total_tours: metrics.total_tours,
                city_count: metrics.city_count,
                average_price: metrics.average_price,
                city_count_label: format_count(metrics.city_count, &config.placeholder),
                average_price_label: format_price(
                    metrics.average_price,
                    &config.currency,
                    &config.placeholder,
                ),
                table: report.table.as_ref().map(|t| TableSummary {
                    columns: t.headers(),
                    rows: t.nrows(),
                }),
                top_locations: report.top_locations.as_deref(),
                downloads: report
                    .downloads
                    .iter()
                    .map(|download| DownloadSummary {
                        download,
                        size: download.size(),
                    })
                    .collect(),
            }
        }
    }
}

pub fn render_json(outcome: &DashboardOutcome, config: &ReportConfig) -> Result<String> {
    let mut json = serde_json::to_string_pretty(&summarize(outcome, config))?;
    json.push('\n');
    Ok(json)
}
