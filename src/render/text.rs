use super::{bar_length, success_banner, CHART_TITLE, NO_RESULTS_MESSAGE};
use crate::config::ReportConfig;
use crate::core::dashboard::{DashboardOutcome, DashboardReport};
use crate::core::metrics::{format_count, format_price};
use crate::domain::model::{LocationCount, Table};

const RULE_WIDTH: usize = 70;
const BAR_WIDTH: usize = 40;

pub fn render_text(outcome: &DashboardOutcome, config: &ReportConfig) -> String {
    let mut lines = vec![format!("🌍 {}", config.title), "=".repeat(RULE_WIDTH)];

    match outcome {
        DashboardOutcome::NoResults => {
            lines.push(format!("⚠️  {}", NO_RESULTS_MESSAGE));
            lines.push(String::new());
            lines.push(format!("    {}", config.remedy_command));
        }
        DashboardOutcome::Ready(report) => render_report(&mut lines, report, config),
    }

    lines.push(String::new());
    lines.join("\n")
}

fn render_report(lines: &mut Vec<String>, report: &DashboardReport, config: &ReportConfig) {
    let metrics = &report.metrics;

    lines.push(format!(
        "✅ {} (generated {})",
        success_banner(metrics.total_tours),
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
    lines.push(String::new());
    lines.push(format!("🎯 {:<16}{}", "Total tours", metrics.total_tours));
    lines.push(format!(
        "🏙️ {:<16}{}",
        "Cities",
        format_count(metrics.city_count, &config.placeholder)
    ));
    lines.push(format!(
        "💰 {:<16}{}",
        "Average price",
        format_price(metrics.average_price, &config.currency, &config.placeholder)
    ));

    if let Some(table) = &report.table {
        lines.push("-".repeat(RULE_WIDTH));
        lines.push(format!("📋 Extracted data ({} rows)", table.nrows()));
        lines.extend(table_lines(table));

        if let Some(top) = &report.top_locations {
            lines.push(String::new());
            lines.push(format!("📊 {}", CHART_TITLE));
            lines.extend(chart_lines(top));
        }
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines.push("📥 Downloads".to_string());
    for download in &report.downloads {
        lines.push(format!(
            "  {:<14}{:<20}{:<20}{} bytes",
            download.kind.label(),
            download.file_name,
            short_content_type(download.content_type),
            download.size()
        ));
    }
}

fn short_content_type(content_type: &str) -> &str {
    if content_type == crate::domain::model::XLSX_CONTENT_TYPE {
        "spreadsheet (xlsx)"
    } else {
        content_type
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// Fixed-width rendering of every row and column, cells printed in full.
pub fn table_lines(table: &Table) -> Vec<String> {
    if table.ncols() == 0 {
        return vec!["(empty sheet)".to_string()];
    }

    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    let headers = table.headers();

    let widths: Vec<usize> = (0..table.ncols())
        .map(|i| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(headers[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_row(headers));
    lines.push(
        widths
            .iter()
            .map(|&w| "-".repeat(w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(cells.iter().map(|row| format_row(row)));
    lines
}

/// Horizontal bars, one per location, in the given order.
pub fn chart_lines(top: &[LocationCount]) -> Vec<String> {
    let max = top.iter().map(|c| c.count).max().unwrap_or(0);
    let label_width = top
        .iter()
        .map(|c| c.location.chars().count())
        .max()
        .unwrap_or(0);

    top.iter()
        .map(|c| {
            format!(
                "{} | {} {}",
                pad(&c.location, label_width),
                "█".repeat(bar_length(c.count, max, BAR_WIDTH)),
                c.count
            )
        })
        .collect()
}
