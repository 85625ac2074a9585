// Self-contained HTML page: no scripts, no external assets. Download links
// are relative, so the page is meant to sit in the export directory.

use super::{bar_length, success_banner, CHART_TITLE, NO_RESULTS_MESSAGE};
use crate::config::ReportConfig;
use crate::core::dashboard::{DashboardOutcome, DashboardReport};
use crate::core::metrics::{format_count, format_price};
use crate::domain::model::{LocationCount, Table};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
h1{text-align:center;color:#1E88E5}\
.banner{padding:.75rem 1rem;border-radius:6px;margin:1rem 0}\
.ok{background:#e6f4ea}.warn{background:#fff4e5}\
.metrics{display:grid;grid-template-columns:repeat(3,1fr);gap:1rem}\
.card{border:1px solid #ddd;border-radius:6px;padding:1rem}\
.card .value{font-size:1.6rem;font-weight:bold}\
table{border-collapse:collapse;width:100%}\
td,th{border:1px solid #ddd;padding:.3rem .5rem;text-align:left}\
.bar-row{display:flex;align-items:center;margin:.2rem 0}\
.bar-label{width:12rem}\
.bar{background:#1E88E5;height:1.1rem;margin-right:.5rem}\
pre{background:#f5f5f5;padding:.75rem}";

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_html(outcome: &DashboardOutcome, config: &ReportConfig) -> String {
    let title = escape(&config.title);
    let mut body = vec![format!("<h1>{}</h1>", title)];

    match outcome {
        DashboardOutcome::NoResults => {
            body.push(format!(
                "<div class=\"banner warn\">⚠️ {}</div>",
                NO_RESULTS_MESSAGE
            ));
            body.push(format!("<pre><code>{}</code></pre>", escape(&config.remedy_command)));
        }
        DashboardOutcome::Ready(report) => render_report(&mut body, report, config),
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        title,
        STYLE,
        body.join("\n")
    )
}

fn render_report(body: &mut Vec<String>, report: &DashboardReport, config: &ReportConfig) {
    let metrics = &report.metrics;

    body.push(format!(
        "<div class=\"banner ok\">✅ {}</div>",
        success_banner(metrics.total_tours)
    ));
    body.push("<div class=\"metrics\">".to_string());
    body.push(card("🎯 Total tours", &metrics.total_tours.to_string()));
    body.push(card(
        "🏙️ Cities",
        &format_count(metrics.city_count, &config.placeholder),
    ));
    body.push(card(
        "💰 Average price",
        &format_price(metrics.average_price, &config.currency, &config.placeholder),
    ));
    body.push("</div>".to_string());

    if let Some(table) = &report.table {
        body.push("<h2>📋 Extracted data</h2>".to_string());
        body.push(table_html(table));

        if let Some(top) = &report.top_locations {
            body.push(format!("<h2>📊 {}</h2>", CHART_TITLE));
            body.push(chart_html(top));
        }
    }

    body.push("<h2>📥 Downloads</h2>".to_string());
    body.push("<ul>".to_string());
    for download in &report.downloads {
        body.push(format!(
            "<li><a href=\"{name}\" download=\"{name}\" type=\"{ty}\">{label}</a> ({size} bytes)</li>",
            name = escape(download.file_name),
            ty = escape(download.content_type),
            label = download.kind.label(),
            size = download.size()
        ));
    }
    body.push("</ul>".to_string());
    body.push(format!(
        "<p><small>Generated {}</small></p>",
        report.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));
}

fn card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"card\"><div>{}</div><div class=\"value\">{}</div></div>",
        escape(label),
        escape(value)
    )
}

fn table_html(table: &Table) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for header in table.headers() {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in table.rows() {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(&cell.to_string())));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>");
    out
}

fn chart_html(top: &[LocationCount]) -> String {
    let max = top.iter().map(|c| c.count).max().unwrap_or(0);
    top.iter()
        .map(|c| {
            format!(
                "<div class=\"bar-row\"><span class=\"bar-label\">{}</span>\
<span class=\"bar\" style=\"width:{}%\"></span>{}</div>",
                escape(&c.location),
                bar_length(c.count, max, 100),
                c.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CellValue, Metrics};
    use chrono::Local;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_no_results_page() {
        let html = render_html(&DashboardOutcome::NoResults, &ReportConfig::default());
        assert!(html.contains("banner warn"));
        assert!(html.contains("python main.py --pdf &#39;input/PRIVATE_TOURS_FRANCE_2024-EN.pdf&#39;"));
        assert!(!html.contains("class=\"metrics\""));
    }

    #[test]
    fn test_report_page_escapes_cells() {
        let table = Table::new(
            vec!["Location_Main".into()],
            vec![vec![CellValue::Text("<Paris>".into())]],
        );
        let outcome = DashboardOutcome::Ready(Box::new(DashboardReport {
            generated_at: Local::now(),
            metrics: Metrics {
                total_tours: 1,
                city_count: Some(1),
                average_price: None,
            },
            table: Some(table),
            top_locations: Some(vec![LocationCount {
                location: "<Paris>".into(),
                count: 1,
            }]),
            downloads: Vec::new(),
        }));

        let html = render_html(&outcome, &ReportConfig::default());
        assert!(html.contains("<td>&lt;Paris&gt;</td>"));
        assert!(html.contains("width:100%"));
        assert!(!html.contains("<Paris>"));
    }
}
