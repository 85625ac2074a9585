//! Output renderers for a finished dashboard pass.
//!
//! Each renderer is a pure function of the outcome and the run
//! configuration, so unchanged artifacts always render the same body.

pub mod html;
pub mod summary;
pub mod text;

use crate::config::{OutputFormat, ReportConfig};
use crate::core::dashboard::DashboardOutcome;
use crate::utils::error::Result;

pub const CHART_TITLE: &str = "Tours per city";
pub const NO_RESULTS_MESSAGE: &str = "No results found. Run the processing first!";

pub fn render(outcome: &DashboardOutcome, config: &ReportConfig) -> Result<String> {
    match config.format {
        OutputFormat::Text => Ok(text::render_text(outcome, config)),
        OutputFormat::Html => Ok(html::render_html(outcome, config)),
        OutputFormat::Json => summary::render_json(outcome, config),
    }
}

pub(crate) fn success_banner(total_tours: usize) -> String {
    format!("{} tours extracted successfully!", total_tours)
}

/// Bar length for `count`, scaled so the largest count fills `width`.
pub(crate) fn bar_length(count: usize, max: usize, width: usize) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count as f64 * width as f64 / max as f64).round() as usize;
    scaled.clamp(1, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scaling() {
        assert_eq!(bar_length(2, 2, 40), 40);
        assert_eq!(bar_length(1, 2, 40), 20);
        assert_eq!(bar_length(1, 1000, 40), 1);
        assert_eq!(bar_length(0, 5, 40), 0);
    }
}
