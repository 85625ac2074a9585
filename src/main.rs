use clap::Parser;
use tour_report::core::export::export_all;
use tour_report::render::render;
use tour_report::utils::error::{ErrorSeverity, ReportError};
use tour_report::utils::logger;
use tour_report::{CliConfig, Dashboard, DashboardOutcome, LocalStorage, ReportConfig};

fn main() {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tour-report");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.to_report_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(exit_code(&e));
    }
}

fn run(config: &ReportConfig) -> Result<(), ReportError> {
    tracing::info!("📁 Reading results from: {}", config.base_dir.display());

    let storage = LocalStorage::new(config.base_dir.clone());
    let mut dashboard = Dashboard::new_with_monitoring(storage, config.top_n, config.monitor);
    let outcome = dashboard.run()?;

    let rendered = render(&outcome, config)?;
    match &config.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)?;
            tracing::info!("📝 Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if let (DashboardOutcome::Ready(report), Some(dir)) = (&outcome, &config.export.dir) {
        let target = LocalStorage::new(dir.clone());
        let written = export_all(
            &report.downloads,
            report.table.as_ref(),
            &config.export,
            &target,
        )?;
        tracing::info!("📥 {} files exported to {}", written.len(), dir.display());
    }

    Ok(())
}

/// Every failed pass exits non-zero; `NO_RESULTS` is not an error.
fn exit_code(e: &ReportError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanished_artifact_exits_non_zero() {
        let err = ReportError::MissingArtifactError {
            name: "tours_extracted.json".to_string(),
            path: "output/results/tours_extracted.json".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_ne!(exit_code(&err), 0);
    }

    #[test]
    fn test_parse_error_exits_one() {
        let err = ReportError::parse("tours_extracted.json", "'tours' is not a list");
        assert_eq!(exit_code(&err), 1);
    }
}
