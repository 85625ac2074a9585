use super::toml_config::TomlConfig;
use super::{OutputFormat, ReportConfig};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "tour-report")]
#[command(about = "Report on tour extraction results: metrics, table, chart and downloads")]
pub struct CliConfig {
    /// Directory holding the extraction artifacts [default: output/results]
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Copy the downloadable artifacts into this directory
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Also write a zip with every exported file
    #[arg(long)]
    pub bundle: bool,

    /// Also write the refined table as CSV
    #[arg(long)]
    pub table_csv: bool,

    /// Number of cities in the chart [default: 10]
    #[arg(long)]
    pub top_n: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Builds the run configuration: defaults, then the file, then flags.
    pub fn to_report_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                ReportConfig::from_toml(&TomlConfig::from_file(path)?)
            }
            None => ReportConfig::default(),
        };

        if let Some(base_dir) = &self.base_dir {
            config.base_dir = PathBuf::from(base_dir);
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(export_dir) = &self.export_dir {
            config.export.dir = Some(PathBuf::from(export_dir));
        }
        config.export.bundle |= self.bundle;
        config.export.table_csv |= self.table_csv;
        config.monitor |= self.monitor;
        config.format = self.format;
        config.output = self.output.as_ref().map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }
}
