#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use std::path::PathBuf;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_BASE_DIR: &str = "output/results";
pub const DEFAULT_TITLE: &str = "Tour Extraction System";
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_CURRENCY: &str = "€";
pub const DEFAULT_PLACEHOLDER: &str = "N/A";
pub const DEFAULT_REMEDY_COMMAND: &str =
    "python main.py --pdf 'input/PRIVATE_TOURS_FRANCE_2024-EN.pdf'";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSettings {
    pub dir: Option<PathBuf>,
    pub bundle: bool,
    pub table_csv: bool,
}

/// Settings for one run, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub base_dir: PathBuf,
    pub title: String,
    pub top_n: usize,
    pub currency: String,
    pub placeholder: String,
    pub remedy_command: String,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub export: ExportSettings,
    pub monitor: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            title: DEFAULT_TITLE.to_string(),
            top_n: DEFAULT_TOP_N,
            currency: DEFAULT_CURRENCY.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            remedy_command: DEFAULT_REMEDY_COMMAND.to_string(),
            format: OutputFormat::default(),
            output: None,
            export: ExportSettings::default(),
            monitor: false,
        }
    }
}

impl ReportConfig {
    /// Defaults overlaid with whatever the file sets.
    pub fn from_toml(file: &TomlConfig) -> Self {
        let mut config = Self::default();

        if let Some(base_dir) = file.artifacts.as_ref().and_then(|a| a.base_dir.as_ref()) {
            config.base_dir = PathBuf::from(base_dir);
        }

        if let Some(report) = &file.report {
            if let Some(title) = &report.title {
                config.title = title.clone();
            }
            if let Some(top_n) = report.top_n {
                config.top_n = top_n;
            }
            if let Some(currency) = &report.currency {
                config.currency = currency.clone();
            }
            if let Some(placeholder) = &report.placeholder {
                config.placeholder = placeholder.clone();
            }
        }

        if let Some(command) = file.remedy.as_ref().and_then(|r| r.command.as_ref()) {
            config.remedy_command = command.clone();
        }

        if let Some(export) = &file.export {
            config.export.dir = export.dir.as_ref().map(PathBuf::from);
            config.export.bundle = export.bundle.unwrap_or(false);
            config.export.table_csv = export.table_csv.unwrap_or(false);
        }

        config.monitor = file.monitoring_enabled();
        config
    }
}

impl Validate for ReportConfig {
    fn validate(&self) -> Result<()> {
        validate_path("artifacts.base_dir", &self.base_dir.to_string_lossy())?;
        validate_range("report.top_n", self.top_n, 1, 100)?;
        validate_non_empty_string("report.currency", &self.currency)?;

        if let Some(dir) = &self.export.dir {
            validate_path("export.dir", &dir.to_string_lossy())?;
        } else if self.export.bundle || self.export.table_csv {
            return Err(ReportError::InvalidConfigValueError {
                field: "export.dir".to_string(),
                value: String::new(),
                reason: "bundle and table CSV exports need an export directory".to_string(),
            });
        }

        if let Some(output) = &self.output {
            validate_path("output", &output.to_string_lossy())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_dir, PathBuf::from("output/results"));
        assert_eq!(config.top_n, 10);
        assert_eq!(config.placeholder, "N/A");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[artifacts]
base_dir = "elsewhere"

[report]
top_n = 3

[export]
dir = "downloads"
table_csv = true
"#,
        )
        .unwrap();

        let config = ReportConfig::from_toml(&file);
        assert_eq!(config.base_dir, PathBuf::from("elsewhere"));
        assert_eq!(config.top_n, 3);
        assert_eq!(config.currency, "€");
        assert_eq!(config.export.dir, Some(PathBuf::from("downloads")));
        assert!(config.export.table_csv);
        assert!(!config.export.bundle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bundle_without_export_dir_is_invalid() {
        let config = ReportConfig {
            export: ExportSettings {
                dir: None,
                bundle: true,
                table_csv: false,
            },
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_top_n_bounds() {
        let config = ReportConfig {
            top_n: 0,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
