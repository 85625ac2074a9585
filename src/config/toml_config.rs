use crate::utils::error::{ReportError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub artifacts: Option<ArtifactsConfig>,
    pub report: Option<ReportSection>,
    pub remedy: Option<RemedyConfig>,
    pub export: Option<ExportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    pub base_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: Option<String>,
    pub top_n: Option<usize>,
    pub currency: Option<String>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemedyConfig {
    pub command: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub dir: Option<String>,
    pub bundle: Option<bool>,
    pub table_csv: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration text, expanding `${VAR}` references first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| ReportError::config(format!("TOML parsing error: {}", e)))
    }

    // Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ReportError::config(format!("invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[artifacts]
base_dir = "data/results"

[report]
title = "Tours"
top_n = 5
currency = "$"
placeholder = "-"

[remedy]
command = "extract --pdf input/tours.pdf"

[export]
dir = "downloads"
bundle = true

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        let report = config.report.as_ref().unwrap();
        assert_eq!(report.top_n, Some(5));
        assert_eq!(report.currency.as_deref(), Some("$"));
        assert_eq!(
            config.artifacts.unwrap().base_dir.as_deref(),
            Some("data/results")
        );
        let export = config.export.unwrap();
        assert_eq!(export.bundle, Some(true));
        assert_eq!(export.table_csv, None);
        assert!(config.monitoring.unwrap().enabled);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.report.is_none());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TOUR_REPORT_TEST_BASE_DIR", "/srv/results");

        let config = TomlConfig::from_toml_str(
            r#"
[artifacts]
base_dir = "${TOUR_REPORT_TEST_BASE_DIR}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.artifacts.unwrap().base_dir.as_deref(),
            Some("/srv/results")
        );

        std::env::remove_var("TOUR_REPORT_TEST_BASE_DIR");
    }

    #[test]
    fn test_unset_variable_is_left_untouched() {
        let config = TomlConfig::from_toml_str(
            r#"
[remedy]
command = "run ${TOUR_REPORT_TEST_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.remedy.unwrap().command.as_deref(),
            Some("run ${TOUR_REPORT_TEST_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let err = TomlConfig::from_toml_str("[pipeline]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, ReportError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[report]\ntitle = \"File test\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.report.unwrap().title.as_deref(), Some("File test"));
    }
}
