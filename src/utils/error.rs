use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Artifact not found: {name} ({path})")]
    MissingArtifactError { name: String, path: String },

    #[error("Failed to parse {artifact}: {message}")]
    ParseError { artifact: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Parse,
    Configuration,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn parse(artifact: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ReportError::ParseError {
            artifact: artifact.into(),
            message: err.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ReportError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::MissingArtifactError { .. } => ErrorCategory::Input,
            ReportError::ParseError { .. } => ErrorCategory::Parse,
            ReportError::ConfigError { .. } | ReportError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ReportError::CsvError(_)
            | ReportError::ZipError(_)
            | ReportError::SerializationError(_) => ErrorCategory::Export,
            ReportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReportError::MissingArtifactError { .. } => ErrorSeverity::Low,
            ReportError::CsvError(_)
            | ReportError::ZipError(_)
            | ReportError::SerializationError(_) => ErrorSeverity::Medium,
            ReportError::ParseError { .. }
            | ReportError::ConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ReportError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReportError::MissingArtifactError { path, .. } => {
                format!("Run the extraction pipeline so that {} is produced", path)
            }
            ReportError::ParseError { artifact, .. } => format!(
                "Regenerate {} with the extraction pipeline; the file on disk is not readable",
                artifact
            ),
            ReportError::ConfigError { .. } => {
                "Check the configuration file syntax and the command line flags".to_string()
            }
            ReportError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ReportError::CsvError(_) | ReportError::ZipError(_) => {
                "Check that the export directory is writable and has free space".to_string()
            }
            ReportError::SerializationError(_) => {
                "Retry with --format text to inspect the report".to_string()
            }
            ReportError::IoError(_) => {
                "Check file permissions for the results and export directories".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::MissingArtifactError { name, .. } => {
                format!("No {} found. Run the processing first!", name)
            }
            ReportError::ParseError { artifact, message } => {
                format!("{} could not be read: {}", artifact, message)
            }
            ReportError::ConfigError { message } => format!("Invalid configuration: {}", message),
            ReportError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
