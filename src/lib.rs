pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::{ExportSettings, OutputFormat, ReportConfig};
pub use core::dashboard::{Dashboard, DashboardOutcome, DashboardReport};
pub use utils::error::{ReportError, Result};
