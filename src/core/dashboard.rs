use crate::core::export::{collect_downloads, Download};
use crate::core::loader::ResultLoader;
use crate::core::locator::ArtifactLocator;
use crate::core::metrics::{derive_metrics, top_locations};
use crate::core::plan::{RenderPlan, ReportState};
use crate::domain::model::{ArtifactKind, LocationCount, Metrics, Table};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::{DateTime, Local};

/// Everything the success view shows.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    pub generated_at: DateTime<Local>,
    pub metrics: Metrics,
    pub table: Option<Table>,
    pub top_locations: Option<Vec<LocationCount>>,
    pub downloads: Vec<Download>,
}

#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    NoResults,
    Ready(Box<DashboardReport>),
}

impl DashboardOutcome {
    pub fn state(&self) -> ReportState {
        match self {
            DashboardOutcome::NoResults => ReportState::NoResults,
            DashboardOutcome::Ready(_) => ReportState::ResultsAvailable,
        }
    }

    pub fn report(&self) -> Option<&DashboardReport> {
        match self {
            DashboardOutcome::NoResults => None,
            DashboardOutcome::Ready(report) => Some(report.as_ref()),
        }
    }
}

/// One rendering pass over the results directory.
pub struct Dashboard<S: Storage> {
    storage: S,
    top_n: usize,
    monitor: SystemMonitor,
}

impl<S: Storage> Dashboard<S> {
    pub fn new(storage: S, top_n: usize) -> Self {
        Self::new_with_monitoring(storage, top_n, false)
    }

    pub fn new_with_monitoring(storage: S, top_n: usize, enable_monitoring: bool) -> Self {
        Self {
            storage,
            top_n,
            monitor: SystemMonitor::new(enable_monitoring),
        }
    }

    /// Locates, loads and derives. A parse failure aborts the whole pass.
    pub fn run(&mut self) -> Result<DashboardOutcome> {
        let presence = ArtifactLocator::new(&self.storage).locate();
        self.monitor.log_stats("Locate");

        let plan = RenderPlan::from_presence(&presence);
        let (load_refined, download_kinds) = match plan {
            RenderPlan::NoResults => {
                tracing::warn!("⚠️ No results found in the results directory");
                self.monitor.log_final_stats();
                return Ok(DashboardOutcome::NoResults);
            }
            RenderPlan::ResultsAvailable {
                load_refined,
                downloads,
            } => (load_refined, downloads),
        };

        let loader = ResultLoader::new(&self.storage);
        let tours = loader.load_tours(presence.get(ArtifactKind::ToursJson))?;
        let table = if load_refined {
            loader.load_table(presence.get(ArtifactKind::RefinedXlsx))?
        } else {
            None
        };
        self.monitor.log_stats("Load");

        let metrics = derive_metrics(tours.as_ref(), table.as_ref());
        let top_locations = table.as_ref().and_then(|t| top_locations(t, self.top_n));
        let downloads = collect_downloads(&self.storage, &download_kinds)?;
        self.monitor.log_stats("Derive");

        tracing::info!("✅ {} tours extracted", metrics.total_tours);
        self.monitor.log_final_stats();

        Ok(DashboardOutcome::Ready(Box::new(DashboardReport {
            generated_at: Local::now(),
            metrics,
            table,
            top_locations,
            downloads,
        })))
    }
}
