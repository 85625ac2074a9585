pub mod dashboard;
pub mod export;
pub mod loader;
pub mod locator;
pub mod metrics;
pub mod plan;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{ArtifactKind, ArtifactPresence, Metrics, Table, TourResults};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
