use crate::domain::model::{ArtifactKind, ArtifactPresence};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportState {
    NoResults,
    ResultsAvailable,
}

/// What a rendering pass will show, decided from artifact presence alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    NoResults,
    ResultsAvailable {
        load_refined: bool,
        downloads: Vec<ArtifactKind>,
    },
}

impl RenderPlan {
    pub fn from_presence(presence: &ArtifactPresence) -> Self {
        if !presence.is_present(ArtifactKind::ToursJson) {
            return RenderPlan::NoResults;
        }

        RenderPlan::ResultsAvailable {
            load_refined: presence.is_present(ArtifactKind::RefinedXlsx),
            downloads: presence.present().map(|r| r.kind).collect(),
        }
    }

    pub fn state(&self) -> ReportState {
        match self {
            RenderPlan::NoResults => ReportState::NoResults,
            RenderPlan::ResultsAvailable { .. } => ReportState::ResultsAvailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ArtifactRef;
    use std::path::PathBuf;

    fn presence(json: bool, xlsx: bool, refined: bool) -> ArtifactPresence {
        let make = |kind: ArtifactKind, exists| ArtifactRef {
            kind,
            path: PathBuf::from(kind.file_name()),
            exists,
        };
        ArtifactPresence::new(
            make(ArtifactKind::ToursJson, json),
            make(ArtifactKind::ToursXlsx, xlsx),
            make(ArtifactKind::RefinedXlsx, refined),
        )
    }

    #[test]
    fn test_no_json_is_no_results_regardless_of_spreadsheets() {
        for (xlsx, refined) in [(false, false), (true, false), (false, true), (true, true)] {
            let plan = RenderPlan::from_presence(&presence(false, xlsx, refined));
            assert_eq!(plan, RenderPlan::NoResults);
            assert_eq!(plan.state(), ReportState::NoResults);
        }
    }

    #[test]
    fn test_json_only() {
        let plan = RenderPlan::from_presence(&presence(true, false, false));
        assert_eq!(
            plan,
            RenderPlan::ResultsAvailable {
                load_refined: false,
                downloads: vec![ArtifactKind::ToursJson],
            }
        );
    }

    #[test]
    fn test_all_artifacts() {
        let plan = RenderPlan::from_presence(&presence(true, true, true));
        assert_eq!(plan.state(), ReportState::ResultsAvailable);
        assert_eq!(
            plan,
            RenderPlan::ResultsAvailable {
                load_refined: true,
                downloads: ArtifactKind::ALL.to_vec(),
            }
        );
    }
}
