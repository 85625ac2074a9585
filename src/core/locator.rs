use crate::domain::model::{ArtifactKind, ArtifactPresence, ArtifactRef};
use crate::domain::ports::Storage;

/// Checks which artifacts the extraction pipeline has produced.
pub struct ArtifactLocator<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ArtifactLocator<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn locate(&self) -> ArtifactPresence {
        let [json, xlsx, refined] = ArtifactKind::ALL.map(|kind| self.reference(kind));

        for artifact in [&json, &xlsx, &refined] {
            tracing::debug!(
                "Artifact {} at {}: {}",
                artifact.kind,
                artifact.path.display(),
                if artifact.exists { "found" } else { "missing" }
            );
        }

        ArtifactPresence::new(json, xlsx, refined)
    }

    fn reference(&self, kind: ArtifactKind) -> ArtifactRef {
        ArtifactRef {
            kind,
            path: self.storage.resolve(kind.file_name()),
            exists: self.storage.exists(kind.file_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::MemoryStorage;

    #[test]
    fn test_locate_empty_directory() {
        let storage = MemoryStorage::new();
        let presence = ArtifactLocator::new(&storage).locate();

        assert!(presence.iter().all(|r| !r.exists));
    }

    #[test]
    fn test_locate_reports_each_artifact() {
        let storage = MemoryStorage::new()
            .with_file("tours_extracted.json", b"{\"tours\": []}")
            .with_file("tours_extracted_refined.xlsx", b"PK");
        let presence = ArtifactLocator::new(&storage).locate();

        assert!(presence.is_present(ArtifactKind::ToursJson));
        assert!(!presence.is_present(ArtifactKind::ToursXlsx));
        assert!(presence.is_present(ArtifactKind::RefinedXlsx));
        assert_eq!(
            presence.get(ArtifactKind::RefinedXlsx).path,
            std::path::PathBuf::from("memory/tours_extracted_refined.xlsx")
        );
    }
}
