use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(name);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReportError::MissingArtifactError {
                name: name.to_string(),
                path: full_path.display().to_string(),
            },
            _ => ReportError::IoError(e),
        })
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.resolve(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path)
    }
}
