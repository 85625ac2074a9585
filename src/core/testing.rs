use crate::domain::ports::Storage;
use crate::utils::error::{ReportError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage for unit tests.
#[derive(Default)]
pub struct MemoryStorage {
    files: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: &str, data: &[u8]) -> Self {
        self.files.borrow_mut().insert(name.to_string(), data.to_vec());
        self
    }

    pub fn get_file(&self, name: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(name).cloned()
    }
}

impl Storage for MemoryStorage {
    fn resolve(&self, name: &str) -> PathBuf {
        PathBuf::from("memory").join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.files.borrow().contains_key(name)
    }

    fn read_file(&self, name: &str) -> Result<Vec<u8>> {
        self.get_file(name)
            .ok_or_else(|| ReportError::MissingArtifactError {
                name: name.to_string(),
                path: self.resolve(name).display().to_string(),
            })
    }

    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        self.files.borrow_mut().insert(name.to_string(), data.to_vec());
        Ok(self.resolve(name))
    }
}
