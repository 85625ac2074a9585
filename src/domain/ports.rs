use crate::utils::error::Result;
use std::path::PathBuf;

/// File access rooted at a base directory. Names are relative to that root.
pub trait Storage {
    fn resolve(&self, name: &str) -> PathBuf;
    fn exists(&self, name: &str) -> bool;
    fn read_file(&self, name: &str) -> Result<Vec<u8>>;
    fn write_file(&self, name: &str, data: &[u8]) -> Result<PathBuf>;
}
