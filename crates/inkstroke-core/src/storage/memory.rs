//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths currently stored.
    pub fn paths(&self) -> StorageResult<Vec<PathBuf>> {
        let files = self
            .files
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(files.keys().cloned().collect())
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &Path) -> StorageResult<bool> {
        let files = self
            .files
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(files.contains_key(path))
    }

    fn read_all_text(&self, path: &Path) -> StorageResult<String> {
        let files = self
            .files
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.display().to_string()))
    }

    fn write_all_text(&self, path: &Path, text: &str) -> StorageResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        files.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read() {
        let storage = MemoryStorage::new();
        let path = Path::new("ex/session.json");

        storage.write_all_text(path, "hello").unwrap();
        assert_eq!(storage.read_all_text(path).unwrap(), "hello");
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = storage.read_all_text(Path::new("missing"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();
        let path = Path::new("a.json");

        assert!(!storage.exists(path).unwrap());
        storage.write_all_text(path, "").unwrap();
        assert!(storage.exists(path).unwrap());
        assert_eq!(storage.paths().unwrap(), vec![path.to_path_buf()]);
    }

    #[test]
    fn test_overwrite() {
        let storage = MemoryStorage::new();
        let path = Path::new("a.json");

        storage.write_all_text(path, "one").unwrap();
        storage.write_all_text(path, "two").unwrap();
        assert_eq!(storage.read_all_text(path).unwrap(), "two");
    }
}
