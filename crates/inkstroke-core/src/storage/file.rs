//! File-based storage implementation for native platforms.

use super::{Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Relative paths are resolved against a base directory; absolute paths are
/// used as-is.
pub struct FileStorage {
    /// Base directory for session files.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/inkstroke/sessions/`
    /// On Windows: `%LOCALAPPDATA%\inkstroke\sessions\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("inkstroke").join("sessions"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a storage path to a filesystem path.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for FileStorage {
    fn exists(&self, path: &Path) -> StorageResult<bool> {
        Ok(self.resolve(path).is_file())
    }

    fn read_all_text(&self, path: &Path) -> StorageResult<String> {
        let path = self.resolve(path);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            std::io::ErrorKind::InvalidData => {
                StorageError::Serialization(format!("{} is not valid UTF-8: {}", path.display(), e))
            }
            _ => StorageError::Io(format!("Failed to read {}: {}", path.display(), e)),
        })
    }

    fn write_all_text(&self, path: &Path, text: &str) -> StorageResult<()> {
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(&path, text)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
