//! Storage abstraction for session files.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use std::path::Path;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Text storage keyed by path.
///
/// Implementations make no attempt to serialize concurrent writers; callers
/// keep one writer per path.
pub trait Storage {
    /// Check if a file exists.
    fn exists(&self, path: &Path) -> StorageResult<bool>;

    /// Read a whole file as text.
    fn read_all_text(&self, path: &Path) -> StorageResult<String>;

    /// Create or overwrite a file.
    fn write_all_text(&self, path: &Path, text: &str) -> StorageResult<()>;
}
