//! Persisting finished lines as session-relative exercise records.

use crate::ink::InkLine;
use crate::storage::{Storage, StorageError, StorageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// On-disk layout of an exercise file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedExerciseRecord {
    #[serde(rename = "DrawingLines", default)]
    pub drawing_lines: Vec<InkLine>,
}

impl PersistedExerciseRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Appends lines to exercise files through a storage backend.
///
/// Saving is a read-modify-write with no locking: keep one writer per path.
pub struct SessionRecorder<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> SessionRecorder<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// Rebase `lines` onto `session_start` and append them to the record at `path`.
    ///
    /// Unreadable existing content is replaced by an empty record; only
    /// storage failures are returned.
    pub fn save_lines(
        &self,
        lines: &[InkLine],
        session_start: u64,
        path: &Path,
    ) -> StorageResult<()> {
        let rebased: Vec<InkLine> = lines
            .iter()
            .map(|line| line.rebased(session_start))
            .collect();

        let mut record = self.load_or_empty(path)?;
        let existing = record.drawing_lines.len();
        record.drawing_lines.extend(rebased);

        let json = record
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.write_all_text(path, &json)?;

        log::info!(
            "Saved {} line(s) to {} ({} previously stored)",
            lines.len(),
            path.display(),
            existing
        );
        Ok(())
    }

    /// Read the record at `path`; a missing file is an empty record.
    pub fn load(&self, path: &Path) -> StorageResult<PersistedExerciseRecord> {
        if !self.storage.exists(path)? {
            return Ok(PersistedExerciseRecord::default());
        }
        let text = self.storage.read_all_text(path)?;
        if text.trim().is_empty() {
            return Ok(PersistedExerciseRecord::default());
        }
        PersistedExerciseRecord::from_json(&text).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn load_or_empty(&self, path: &Path) -> StorageResult<PersistedExerciseRecord> {
        match self.load(path) {
            Ok(record) => Ok(record),
            Err(StorageError::Serialization(e)) => {
                log::warn!("Discarding unreadable session file: {}", e);
                Ok(PersistedExerciseRecord::default())
            }
            Err(e) => Err(e),
        }
    }
}
