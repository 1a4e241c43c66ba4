//! The recording context for one exercise attempt.

use crate::ink::InkLine;
use crate::recorder::SessionRecorder;
use crate::storage::{Storage, StorageResult};
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for sessions.
pub type SessionId = Uuid;

/// Completed lines of one exercise attempt plus the timestamp they are
/// rebased against when saved.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    id: SessionId,
    exercise_id: String,
    /// Timestamp of the first point of the first line.
    start_timestamp: Option<u64>,
    lines: Vec<InkLine>,
    /// Number of lines already written by [`DrawingSession::checkpoint`].
    persisted: usize,
}

impl DrawingSession {
    pub fn new(exercise_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.into(),
            start_timestamp: None,
            lines: Vec::new(),
            persisted: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn start_timestamp(&self) -> Option<u64> {
        self.start_timestamp
    }

    /// Record the session start if this is the first point seen.
    pub fn observe_timestamp(&mut self, timestamp: u64) {
        if self.start_timestamp.is_none() {
            log::debug!("Session {} started at {}", self.id, timestamp);
            self.start_timestamp = Some(timestamp);
        }
    }

    /// Append a completed line.
    pub fn push_line(&mut self, line: InkLine) {
        if let Some(timestamp) = line.first_timestamp() {
            self.observe_timestamp(timestamp);
        }
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[InkLine] {
        &self.lines
    }

    /// Lines not yet written by a checkpoint.
    pub fn pending_lines(&self) -> &[InkLine] {
        &self.lines[self.persisted..]
    }

    /// Session file path: `<exercise_id>/<session_id>.json`.
    pub fn file_path(&self) -> PathBuf {
        let safe_exercise: String = self
            .exercise_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        PathBuf::from(safe_exercise).join(format!("{}.json", self.id))
    }

    /// Save pending lines to [`DrawingSession::file_path`].
    ///
    /// The cursor only advances once the write succeeded, so a failed
    /// checkpoint is retried in full next time. Returns the number of lines
    /// written.
    pub fn checkpoint<S: Storage>(
        &mut self,
        recorder: &SessionRecorder<S>,
    ) -> StorageResult<usize> {
        let pending = self.pending_lines();
        if pending.is_empty() {
            return Ok(0);
        }
        let count = pending.len();
        let start = self.start_timestamp.unwrap_or(0);
        recorder.save_lines(pending, start, &self.file_path())?;
        self.persisted = self.lines.len();
        Ok(count)
    }
}
