//! Replay application: drives the capture pipeline from recorded event logs.

use inkstroke_core::normalize::normalize_lines;
use inkstroke_core::{
    CancelToken, CaptureConfig, CaptureSurface, ConfigError, DrawingSession,
    PersistedExerciseRecord, RawPointerEvent, SessionId, SessionRecorder, Storage, StorageError,
};
use inkstroke_render::{RenderError, image_stream};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid event log: {0}")]
    EventLog(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Outcome of replaying one event log.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub session_id: SessionId,
    /// Session file, relative to the storage root.
    pub file_path: PathBuf,
    pub events: usize,
    pub lines: usize,
    /// Number of checkpoints that wrote at least one line.
    pub checkpoints: usize,
}

/// Aggregate numbers for a stored exercise record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSummary {
    pub lines: usize,
    pub points: usize,
    /// Latest session-relative timestamp.
    pub duration: u64,
}

/// Read a JSON array of raw pointer events.
pub fn load_events(path: &Path) -> AppResult<Vec<RawPointerEvent>> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&json)
        .map_err(|e| AppError::EventLog(format!("{}: {}", path.display(), e)))
}

/// Owns the capture configuration and the recorder used for every run.
pub struct App<S: Storage> {
    config: CaptureConfig,
    recorder: SessionRecorder<S>,
}

impl<S: Storage> App<S> {
    pub fn new(config: CaptureConfig, storage: Arc<S>) -> Self {
        Self {
            config,
            recorder: SessionRecorder::new(storage),
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn recorder(&self) -> &SessionRecorder<S> {
        &self.recorder
    }

    /// Feed `events` through a fresh surface and persist the session.
    ///
    /// With `checkpoint_every = Some(n)` the session is saved whenever `n`
    /// lines are pending, and once more at the end.
    pub fn replay(
        &self,
        events: &[RawPointerEvent],
        exercise_id: &str,
        checkpoint_every: Option<usize>,
    ) -> AppResult<(CaptureSurface, ReplaySummary)> {
        let mut surface = CaptureSurface::new(&self.config, DrawingSession::new(exercise_id));
        log::info!(
            "Replaying {} event(s) for exercise {} (session {})",
            events.len(),
            exercise_id,
            surface.session().id()
        );

        let mut checkpoints = 0;
        for event in events {
            surface.handle_event(event);
            if let Some(every) = checkpoint_every.filter(|n| *n > 0) {
                if surface.session().pending_lines().len() >= every
                    && surface.checkpoint(&self.recorder)? > 0
                {
                    checkpoints += 1;
                }
            }
        }
        if surface.checkpoint(&self.recorder)? > 0 {
            checkpoints += 1;
        }

        let summary = ReplaySummary {
            session_id: surface.session().id(),
            file_path: surface.session().file_path(),
            events: events.len(),
            lines: surface.session().lines().len(),
            checkpoints,
        };
        Ok((surface, summary))
    }

    /// Clamp a stored record into a `width x height` viewport at `scale` and
    /// write the result to `output` (replacing it).
    pub fn refit(
        &self,
        input: &Path,
        output: &Path,
        width: f64,
        height: f64,
        scale: f64,
    ) -> AppResult<usize> {
        let record = self.recorder.load(input)?;
        let refit = PersistedExerciseRecord {
            drawing_lines: normalize_lines(&record.drawing_lines, width, height, scale),
        };
        let json = refit
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.recorder.storage().write_all_text(output, &json)?;
        Ok(refit.drawing_lines.len())
    }

    /// Count lines, points and duration of a stored record.
    pub fn summarize(&self, path: &Path) -> AppResult<RecordSummary> {
        let record = self.recorder.load(path)?;
        let points = record.drawing_lines.iter().map(|l| l.len()).sum();
        let duration = record
            .drawing_lines
            .iter()
            .flat_map(|l| l.points().iter().map(|p| p.timestamp))
            .max()
            .unwrap_or(0);
        Ok(RecordSummary {
            lines: record.drawing_lines.len(),
            points,
            duration,
        })
    }
}

/// Render everything on `surface` to a PNG file.
pub fn export_png(
    surface: &CaptureSurface,
    path: &Path,
    width: u32,
    height: u32,
    cancel: &CancelToken,
) -> AppResult<()> {
    let assembler = surface.assembler();
    let mut stream = image_stream(
        assembler.all_lines(),
        assembler.canvas_size(),
        width,
        height,
        cancel,
    )?;

    let mut png_data = Vec::new();
    stream
        .read_to_end(&mut png_data)
        .map_err(|e| AppError::Io(e.to_string()))?;
    fs::write(path, &png_data)
        .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Exported PNG to: {:?}", path);
    Ok(())
}
