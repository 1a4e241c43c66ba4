//! InkStroke Application
//!
//! Command-line shell around the capture pipeline: replays recorded pointer
//! event logs, checkpoints sessions to disk and exports images.

mod app;

pub use app::{App, AppError, AppResult, RecordSummary, ReplaySummary, export_png, load_events};
