//! InkStroke Core Library
//!
//! Platform-agnostic stylus and touch ink capture: tilt normalization, point
//! mapping, line assembly, canvas re-fitting and session persistence.

pub mod assembler;
pub mod cancel;
pub mod config;
pub mod events;
pub mod ink;
pub mod input;
pub mod normalize;
pub mod recorder;
pub mod session;
pub mod storage;
pub mod surface;
pub mod tilt;

pub use assembler::{AssemblerState, LineAssembler, LineCollection};
pub use cancel::CancelToken;
pub use config::{CaptureConfig, ConfigError};
pub use events::{EventBus, InkEvent, SubscriptionId};
pub use ink::{InkColor, InkLine, InkPoint, LineStyle};
pub use input::{InputSource, PointMapper, PointerPhase, RawPointerEvent};
pub use normalize::{normalize, normalize_lines};
pub use recorder::{PersistedExerciseRecord, SessionRecorder};
pub use session::{DrawingSession, SessionId};
pub use storage::{Storage, StorageError, StorageResult};
pub use surface::CaptureSurface;
pub use tilt::{AngleReading, calculate_tilt};
