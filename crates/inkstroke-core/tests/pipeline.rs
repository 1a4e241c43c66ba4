//! End-to-end capture: raw events to a session file on disk.

use inkstroke_core::storage::FileStorage;
use inkstroke_core::{
    AngleReading, CaptureConfig, CaptureSurface, DrawingSession, InkEvent, InputSource,
    PointerPhase, RawPointerEvent, SessionRecorder, Storage, StorageError,
};
use kurbo::Point;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn pencil(phase: PointerPhase, x: f64, y: f64, t: u64) -> RawPointerEvent {
    RawPointerEvent::new(phase, InputSource::Pencil, Point::new(x, y), t)
        .with_pressure(0.8)
        .with_angles(AngleReading::Azimuth {
            azimuth: 1.0,
            altitude: 1.2,
        })
}

fn stroke(surface: &mut CaptureSurface, start: u64) {
    surface.handle_event(&pencil(PointerPhase::Down, 10.0, 10.0, start));
    surface.handle_event(&pencil(PointerPhase::Move, 20.0, 15.0, start + 50));
    surface.handle_event(&pencil(PointerPhase::Move, 30.0, 20.0, start + 100));
    surface.handle_event(&pencil(PointerPhase::Up, 30.0, 20.0, start + 100));
}

#[test]
fn test_strokes_are_checkpointed_and_merged() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let recorder = SessionRecorder::new(storage.clone());
    let mut surface =
        CaptureSurface::new(&CaptureConfig::default(), DrawingSession::new("letters-a"));

    stroke(&mut surface, 100);
    assert_eq!(surface.checkpoint(&recorder).unwrap(), 1);

    stroke(&mut surface, 1000);
    stroke(&mut surface, 2000);
    assert_eq!(surface.checkpoint(&recorder).unwrap(), 2);

    let path = surface.session().file_path();
    assert!(storage.resolve(&path).is_file());

    let record = recorder.load(&path).unwrap();
    assert_eq!(record.drawing_lines.len(), 3);
    let first: Vec<u64> = record.drawing_lines[0].points().iter().map(|p| p.timestamp).collect();
    assert_eq!(first, vec![0, 50, 100]);
    assert_eq!(record.drawing_lines[2].points()[0].timestamp, 1900);
}

#[test]
fn test_file_uses_named_fields() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let recorder = SessionRecorder::new(storage.clone());
    let mut surface = CaptureSurface::new(&CaptureConfig::default(), DrawingSession::new("ex"));
    stroke(&mut surface, 0);
    surface.checkpoint(&recorder).unwrap();

    let text = storage.read_all_text(&surface.session().file_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let line = &value["DrawingLines"][0];
    for key in ["Granularity", "LineColor", "LineWidth", "ShouldSmoothPathWhenDrawn", "Points"] {
        assert!(line.get(key).is_some(), "missing {key}");
    }
    for key in ["X", "Y", "Pressure", "TiltX", "TiltY", "Timestamp"] {
        assert!(line["Points"][0].get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_corrupt_existing_file_is_overwritten() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let recorder = SessionRecorder::new(storage.clone());
    let mut surface = CaptureSurface::new(&CaptureConfig::default(), DrawingSession::new("ex"));
    let path = surface.session().file_path();
    storage.write_all_text(&path, "\u{0}garbage[").unwrap();

    stroke(&mut surface, 0);
    surface.checkpoint(&recorder).unwrap();

    assert_eq!(recorder.load(&path).unwrap().drawing_lines.len(), 1);
}

#[test]
fn test_write_failure_propagates_and_is_retried() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path().to_path_buf()).unwrap());
    let recorder = SessionRecorder::new(storage.clone());
    let mut surface = CaptureSurface::new(&CaptureConfig::default(), DrawingSession::new("ex"));
    stroke(&mut surface, 0);

    // Occupy the session file path with a directory so the write fails.
    let blocked = storage.resolve(&surface.session().file_path());
    std::fs::create_dir_all(&blocked).unwrap();
    assert!(matches!(surface.checkpoint(&recorder), Err(StorageError::Io(_))));
    assert_eq!(surface.session().pending_lines().len(), 1);

    std::fs::remove_dir(&blocked).unwrap();
    assert_eq!(surface.checkpoint(&recorder).unwrap(), 1);
}

#[test]
fn test_single_line_mode_through_surface() {
    let config = CaptureConfig {
        multi_line: false,
        ..CaptureConfig::default()
    };
    let mut surface = CaptureSurface::new(&config, DrawingSession::new("ex"));
    let cleared = surface.assembler_mut().events_mut().subscribe_channel();

    stroke(&mut surface, 0);
    stroke(&mut surface, 500);

    assert_eq!(surface.assembler().lines().len(), 1);
    // The session still keeps every completed line.
    assert_eq!(surface.session().lines().len(), 2);
    assert_eq!(
        cleared.try_iter().filter(|e| *e == InkEvent::LinesCleared).count(),
        1
    );
}

#[test]
fn test_recorder_on_plain_path() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
    let recorder = SessionRecorder::new(Arc::new(storage));
    recorder.save_lines(&[], 0, Path::new("empty.json")).unwrap();
    assert!(recorder.load(Path::new("empty.json")).unwrap().drawing_lines.is_empty());
}
