//! Capture configuration.

use crate::ink::LineStyle;
use crate::input::DEFAULT_CONTACTLESS_PRESSURE;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid config: {0}")]
    Parse(String),
}

/// Settings for one drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Keep earlier lines when a new one starts.
    pub multi_line: bool,
    /// Record proximity (hover) input as floating lines.
    pub floating_lines: bool,
    /// Empty the committed collection after every finished line.
    pub clear_on_finish: bool,
    /// Pressure given to proximity samples while floating lines are on.
    pub contactless_pressure: f64,
    /// Device pixels per canvas unit.
    pub density: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub style: LineStyle,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            multi_line: true,
            floating_lines: false,
            clear_on_finish: false,
            contactless_pressure: DEFAULT_CONTACTLESS_PRESSURE,
            density: 1.0,
            canvas_width: 1024.0,
            canvas_height: 768.0,
            style: LineStyle::default(),
        }
    }
}

impl CaptureConfig {
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = CaptureConfig::from_json(r#"{"multi_line": false, "density": 2.0}"#).unwrap();
        assert!(!config.multi_line);
        assert!((config.density - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.style, LineStyle::default());
        assert!((config.canvas_width - 1024.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_section() {
        let json = r##"{"style": {"LineColor": "#FF0000", "LineWidth": 2.5}}"##;
        let config = CaptureConfig::from_json(json).unwrap();
        assert_eq!(config.style.color.r, 255);
        assert!((config.style.width - 2.5).abs() < f64::EPSILON);
        assert!(config.style.smooth);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            CaptureConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("capture.json");
        fs::write(&path, r#"{"floating_lines": true}"#).unwrap();
        assert!(CaptureConfig::load(&path).unwrap().floating_lines);
        assert!(matches!(
            CaptureConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
