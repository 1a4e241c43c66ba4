//! Raw pointer events and their mapping to canvas ink points.

use crate::ink::InkPoint;
use crate::tilt::{AngleReading, calculate_tilt};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pressure reported for proximity-only samples while floating lines are on.
pub const DEFAULT_CONTACTLESS_PRESSURE: f64 = 0.1;

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    #[default]
    Touch,
    Mouse,
    /// Pen reporting orientation/tilt angles.
    Stylus,
    /// Pen reporting azimuth/altitude angles.
    Pencil,
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    HoverEnter,
    HoverMove,
    HoverExit,
}

impl PointerPhase {
    /// Whether the event comes from proximity rather than contact.
    pub fn is_hover(self) -> bool {
        matches!(
            self,
            PointerPhase::HoverEnter | PointerPhase::HoverMove | PointerPhase::HoverExit
        )
    }
}

/// Platform-neutral pointer event, in device pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPointerEvent {
    pub phase: PointerPhase,
    #[serde(default)]
    pub source: InputSource,
    pub x: f64,
    pub y: f64,
    /// Raw pressure; absent while hovering.
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub angles: AngleReading,
    pub timestamp: u64,
}

impl RawPointerEvent {
    pub fn new(phase: PointerPhase, source: InputSource, position: Point, timestamp: u64) -> Self {
        Self {
            phase,
            source,
            x: position.x,
            y: position.y,
            pressure: None,
            angles: AngleReading::None,
            timestamp,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_angles(mut self, angles: AngleReading) -> Self {
        self.angles = angles;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Converts device samples into canvas-space ink points.
#[derive(Debug, Clone)]
pub struct PointMapper {
    density: f64,
    /// Whether proximity samples should produce floating-line points.
    pub floating_lines: bool,
    pub contactless_pressure: f64,
}

impl Default for PointMapper {
    fn default() -> Self {
        Self {
            density: 1.0,
            floating_lines: false,
            contactless_pressure: DEFAULT_CONTACTLESS_PRESSURE,
        }
    }
}

impl PointMapper {
    /// Create a mapper for the given display density.
    pub fn new(density: f64) -> Self {
        let mut mapper = Self::default();
        mapper.set_density(density);
        mapper
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Set the display density. Non-positive or non-finite values fall back to 1.0.
    pub fn set_density(&mut self, density: f64) {
        if density.is_finite() && density > 0.0 {
            self.density = density;
        } else {
            log::warn!("Ignoring invalid display density {density}, using 1.0");
            self.density = 1.0;
        }
    }

    /// Map a pen sample in the orientation/tilt convention.
    pub fn map_stylus(
        &self,
        position: Point,
        pressure: Option<f64>,
        orientation: f64,
        tilt: f64,
        timestamp: u64,
    ) -> InkPoint {
        self.build(
            position,
            pressure,
            AngleReading::Orientation { orientation, tilt },
            timestamp,
        )
    }

    /// Map a pen sample in the azimuth/altitude convention.
    pub fn map_pencil(
        &self,
        position: Point,
        pressure: Option<f64>,
        azimuth: f64,
        altitude: f64,
        timestamp: u64,
    ) -> InkPoint {
        self.build(
            position,
            pressure,
            AngleReading::Azimuth { azimuth, altitude },
            timestamp,
        )
    }

    /// Map a finger or mouse sample; these never carry tilt.
    pub fn map_touch(&self, position: Point, pressure: Option<f64>, timestamp: u64) -> InkPoint {
        self.build(position, pressure, AngleReading::None, timestamp)
    }

    /// Map any raw event.
    ///
    /// The event's angle reading is used as reported; `source` only matters
    /// for finger and mouse input, whose angles are ignored.
    pub fn map(&self, event: &RawPointerEvent) -> InkPoint {
        match (event.source, event.angles) {
            (InputSource::Touch | InputSource::Mouse, _) => {
                self.map_touch(event.position(), event.pressure, event.timestamp)
            }
            (_, AngleReading::Orientation { orientation, tilt }) => self.map_stylus(
                event.position(),
                event.pressure,
                orientation,
                tilt,
                event.timestamp,
            ),
            (_, AngleReading::Azimuth { azimuth, altitude }) => self.map_pencil(
                event.position(),
                event.pressure,
                azimuth,
                altitude,
                event.timestamp,
            ),
            (_, AngleReading::None) => {
                self.map_touch(event.position(), event.pressure, event.timestamp)
            }
        }
    }

    fn build(
        &self,
        position: Point,
        pressure: Option<f64>,
        angles: AngleReading,
        timestamp: u64,
    ) -> InkPoint {
        let pressure = match pressure {
            Some(pressure) => pressure,
            None if self.floating_lines => self.contactless_pressure,
            None => 0.0,
        };
        let position = Point::new(position.x / self.density, position.y / self.density);
        InkPoint::new(position, pressure, calculate_tilt(angles), timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_divides_by_density() {
        let mapper = PointMapper::new(2.0);
        let point = mapper.map_touch(Point::new(100.0, 50.0), Some(0.4), 99);
        assert!((point.x - 50.0).abs() < f64::EPSILON);
        assert!((point.y - 25.0).abs() < f64::EPSILON);
        assert!((point.pressure - 0.4).abs() < f64::EPSILON);
        assert_eq!(point.timestamp, 99);
        assert_eq!(point.tilt(), Vec2::ZERO);
    }

    #[test]
    fn test_invalid_density_falls_back() {
        assert!((PointMapper::new(0.0).density() - 1.0).abs() < f64::EPSILON);
        assert!((PointMapper::new(f64::NAN).density() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hover_pressure_depends_on_floating_mode() {
        let mut mapper = PointMapper::new(1.0);
        let point = mapper.map_touch(Point::new(1.0, 1.0), None, 0);
        assert_eq!(point.pressure, 0.0);

        mapper.floating_lines = true;
        let point = mapper.map_touch(Point::new(1.0, 1.0), None, 0);
        assert!(point.pressure > 0.0);
        assert!((point.pressure - DEFAULT_CONTACTLESS_PRESSURE).abs() < f64::EPSILON);

        // Contact pressure always wins.
        let point = mapper.map_touch(Point::new(1.0, 1.0), Some(0.7), 0);
        assert!((point.pressure - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stylus_and_pencil_agree() {
        let mapper = PointMapper::new(1.0);
        let a = mapper.map_stylus(Point::ZERO, Some(1.0), FRAC_PI_2, 0.4, 0);
        let b = mapper.map_pencil(Point::ZERO, Some(1.0), 0.0, FRAC_PI_2 - 0.4, 0);
        assert!((a.tilt_x - b.tilt_x).abs() < 1e-9);
        assert!((a.tilt_y - b.tilt_y).abs() < 1e-9);
    }

    #[test]
    fn test_map_ignores_angles_for_touch() {
        let mapper = PointMapper::new(1.0);
        let position = Point::new(3.0, 4.0);
        let event = RawPointerEvent::new(PointerPhase::Down, InputSource::Touch, position, 5)
            .with_angles(AngleReading::Orientation {
                orientation: 0.0,
                tilt: 1.0,
            });
        assert_eq!(mapper.map(&event).tilt(), Vec2::ZERO);
    }

    #[test]
    fn test_raw_event_json() {
        let json = r#"{"phase":"down","source":"pencil","x":10.0,"y":20.0,"pressure":0.5,
            "angles":{"kind":"azimuth","azimuth":0.0,"altitude":1.0},"timestamp":42}"#;
        let event: RawPointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.phase, PointerPhase::Down);
        assert_eq!(event.source, InputSource::Pencil);
        assert_eq!(event.pressure, Some(0.5));
        assert!(matches!(event.angles, AngleReading::Azimuth { .. }));
    }
}
