//! Device-independent stylus tilt.
//!
//! Platforms report pen pose in one of two angle conventions. Both are folded
//! into a tilt-from-vertical magnitude and a direction measured clockwise from
//! the device "up" axis, then projected onto a tilt vector:
//!
//! ```text
//! tilt.x = magnitude * cos(direction)
//! tilt.y = magnitude * sin(direction)
//! ```

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Raw pen angles as reported by the platform, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AngleReading {
    /// No angle data (finger, mouse).
    #[default]
    None,
    /// `orientation` in `[-pi, pi]` (0 = up, -pi/2 = left, +-pi = down,
    /// pi/2 = right); `tilt` in `[0, pi/2]` (0 = perpendicular, pi/2 = flat).
    Orientation { orientation: f64, tilt: f64 },
    /// `azimuth` in `[0, 2pi)` measured clockwise from the +x axis;
    /// `altitude` in `[0, pi/2]` (pi/2 = perpendicular, 0 = flat).
    Azimuth { azimuth: f64, altitude: f64 },
}

impl AngleReading {
    /// Tilt-from-vertical magnitude and direction from up.
    fn magnitude_and_direction(self) -> (f64, f64) {
        match self {
            AngleReading::None => (0.0, 0.0),
            AngleReading::Orientation { orientation, tilt } => (tilt, orientation),
            AngleReading::Azimuth { azimuth, altitude } => {
                (FRAC_PI_2 - altitude, azimuth + FRAC_PI_2)
            }
        }
    }
}

/// Compute the tilt vector for a pen pose. Never fails; NaN magnitude
/// propagates as NaN.
pub fn calculate_tilt(angles: AngleReading) -> Vec2 {
    let (magnitude, direction) = angles.magnitude_and_direction();
    tilt_vector(magnitude, direction)
}

/// Project a magnitude/direction pair onto the tilt vector.
pub fn tilt_vector(magnitude: f64, direction: f64) -> Vec2 {
    // A perpendicular pen has no direction; ignore whatever the sensor says.
    if magnitude == 0.0 {
        return Vec2::ZERO;
    }
    let (sin, cos) = direction.sin_cos();
    Vec2::new(magnitude * cos, magnitude * sin)
}
