//! Ink data model: sampled points and the lines built from them.

mod color;

pub use color::{ColorParseError, InkColor};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Deserializer, Serialize};

/// One sampled position/pressure/tilt/time reading, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InkPoint {
    #[serde(deserialize_with = "float_or_nan")]
    pub x: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub y: f64,
    /// Normalized pressure in `[0, 1]`.
    #[serde(deserialize_with = "float_or_nan")]
    pub pressure: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub tilt_x: f64,
    #[serde(deserialize_with = "float_or_nan")]
    pub tilt_y: f64,
    /// Source-native timestamp.
    pub timestamp: u64,
}

impl InkPoint {
    pub fn new(position: Point, pressure: f64, tilt: Vec2, timestamp: u64) -> Self {
        Self {
            x: position.x,
            y: position.y,
            pressure,
            tilt_x: tilt.x,
            tilt_y: tilt.y,
            timestamp,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn tilt(&self) -> Vec2 {
        Vec2::new(self.tilt_x, self.tilt_y)
    }

    /// Copy of this point moved to `position`.
    pub fn with_position(self, position: Point) -> Self {
        Self {
            x: position.x,
            y: position.y,
            ..self
        }
    }

    /// Copy of this point with `start` subtracted from its timestamp.
    pub fn rebased(self, start: u64) -> Self {
        Self {
            timestamp: self.timestamp.saturating_sub(start),
            ..self
        }
    }
}

/// JSON has no NaN or infinity; serde_json writes them as `null`, which is
/// read back as NaN.
fn float_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn default_width() -> f64 {
    5.0
}

fn default_granularity() -> i32 {
    5
}

fn default_smooth() -> bool {
    true
}

/// Rendering attributes carried by every line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(rename = "LineColor", default)]
    pub color: InkColor,
    #[serde(rename = "LineWidth", default = "default_width")]
    pub width: f64,
    /// Rendering smoothness; irrelevant to capture.
    #[serde(rename = "Granularity", default = "default_granularity")]
    pub granularity: i32,
    #[serde(rename = "ShouldSmoothPathWhenDrawn", default = "default_smooth")]
    pub smooth: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: InkColor::black(),
            width: default_width(),
            granularity: default_granularity(),
            smooth: default_smooth(),
        }
    }
}

/// An ordered run of ink points plus its style.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InkLine {
    #[serde(flatten)]
    pub style: LineStyle,
    #[serde(rename = "Points", default)]
    points: Vec<InkPoint>,
}

impl InkLine {
    /// Create an empty line with the given style.
    pub fn new(style: LineStyle) -> Self {
        Self {
            style,
            points: Vec::new(),
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<InkPoint>, style: LineStyle) -> Self {
        Self { style, points }
    }

    /// Append a point. Samples older than the last one are dropped so
    /// timestamps stay non-decreasing; returns whether the point was kept.
    pub fn push(&mut self, point: InkPoint) -> bool {
        if let Some(last) = self.points.last() {
            if point.timestamp < last.timestamp {
                log::debug!(
                    "Dropping out-of-order sample ({} < {})",
                    point.timestamp,
                    last.timestamp
                );
                return false;
            }
        }
        self.points.push(point);
        true
    }

    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<u64> {
        self.points.first().map(|p| p.timestamp)
    }

    /// Copy of this line with every timestamp made relative to `start`.
    pub fn rebased(&self, start: u64) -> Self {
        Self {
            style: self.style.clone(),
            points: self.points.iter().map(|p| p.rebased(start)).collect(),
        }
    }

    /// Bounding box of the line's points.
    pub fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y)
    }
}
