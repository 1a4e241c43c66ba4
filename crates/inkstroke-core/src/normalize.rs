//! Re-fitting captured points to canvas bounds.

use crate::ink::{InkLine, InkPoint};
use kurbo::Point;

/// Clamp every point into `[0, width / scale] x [0, height / scale]`.
///
/// Pressure, tilt and timestamp pass through unchanged. A scale that is not
/// positive and finite leaves the upper bounds open, so coordinates are only
/// clamped to `[0, inf)`.
pub fn normalize(
    points: &[InkPoint],
    viewport_width: f64,
    viewport_height: f64,
    canvas_scale: f64,
) -> Vec<InkPoint> {
    let max_x = upper_bound(viewport_width, canvas_scale);
    let max_y = upper_bound(viewport_height, canvas_scale);
    points
        .iter()
        .map(|p| {
            let x = p.x.max(0.0).min(max_x);
            let y = p.y.max(0.0).min(max_y);
            p.with_position(Point::new(x, y))
        })
        .collect()
}

fn upper_bound(extent: f64, scale: f64) -> f64 {
    if !(scale.is_finite() && scale > 0.0) {
        return f64::INFINITY;
    }
    let bound = extent / scale;
    if bound >= 0.0 { bound } else { f64::INFINITY }
}

/// [`normalize`] applied to every line, keeping each line's style.
pub fn normalize_lines(
    lines: &[InkLine],
    viewport_width: f64,
    viewport_height: f64,
    canvas_scale: f64,
) -> Vec<InkLine> {
    lines
        .iter()
        .map(|line| {
            InkLine::from_points(
                normalize(line.points(), viewport_width, viewport_height, canvas_scale),
                line.style.clone(),
            )
        })
        .collect()
}
