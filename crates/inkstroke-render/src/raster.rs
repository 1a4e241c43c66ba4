//! Minimal CPU rasterizer for exporting ink as images.

use crate::renderer::{InkRenderer, RenderError, RenderResult};
use inkstroke_core::ink::{InkColor, InkPoint, LineStyle};
use kurbo::{Affine, Point};

/// Upper bound on disc stamps per segment.
const MAX_STAMPS_PER_SEGMENT: usize = 100_000;

/// RGBA8 pixel buffer.
#[derive(Debug, Clone)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Create a transparent pixmap.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidSize(width, height);
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .filter(|len| *len > 0)
            .ok_or_else(invalid)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| invalid())?;
        data.resize(len, 0);
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    pub fn fill(&mut self, color: InkColor) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Source-over blend of `color` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: InkColor) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let alpha = color.a as f64 / 255.0;
        let src = [color.r, color.g, color.b];
        for (c, s) in src.iter().enumerate() {
            let d = self.data[i + c] as f64;
            self.data[i + c] = (*s as f64 * alpha + d * (1.0 - alpha)).round() as u8;
        }
        let da = self.data[i + 3] as f64 / 255.0;
        self.data[i + 3] = ((alpha + da * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Fill a disc, testing pixel centers.
    pub fn fill_disc(&mut self, center: Point, radius: f64, color: InkColor) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let x0 = (center.x - radius).floor().max(0.0);
        let y0 = (center.y - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(self.width as f64);
        let y1 = (center.y + radius).ceil().min(self.height as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let r2 = radius * radius;
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    /// Stroke a segment by stamping discs along it.
    pub fn stroke_segment(&mut self, a: Point, b: Point, radius: f64, color: InkColor) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let step = (radius * 0.5).max(0.5);
        let stamps = ((a.distance(b) / step).ceil() as usize).min(MAX_STAMPS_PER_SEGMENT);
        if stamps == 0 {
            self.fill_disc(a, radius, color);
            return;
        }
        for i in 0..=stamps {
            let t = i as f64 / stamps as f64;
            self.fill_disc(a.lerp(b, t), radius, color);
        }
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let mut writer = encoder
                .write_header()
                .map_err(|e| RenderError::Encode(format!("Failed to write PNG header: {}", e)))?;
            writer
                .write_image_data(&self.data)
                .map_err(|e| RenderError::Encode(format!("Failed to write PNG data: {}", e)))?;
        }
        Ok(png_data)
    }
}

/// [`InkRenderer`] that paints into an owned [`Pixmap`].
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    pixmap: Pixmap,
    /// Canvas units to pixels.
    transform: Affine,
    /// Uniform scale component of `transform`, used for line widths.
    scale: f64,
    background: InkColor,
}

impl RasterRenderer {
    /// Create a renderer whose canvas maps 1:1 onto pixels.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::with_transform(width, height, 1.0, Point::ZERO)
    }

    /// Create a renderer that scales canvas units by `scale` and then offsets
    /// by `offset` pixels.
    pub fn with_transform(
        width: u32,
        height: u32,
        scale: f64,
        offset: Point,
    ) -> RenderResult<Self> {
        let mut renderer = Self {
            pixmap: Pixmap::new(width, height)?,
            transform: Affine::translate(offset.to_vec2()) * Affine::scale(scale),
            scale,
            background: InkColor::white(),
        };
        renderer.clear();
        Ok(renderer)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap.encode_png()
    }
}

impl InkRenderer for RasterRenderer {
    fn paint(&mut self, points: &[InkPoint], style: &LineStyle) {
        let radius = (style.width * self.scale / 2.0).max(0.5);
        let mapped: Vec<Point> = points.iter().map(|p| self.transform * p.position()).collect();

        match mapped.as_slice() {
            [] => {}
            [only] => self.pixmap.fill_disc(*only, radius, style.color),
            _ => {
                for pair in mapped.windows(2) {
                    self.pixmap.stroke_segment(pair[0], pair[1], radius, style.color);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.pixmap.fill(self.background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn pt(x: f64, y: f64) -> InkPoint {
        InkPoint::new(Point::new(x, y), 1.0, Vec2::ZERO, 0)
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(Pixmap::new(0, 10), Err(RenderError::InvalidSize(0, 10))));
    }

    #[test]
    fn test_oversized_rejected() {
        let result = Pixmap::new(u32::MAX, u32::MAX);
        assert!(matches!(result, Err(RenderError::InvalidSize(u32::MAX, u32::MAX))));
    }

    #[test]
    fn test_starts_white() {
        let renderer = RasterRenderer::new(4, 4).unwrap();
        assert_eq!(renderer.pixmap().pixel(2, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_paint_line_darkens_path_only() {
        let mut renderer = RasterRenderer::new(20, 20).unwrap();
        let style = LineStyle {
            width: 2.0,
            ..LineStyle::default()
        };
        renderer.paint(&[pt(2.0, 10.0), pt(18.0, 10.0)], &style);

        assert_eq!(renderer.pixmap().pixel(10, 9), Some([0, 0, 0, 255]));
        assert_eq!(renderer.pixmap().pixel(10, 2), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_transform_scales_points() {
        let mut renderer =
            RasterRenderer::with_transform(40, 40, 2.0, Point::new(0.0, 0.0)).unwrap();
        renderer.paint(&[pt(10.0, 10.0)], &LineStyle::default());
        assert_eq!(renderer.pixmap().pixel(20, 20), Some([0, 0, 0, 255]));
        assert_eq!(renderer.pixmap().pixel(10, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_offscreen_and_nan_points_are_ignored() {
        let mut renderer = RasterRenderer::new(10, 10).unwrap();
        renderer.paint(&[pt(-100.0, -100.0), pt(f64::NAN, 3.0)], &LineStyle::default());
        assert!(renderer.pixmap().data().chunks(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_clear_restores_background() {
        let mut renderer = RasterRenderer::new(10, 10).unwrap();
        renderer.paint(&[pt(5.0, 5.0)], &LineStyle::default());
        renderer.clear();
        assert_eq!(renderer.pixmap().pixel(5, 5), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_png_signature() {
        let renderer = RasterRenderer::new(3, 2).unwrap();
        let png = renderer.encode_png().unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
