//! Image export of captured ink.

use crate::raster::RasterRenderer;
use crate::renderer::{InkRenderer, RenderError, RenderResult};
use inkstroke_core::CancelToken;
use inkstroke_core::ink::InkLine;
use kurbo::{Point, Size};
use std::io::Cursor;

/// Encoded image bytes, readable as a stream.
pub type ImageStream = Cursor<Vec<u8>>;

/// Uniform scale and centering offset that fit `canvas` into `width x height`.
pub fn fit_to_image(canvas: Size, width: u32, height: u32) -> (f64, Point) {
    let scale = (width as f64 / canvas.width).min(height as f64 / canvas.height);
    let offset = Point::new(
        (width as f64 - canvas.width * scale) / 2.0,
        (height as f64 - canvas.height * scale) / 2.0,
    );
    (scale, offset)
}

/// Render `lines` drawn on a canvas of `canvas_size` into a PNG of exactly
/// `width x height`, preserving the canvas aspect ratio.
///
/// `cancel` is checked before each line and before encoding.
pub fn image_stream<'a>(
    lines: impl IntoIterator<Item = &'a InkLine>,
    canvas_size: Size,
    width: u32,
    height: u32,
    cancel: &CancelToken,
) -> RenderResult<ImageStream> {
    if !(canvas_size.width > 0.0 && canvas_size.height > 0.0 && canvas_size.is_finite()) {
        return Err(RenderError::InvalidCanvas(canvas_size));
    }

    let (scale, offset) = fit_to_image(canvas_size, width, height);
    let mut renderer = RasterRenderer::with_transform(width, height, scale, offset)?;

    let mut painted = 0usize;
    for line in lines {
        if cancel.is_cancelled() {
            log::debug!("Image export cancelled after {} line(s)", painted);
            return Err(RenderError::Cancelled);
        }
        renderer.paint(line.points(), &line.style);
        painted += 1;
    }

    if cancel.is_cancelled() {
        return Err(RenderError::Cancelled);
    }
    let png = renderer.encode_png()?;
    log::debug!("Exported {} line(s) as {}x{} PNG ({} bytes)", painted, width, height, png.len());
    Ok(Cursor::new(png))
}
