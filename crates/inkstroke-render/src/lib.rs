//! InkStroke Render Library
//!
//! Renderer abstraction for captured ink, plus a small software rasterizer
//! used to export lines as PNG images.

mod export;
mod raster;
mod renderer;

pub use export::{ImageStream, fit_to_image, image_stream};
pub use raster::{Pixmap, RasterRenderer};
pub use renderer::{InkRenderer, RenderError, RenderResult, live_painter};
