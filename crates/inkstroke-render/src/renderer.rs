//! Renderer trait abstraction.

use inkstroke_core::events::InkEvent;
use inkstroke_core::ink::{InkPoint, LineStyle};
use kurbo::Size;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid image size: {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Invalid canvas size: {0:?}")]
    InvalidCanvas(Size),
    #[error("Encoding failed: {0}")]
    Encode(String),
    #[error("Render cancelled")]
    Cancelled,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Paints ink for display.
///
/// Painting is fire-and-forget from the capture side: implementations queue
/// or draw immediately and never report back.
pub trait InkRenderer {
    /// Paint one run of points with the given style.
    fn paint(&mut self, points: &[InkPoint], style: &LineStyle);

    /// Erase everything painted so far.
    fn clear(&mut self);
}

/// Build an event listener that keeps `renderer` in sync with committed lines.
pub fn live_painter<R: InkRenderer + 'static>(renderer: Rc<RefCell<R>>) -> impl FnMut(&InkEvent) {
    move |event: &InkEvent| match event {
        InkEvent::LineCompleted(line) => renderer.borrow_mut().paint(line.points(), &line.style),
        InkEvent::LinesCleared => renderer.borrow_mut().clear(),
        _ => {}
    }
}
