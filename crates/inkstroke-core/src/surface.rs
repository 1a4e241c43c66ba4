//! A drawing surface: raw pointer events in, committed lines and session data out.

use crate::assembler::LineAssembler;
use crate::config::CaptureConfig;
use crate::events::InkEvent;
use crate::input::{PointMapper, PointerPhase, RawPointerEvent};
use crate::normalize::normalize_lines;
use crate::recorder::SessionRecorder;
use crate::session::DrawingSession;
use crate::storage::{Storage, StorageResult};
use kurbo::Size;
use std::sync::mpsc::Receiver;

/// Routes one input stream through the mapper into the assembler, and
/// collects completed lines into the session.
#[derive(Debug)]
pub struct CaptureSurface {
    mapper: PointMapper,
    assembler: LineAssembler,
    session: DrawingSession,
    /// Assembler notifications, drained after every event.
    feed: Receiver<InkEvent>,
}

impl CaptureSurface {
    pub fn new(config: &CaptureConfig, session: DrawingSession) -> Self {
        let mut mapper = PointMapper::new(config.density);
        mapper.floating_lines = config.floating_lines;
        mapper.contactless_pressure = config.contactless_pressure;

        let mut assembler = LineAssembler::from_config(config);
        let feed = assembler.events_mut().subscribe_channel();

        Self {
            mapper,
            assembler,
            session,
            feed,
        }
    }

    pub fn assembler(&self) -> &LineAssembler {
        &self.assembler
    }

    /// Mutable access, e.g. to subscribe a renderer.
    pub fn assembler_mut(&mut self) -> &mut LineAssembler {
        &mut self.assembler
    }

    pub fn mapper(&self) -> &PointMapper {
        &self.mapper
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    /// Enable or disable floating lines for both mapping and assembly.
    pub fn set_floating_lines(&mut self, enabled: bool) {
        self.mapper.floating_lines = enabled;
        self.assembler.floating_lines = enabled;
    }

    /// Feed one platform event through the pipeline.
    pub fn handle_event(&mut self, event: &RawPointerEvent) {
        let point = self.mapper.map(event);
        match event.phase {
            PointerPhase::Down => self.assembler.start(point),
            PointerPhase::Move => self.assembler.moving(point),
            PointerPhase::Up => self.assembler.finish(),
            PointerPhase::Cancel => self.assembler.cancel(),
            PointerPhase::HoverEnter => self.assembler.hover_start(point),
            PointerPhase::HoverMove => self.assembler.hover_move(point),
            PointerPhase::HoverExit => self.assembler.hover_stop(),
        }
        self.drain();
    }

    /// Resize the canvas and re-fit committed lines into the new bounds.
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64, canvas_scale: f64) {
        let scale = if canvas_scale.is_finite() && canvas_scale > 0.0 {
            canvas_scale
        } else {
            log::warn!("Ignoring invalid canvas scale {canvas_scale}, using 1.0");
            1.0
        };

        let refit = normalize_lines(
            self.assembler.lines().lines(),
            viewport_width,
            viewport_height,
            scale,
        );
        self.assembler.replace_lines(refit);
        self.assembler
            .set_canvas_size(Size::new(viewport_width / scale, viewport_height / scale));
    }

    /// Persist lines completed since the last checkpoint.
    pub fn checkpoint<S: Storage>(
        &mut self,
        recorder: &SessionRecorder<S>,
    ) -> StorageResult<usize> {
        self.session.checkpoint(recorder)
    }

    fn drain(&mut self) {
        // The session start comes from committed lines only; a cancelled
        // first gesture must not set it.
        for event in self.feed.try_iter() {
            if let InkEvent::LineCompleted(line) = event {
                self.session.push_line(line);
            }
        }
    }
}
