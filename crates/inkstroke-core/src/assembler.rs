//! Line assembly: turns a stream of ink points into committed lines.

use crate::config::CaptureConfig;
use crate::events::{EventBus, InkEvent};
use crate::ink::{InkLine, InkPoint, LineStyle};
use kurbo::Size;

/// State of the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblerState {
    /// No line is open.
    #[default]
    Idle,
    /// A contact line is open.
    Drawing,
    /// A floating (proximity) line is open.
    Hovering,
}

/// Committed lines, with a version bumped on every mutation.
#[derive(Debug, Clone, Default)]
pub struct LineCollection {
    lines: Vec<InkLine>,
    version: u64,
}

impl LineCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: InkLine) {
        self.lines.push(line);
        self.version += 1;
    }

    /// Remove every line. Returns false if the collection was already empty.
    pub fn clear(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.lines.clear();
        self.version += 1;
        true
    }

    /// Replace the contents wholesale (e.g. after re-fitting to a new canvas).
    pub fn replace(&mut self, lines: Vec<InkLine>) {
        self.lines = lines;
        self.version += 1;
    }

    pub fn lines(&self) -> &[InkLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InkLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Owns the in-progress line and the committed line collection.
///
/// Driven by exactly one input stream; all transitions run synchronously and
/// notify subscribers through [`EventBus`] before returning.
#[derive(Debug)]
pub struct LineAssembler {
    state: AssemblerState,
    current: Option<InkLine>,
    committed: LineCollection,
    events: EventBus,
    /// Canvas size in canvas units; points outside it are not committed.
    canvas_size: Size,
    /// Style applied to newly opened lines.
    pub style: LineStyle,
    /// Keep earlier lines when a new one starts.
    pub multi_line: bool,
    /// Accept proximity input as floating lines.
    pub floating_lines: bool,
    /// Empty the collection right after each commit.
    pub clear_on_finish: bool,
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::from_config(&CaptureConfig::default())
    }
}

impl LineAssembler {
    /// Create an assembler for a canvas of the given size (canvas units).
    pub fn new(canvas_size: Size) -> Self {
        let mut assembler = Self::default();
        assembler.canvas_size = canvas_size;
        assembler
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self {
            state: AssemblerState::Idle,
            current: None,
            committed: LineCollection::new(),
            events: EventBus::new(),
            canvas_size: config.canvas_size(),
            style: config.style.clone(),
            multi_line: config.multi_line,
            floating_lines: config.floating_lines,
            clear_on_finish: config.clear_on_finish,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// The open line, if any.
    pub fn current_line(&self) -> Option<&InkLine> {
        self.current.as_ref()
    }

    pub fn lines(&self) -> &LineCollection {
        &self.committed
    }

    /// Committed lines followed by the open line.
    pub fn all_lines(&self) -> impl Iterator<Item = &InkLine> {
        self.committed.iter().chain(self.current.iter())
    }

    /// Whether `point` lies within `[0, width) x [0, height)`.
    pub fn in_bounds(&self, point: &InkPoint) -> bool {
        point.x >= 0.0
            && point.x < self.canvas_size.width
            && point.y >= 0.0
            && point.y < self.canvas_size.height
    }

    /// Begin a contact line at `point`.
    pub fn start(&mut self, point: InkPoint) {
        match self.state {
            AssemblerState::Drawing => {
                log::debug!("start while drawing, finishing the open line first");
                self.finish();
            }
            AssemblerState::Hovering => self.hover_stop(),
            AssemblerState::Idle => {}
        }
        self.open(point, AssemblerState::Drawing);
    }

    /// Extend the contact line.
    ///
    /// Subscribers always see the point; it only joins the line when it lies
    /// inside the canvas.
    pub fn moving(&mut self, point: InkPoint) {
        if self.state != AssemblerState::Drawing {
            log::debug!("Ignoring move in state {:?}", self.state);
            return;
        }
        self.extend(point);
    }

    /// Close and commit the contact line.
    pub fn finish(&mut self) {
        if self.state != AssemblerState::Drawing {
            log::debug!("Ignoring finish in state {:?}", self.state);
            return;
        }
        self.commit_open_line();
    }

    /// Drop the open line without committing it.
    pub fn cancel(&mut self) {
        self.state = AssemblerState::Idle;
        if self.current.take().is_some() {
            log::debug!("Line cancelled");
            self.events.emit(InkEvent::LineCancelled);
        }
    }

    /// Begin a floating line from proximity input.
    pub fn hover_start(&mut self, point: InkPoint) {
        if !self.floating_lines {
            return;
        }
        match self.state {
            AssemblerState::Drawing => {
                log::debug!("Ignoring hover start while drawing");
                return;
            }
            AssemblerState::Hovering => self.hover_stop(),
            AssemblerState::Idle => {}
        }
        self.open(point, AssemblerState::Hovering);
    }

    /// Extend the floating line.
    pub fn hover_move(&mut self, point: InkPoint) {
        if self.state != AssemblerState::Hovering {
            return;
        }
        self.extend(point);
    }

    /// Close and commit the floating line.
    pub fn hover_stop(&mut self) {
        if self.state != AssemblerState::Hovering {
            return;
        }
        self.commit_open_line();
    }

    /// Empty the committed collection.
    pub fn clear(&mut self) {
        if self.committed.clear() {
            self.events.emit(InkEvent::LinesCleared);
        }
    }

    /// Swap in a new committed collection, e.g. re-fitted lines after a resize.
    pub fn replace_lines(&mut self, lines: Vec<InkLine>) {
        self.committed.replace(lines);
    }

    fn open(&mut self, point: InkPoint, state: AssemblerState) {
        if !self.multi_line {
            self.clear();
        }
        let mut line = InkLine::new(self.style.clone());
        line.push(point);
        self.current = Some(line);
        self.state = state;
        self.events.emit(InkEvent::LineStarted(point));
    }

    fn extend(&mut self, point: InkPoint) {
        let in_bounds = self.in_bounds(&point);
        if let Some(line) = self.current.as_mut() {
            if in_bounds {
                line.push(point);
            }
        }
        self.events.emit(InkEvent::PointDrawn(point));
    }

    fn commit_open_line(&mut self) {
        self.state = AssemblerState::Idle;
        let Some(line) = self.current.take() else {
            return;
        };
        if line.is_empty() {
            log::debug!("Discarding empty line");
            return;
        }

        self.committed.push(line.clone());
        self.events.emit(InkEvent::LineCompleted(line));

        if self.clear_on_finish {
            self.clear();
        }
    }
}
