//! Canvas state and the interaction state machine.
//!
//! [`Canvas`] owns the live shape list, annotations, selection, camera and
//! edit history. Pointer and keyboard events are fed in one at a time; each
//! handler returns an [`EventOutcome`] telling the caller whether to redraw.

use crate::annotation::{Annotation, AnnotationId};
use crate::camera::{Camera, GridLines};
use crate::config::{ConfigError, EditorConfig};
use crate::geometry::contains_point;
use crate::history::History;
use crate::input::{KeyEvent, PointerEvent};
use crate::shapes::{SerializableColor, Shape, ShapeId, ShapeStyle};
use crate::shortcuts::ShortcutRegistry;
use crate::tools::{ToolKind, ToolState};
use kurbo::{Point, Size, Vec2};

/// Commands issued by toolbar buttons or keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTool(ToolKind),
    ZoomIn,
    ZoomOut,
    /// Remove every shape (undoable).
    Clear,
    Undo,
    Redo,
    DeleteSelected,
    /// Abandon the gesture in progress.
    Cancel,
}

/// Where an annotation was requested. The caller asks the user for text and
/// passes it to [`Canvas::add_annotation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationRequest {
    /// World position of the click.
    pub position: Point,
    /// First shape under the click, if any.
    pub shape_id: Option<ShapeId>,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Nothing visible changed.
    Ignored,
    /// View or transient state changed; redraw.
    Changed,
    /// A new history entry was recorded; redraw.
    Committed,
    /// The annotate tool was clicked; the caller should collect text.
    AnnotationRequested(AnnotationRequest),
}

impl EventOutcome {
    /// Check if the caller should redraw.
    pub fn needs_redraw(&self) -> bool {
        matches!(self, EventOutcome::Changed | EventOutcome::Committed)
    }
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Shapes in draw order (back to front).
    shapes: Vec<Shape>,
    annotations: Vec<Annotation>,
    selection: Option<ShapeId>,
    tool: ToolKind,
    state: ToolState,
    camera: Camera,
    history: History,
    /// Style applied to the next shape drawn.
    style: ShapeStyle,
    config: EditorConfig,
    /// Last pointer position seen, in screen coordinates.
    last_pointer: Option<Point>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(EditorConfig::default())
    }

    /// Create an empty canvas with the given configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EditorConfig) -> Self {
        Self {
            shapes: Vec::new(),
            annotations: Vec::new(),
            selection: None,
            tool: ToolKind::default(),
            state: ToolState::Idle,
            camera: config.camera(),
            history: History::new(),
            style: config.default_style,
            config,
            last_pointer: None,
        }
    }

    // --- Read-only state for renderers ---

    /// Shapes in draw order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The selected shape, if any.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selection
    }

    /// Check if a shape is selected (render highlight).
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection == Some(id)
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// The gesture in progress.
    pub fn state(&self) -> &ToolState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn zoom(&self) -> f64 {
        self.camera.zoom
    }

    /// Pan offset in screen pixels.
    pub fn offset(&self) -> Vec2 {
        self.camera.offset
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn style(&self) -> ShapeStyle {
        self.style
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The shape being drawn, not yet part of [`Canvas::shapes`].
    pub fn preview_shape(&self) -> Option<&Shape> {
        match &self.state {
            ToolState::Drawing { shape } => Some(shape),
            _ => None,
        }
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// First shape in draw order under a world point.
    pub fn shape_at(&self, world: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .find(|s| contains_point(world, s, self.config.hit_tolerance))
            .map(Shape::id)
    }

    /// Grid lines for a viewport of the given size.
    pub fn grid_lines(&self, viewport: Size) -> GridLines {
        self.camera.grid_lines(viewport)
    }

    // --- Style ---

    /// Set the stroke color for new shapes.
    pub fn set_stroke_color(&mut self, color: SerializableColor) {
        self.style.stroke_color = color;
    }

    /// Set the stroke width for new shapes. Non-positive widths are ignored.
    pub fn set_stroke_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.style.stroke_width = width;
        }
    }

    // --- Commands ---

    /// Run a toolbar/keyboard command.
    pub fn execute(&mut self, command: Command) -> EventOutcome {
        match command {
            Command::SetTool(tool) => self.set_tool(tool),
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::Clear => self.clear(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::DeleteSelected => self.delete_selected(),
            Command::Cancel => self.cancel(),
        }
    }

    /// Resolve a key press through the shortcut registry and run it.
    pub fn handle_key(&mut self, event: &KeyEvent) -> EventOutcome {
        match ShortcutRegistry::resolve(&event.key, event.modifiers) {
            Some(command) => self.execute(command),
            None => EventOutcome::Ignored,
        }
    }

    /// Switch tools. A gesture in progress is finished first, as if the
    /// pointer had been released.
    pub fn set_tool(&mut self, tool: ToolKind) -> EventOutcome {
        let outcome = self.finish_gesture();
        if tool == self.tool {
            return outcome;
        }
        log::debug!("Tool changed: {} -> {}", self.tool, tool);
        self.tool = tool;
        match outcome {
            EventOutcome::Committed => EventOutcome::Committed,
            _ => EventOutcome::Changed,
        }
    }

    pub fn zoom_in(&mut self) -> EventOutcome {
        let before = self.camera.zoom;
        self.camera.zoom_in();
        Self::changed_if(self.camera.zoom != before)
    }

    pub fn zoom_out(&mut self) -> EventOutcome {
        let before = self.camera.zoom;
        self.camera.zoom_out();
        Self::changed_if(self.camera.zoom != before)
    }

    /// Remove all shapes. Records a history entry even if already empty.
    pub fn clear(&mut self) -> EventOutcome {
        self.cancel();
        log::debug!("Clearing {} shapes", self.shapes.len());
        self.shapes.clear();
        self.selection = None;
        self.commit();
        EventOutcome::Committed
    }

    /// Restore the previous history entry.
    pub fn undo(&mut self) -> EventOutcome {
        self.cancel();
        if !self.history.can_undo() {
            return EventOutcome::Ignored;
        }
        let snapshot = self.history.undo();
        self.restore(&snapshot);
        EventOutcome::Changed
    }

    /// Re-apply the next history entry.
    pub fn redo(&mut self) -> EventOutcome {
        self.cancel();
        if !self.history.can_redo() {
            return EventOutcome::Ignored;
        }
        let snapshot = self.history.redo();
        self.restore(&snapshot);
        EventOutcome::Changed
    }

    /// Delete the selected shape. Only allowed while no gesture is active.
    pub fn delete_selected(&mut self) -> EventOutcome {
        if self.state.is_active() {
            return EventOutcome::Ignored;
        }
        let Some(id) = self.selection.take() else {
            return EventOutcome::Ignored;
        };
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id() != id);
        if self.shapes.len() == before {
            return EventOutcome::Changed;
        }
        log::debug!("Deleted shape {}", id);
        self.commit();
        EventOutcome::Committed
    }

    /// Abandon the gesture in progress without recording history. A drag is
    /// rolled back to the last committed state.
    pub fn cancel(&mut self) -> EventOutcome {
        match std::mem::take(&mut self.state) {
            ToolState::Idle => EventOutcome::Ignored,
            ToolState::Panning { .. } => EventOutcome::Ignored,
            ToolState::Drawing { .. } => {
                log::trace!("Drawing cancelled");
                EventOutcome::Changed
            }
            ToolState::Dragging { moved, .. } => {
                log::trace!("Drag cancelled");
                if moved {
                    self.shapes = self.history.current().to_vec();
                }
                EventOutcome::Changed
            }
        }
    }

    // --- Annotations ---

    /// Add an annotation. Empty text is discarded and returns `None`.
    pub fn add_annotation(
        &mut self,
        position: Point,
        text: &str,
        shape_id: Option<ShapeId>,
    ) -> Option<AnnotationId> {
        let annotation = Annotation::new(position, text, shape_id)?;
        let id = annotation.id();
        self.annotations.push(annotation);
        Some(id)
    }

    /// Remove an annotation.
    pub fn remove_annotation(&mut self, id: AnnotationId) -> Option<Annotation> {
        let index = self.annotations.iter().position(|a| a.id() == id)?;
        Some(self.annotations.remove(index))
    }

    // --- Pointer input ---

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> EventOutcome {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Leave => self.pointer_leave(),
            PointerEvent::Scroll { position, delta } => self.scroll(position, delta),
        }
    }

    /// Start a gesture with the current tool.
    pub fn pointer_down(&mut self, screen: Point) -> EventOutcome {
        // A down without a matching up: close the stale gesture first.
        let stale = self.finish_gesture();
        self.last_pointer = Some(screen);
        let world = self.camera.screen_to_world(screen);

        let outcome = match self.tool {
            ToolKind::Pan => {
                self.state = ToolState::Panning { last: screen };
                EventOutcome::Ignored
            }
            ToolKind::Select => self.begin_select(world),
            ToolKind::Annotate => EventOutcome::AnnotationRequested(AnnotationRequest {
                position: world,
                shape_id: self.shape_at(world),
            }),
            ToolKind::Line
            | ToolKind::Rectangle
            | ToolKind::Circle
            | ToolKind::Triangle
            | ToolKind::Freehand => self.begin_drawing(world),
        };
        log::trace!("Pointer down with {} -> {}", self.tool, self.state.name());

        match (stale, outcome) {
            (EventOutcome::Committed, EventOutcome::Ignored | EventOutcome::Changed) => {
                EventOutcome::Committed
            }
            _ => outcome,
        }
    }

    /// Continue the gesture in progress.
    pub fn pointer_move(&mut self, screen: Point) -> EventOutcome {
        self.last_pointer = Some(screen);
        let world = self.camera.screen_to_world(screen);

        match &mut self.state {
            ToolState::Idle => EventOutcome::Ignored,
            ToolState::Panning { last } => {
                let delta = screen - *last;
                *last = screen;
                self.camera.pan(delta);
                EventOutcome::Changed
            }
            ToolState::Drawing { shape } => {
                shape.push_point(world);
                EventOutcome::Changed
            }
            ToolState::Dragging { id, last, moved } => {
                let delta = world - *last;
                *last = world;
                if delta == Vec2::ZERO {
                    return EventOutcome::Ignored;
                }
                if let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == *id) {
                    shape.translate(delta);
                    *moved = true;
                }
                EventOutcome::Changed
            }
        }
    }

    /// Finish the gesture in progress.
    pub fn pointer_up(&mut self, screen: Point) -> EventOutcome {
        self.last_pointer = Some(screen);
        self.finish_gesture()
    }

    /// The pointer left the canvas; treated as a release at the last known
    /// position so no gesture is left dangling.
    pub fn pointer_leave(&mut self) -> EventOutcome {
        self.finish_gesture()
    }

    /// Wheel zoom about the pointer. Negative `delta.y` (wheel up) zooms in.
    pub fn scroll(&mut self, screen: Point, delta: Vec2) -> EventOutcome {
        self.last_pointer = Some(screen);
        let factor = if delta.y < 0.0 {
            self.camera.zoom_step
        } else if delta.y > 0.0 {
            1.0 / self.camera.zoom_step
        } else {
            return EventOutcome::Ignored;
        };
        let before = (self.camera.zoom, self.camera.offset);
        self.camera.zoom_at(screen, factor);
        Self::changed_if((self.camera.zoom, self.camera.offset) != before)
    }

    // --- Internals ---

    fn begin_select(&mut self, world: Point) -> EventOutcome {
        match self.shape_at(world) {
            Some(id) => {
                self.selection = Some(id);
                self.state = ToolState::Dragging {
                    id,
                    last: world,
                    moved: false,
                };
                EventOutcome::Changed
            }
            None => Self::changed_if(self.selection.take().is_some()),
        }
    }

    fn begin_drawing(&mut self, world: Point) -> EventOutcome {
        let Some(kind) = self.tool.shape_kind() else {
            return EventOutcome::Ignored;
        };
        self.state = ToolState::Drawing {
            shape: Shape::new(kind, world, self.style),
        };
        EventOutcome::Changed
    }

    /// End the active gesture at the last known pointer position, committing
    /// drawn or moved shapes.
    fn finish_gesture(&mut self) -> EventOutcome {
        let state = std::mem::take(&mut self.state);
        if !state.is_active() {
            return EventOutcome::Ignored;
        }
        log::trace!("Finishing {} gesture", state.name());
        let Some(screen) = self.last_pointer else {
            return EventOutcome::Changed;
        };
        let world = self.camera.screen_to_world(screen);

        match state {
            ToolState::Idle => EventOutcome::Ignored,
            ToolState::Panning { last } => {
                let delta = screen - last;
                self.camera.pan(delta);
                Self::changed_if(delta != Vec2::ZERO)
            }
            ToolState::Drawing { mut shape } => {
                if shape.kind.is_two_point() || shape.points.last() != Some(&world) {
                    shape.push_point(world);
                }
                log::debug!("Finished {} with {} points", shape.kind, shape.points.len());
                self.shapes.push(shape);
                self.commit();
                EventOutcome::Committed
            }
            ToolState::Dragging { id, last, mut moved } => {
                let delta = world - last;
                if delta != Vec2::ZERO {
                    if let Some(shape) = self.shapes.iter_mut().find(|s| s.id() == id) {
                        shape.translate(delta);
                        moved = true;
                    }
                }
                if moved {
                    log::debug!("Moved shape {}", id);
                    self.commit();
                    EventOutcome::Committed
                } else {
                    EventOutcome::Ignored
                }
            }
        }
    }

    fn commit(&mut self) {
        self.history.commit(&self.shapes);
    }

    fn restore(&mut self, snapshot: &[Shape]) {
        self.shapes = snapshot.to_vec();
        if self.selection.is_some_and(|id| self.shape(id).is_none()) {
            self.selection = None;
        }
    }

    fn changed_if(changed: bool) -> EventOutcome {
        if changed {
            EventOutcome::Changed
        } else {
            EventOutcome::Ignored
        }
    }
}
