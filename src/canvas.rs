//! Canvas state - the interaction surface and its sub-structs.
//!
//! Pointer handling lives in `input/`, selection in `selection/`; both are
//! `impl Canvas` blocks over the state defined here.

use crate::config::CanvasOptions;
use crate::constants::DEFAULT_CURSOR;
use crate::error::{CanvasError, CanvasResult};
use crate::events::{CanvasEvent, Observable, Subscription};
use crate::geometry::Point;
use crate::input::{InputState, PointerEvent, PointerTracker, Transform};
use crate::scene::{Scene, ShapeId};
use crate::shape::Shape;

/// Repaint work requested by the last handler. `All` dominates `Top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequest {
    /// Only the interaction layer (lasso, controls)
    Top,
    All,
}

/// External free-drawing tool; receives scene-space pointers.
pub trait FreeDrawingBrush {
    fn on_mouse_down(&mut self, pointer: Point, event: &PointerEvent);
    fn on_mouse_move(&mut self, pointer: Point, event: &PointerEvent);
    /// Returns true while the stroke should keep receiving events
    fn on_mouse_up(&mut self, pointer: Point, event: &PointerEvent) -> bool;
}

/// Shapes under the pointer: the top-level target plus nested sub-targets,
/// innermost first. Rewritten wholesale on every move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    pub target: Option<ShapeId>,
    pub sub_targets: Vec<ShapeId>,
}

/// Target resolved for the event being handled.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventTargets {
    pub target: Option<ShapeId>,
    pub sub_targets: Vec<ShapeId>,
}

pub struct Canvas {
    pub options: CanvasOptions,
    pub(crate) scene: Scene,
    pub(crate) events: Observable,
    /// Input state machine; holds the single live transform session
    pub(crate) input_state: InputState,
    pub(crate) active_object: Option<ShapeId>,
    pub(crate) hover: HoverState,
    pub(crate) drag_hover: HoverState,
    pub(crate) pointer_tracker: PointerTracker,
    pub(crate) cursor: String,
    pub(crate) render_request: Option<RenderRequest>,
    pub(crate) brush: Option<Box<dyn FreeDrawingBrush>>,
    pub(crate) drawing_mode: bool,
    /// No move seen since the last pointer-down
    pub(crate) is_click: bool,
    pub(crate) event_targets: EventTargets,
    pub(crate) pending_failures: Vec<CanvasError>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasOptions::default())
    }
}

impl Canvas {
    pub fn new(options: CanvasOptions) -> Self {
        let mut scene = Scene::new();
        scene.set_corner_sizes(options.corner_size, options.touch_corner_size);
        let pointer_tracker = PointerTracker::new(options.touch_idle_debounce_ms);
        let cursor = options.default_cursor.clone();
        Self {
            options,
            scene,
            events: Observable::new(),
            input_state: InputState::Idle,
            active_object: None,
            hover: HoverState::default(),
            drag_hover: HoverState::default(),
            pointer_tracker,
            cursor,
            render_request: None,
            brush: None,
            drawing_mode: false,
            is_click: false,
            event_targets: EventTargets::default(),
            pending_failures: Vec::new(),
        }
    }

    // ========================================================================
    // Scene access
    // ========================================================================

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access. Call [`Canvas::set_coords`] after moving shapes.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.scene.get(id)
    }

    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = self.scene.add(shape);
        self.request_render_all();
        id
    }

    /// Remove a shape, first releasing any interaction state that refers to
    /// it or to one of its descendants.
    pub fn remove(&mut self, id: ShapeId) -> CanvasResult<Shape> {
        if !self.scene.contains(id) {
            return Err(CanvasError::UnknownShape(id));
        }
        let removed_with =
            |scene: &Scene, other: ShapeId| other == id || scene.is_descendant_of(other, id);
        let container = self.scene.get(id).and_then(|shape| shape.group);
        let in_selection =
            self.active_selection().filter(|selection| container == Some(*selection));
        if self.active_object.is_some_and(|active| removed_with(&self.scene, active)) {
            self.deselect_all(None);
        } else if let Some(selection) = in_selection {
            let previous = self.active_objects();
            self.scene.selection_remove(selection, id)?;
            if let [only] = self.scene.selection_members(selection)?.as_slice() {
                self.set_active_object_inner(*only, None);
            }
            self.fire_selection_events(&previous, None);
        }
        if self
            .input_state
            .transform_target()
            .is_some_and(|target| removed_with(&self.scene, target))
        {
            self.input_state.reset();
        }
        let mut hovered =
            self.hover.target.into_iter().chain(self.hover.sub_targets.iter().copied());
        if hovered.any(|other| removed_with(&self.scene, other)) {
            self.hover = HoverState::default();
        }
        if self.drag_hover.target.is_some_and(|other| removed_with(&self.scene, other)) {
            self.drag_hover = HoverState::default();
        }
        let removed = self.scene.remove(id)?;
        self.request_render_all();
        self.take_failures()?;
        Ok(removed)
    }

    /// Refresh cached coordinates after mutating a shape through `scene_mut`.
    pub fn set_coords(&mut self, id: ShapeId) {
        self.scene.set_coords(id);
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn events(&self) -> &Observable {
        &self.events
    }

    pub fn on<F>(&self, event: &str, listener: F) -> Subscription
    where
        F: Fn(&CanvasEvent) -> anyhow::Result<()> + 'static,
    {
        self.events.on(event, listener)
    }

    /// Fire on the canvas; failures are kept until the handler completes.
    pub(crate) fn fire(&mut self, event: &str, payload: &CanvasEvent) {
        if let Err(err) = self.events.fire(event, payload) {
            self.pending_failures.push(err);
        }
    }

    /// Fire on one shape. Missing shapes are skipped.
    pub(crate) fn fire_on_shape(&mut self, id: ShapeId, event: &str, payload: &CanvasEvent) {
        let Some(observable) = self.scene.get(id).map(|shape| shape.events().clone()) else {
            return;
        };
        if let Err(err) = observable.fire(event, payload) {
            self.pending_failures.push(err);
        }
    }

    /// Surface listener failures collected while handling one event.
    pub(crate) fn take_failures(&mut self) -> CanvasResult<()> {
        let failures = std::mem::take(&mut self.pending_failures);
        match CanvasError::merge_listener_failures(failures) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Base payload for a pointer notification.
    pub(crate) fn pointer_payload(&self, e: &PointerEvent) -> CanvasEvent {
        CanvasEvent {
            e: Some(e.clone()),
            scene_point: Some(self.scene_point(e)),
            viewport_point: Some(e.point),
            ..Default::default()
        }
    }

    // ========================================================================
    // Rendering and cursor
    // ========================================================================

    pub fn request_render_all(&mut self) {
        self.render_request = Some(RenderRequest::All);
    }

    pub fn render_top(&mut self) {
        if self.render_request.is_none() {
            self.render_request = Some(RenderRequest::Top);
        }
    }

    /// Pending repaint request, coalesced since the last call.
    pub fn take_render_request(&mut self) -> Option<RenderRequest> {
        self.render_request.take()
    }

    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: &str) {
        if self.cursor != cursor {
            self.cursor = cursor.to_string();
        }
    }

    // ========================================================================
    // Interaction state
    // ========================================================================

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    /// The live transform session, if any.
    pub fn current_transform(&self) -> Option<&Transform> {
        self.input_state.transform()
    }

    pub fn hovered(&self) -> &HoverState {
        &self.hover
    }

    pub fn set_free_drawing_brush(&mut self, brush: Box<dyn FreeDrawingBrush>) {
        self.brush = Some(brush);
    }

    pub fn set_drawing_mode(&mut self, enabled: bool) {
        self.drawing_mode = enabled;
        if !enabled && self.input_state.is_drawing() {
            self.input_state.reset();
        }
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub(crate) fn reset_cursor(&mut self) {
        let cursor = self.options.default_cursor.clone();
        self.set_cursor(if cursor.is_empty() { DEFAULT_CURSOR } else { &cursor });
    }
}
