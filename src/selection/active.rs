//! The active shape and selection notifications.

use crate::canvas::{Canvas, HoverState};
use crate::error::{CanvasError, CanvasResult};
use crate::events::{
    BEFORE_SELECTION_CLEARED, CanvasEvent, SELECTION_CLEARED, SELECTION_CREATED, SELECTION_UPDATED,
    SHAPE_DESELECTED, SHAPE_SELECTED,
};
use crate::input::PointerEvent;
use crate::scene::ShapeId;
use crate::shape::Shape;

impl Canvas {
    pub fn active_object(&self) -> Option<ShapeId> {
        self.active_object
    }

    /// The active shape when it is a multi-selection wrapper.
    pub fn active_selection(&self) -> Option<ShapeId> {
        self.active_object
            .filter(|id| self.scene.get(*id).is_some_and(Shape::is_active_selection))
    }

    /// Selected shapes: the selection members, the single active shape, or nothing.
    pub fn active_objects(&self) -> Vec<ShapeId> {
        let Some(active) = self.active_object else {
            return Vec::new();
        };
        match self.scene.get(active) {
            Some(shape) if shape.is_active_selection() => shape.kind.contents().to_vec(),
            Some(_) => vec![active],
            None => Vec::new(),
        }
    }

    /// Make `id` the active shape and notify. Returns false when it was
    /// already active or refused selection.
    pub fn set_active_object(
        &mut self,
        id: ShapeId,
        e: Option<&PointerEvent>,
    ) -> CanvasResult<bool> {
        if !self.scene.contains(id) {
            return Err(CanvasError::UnknownShape(id));
        }
        let selected = self.select_object(id, e);
        self.take_failures()?;
        Ok(selected)
    }

    /// Clear the selection and notify. Returns false when nothing was active.
    pub fn discard_active_object(&mut self, e: Option<&PointerEvent>) -> CanvasResult<bool> {
        let discarded = self.deselect_all(e);
        self.take_failures()?;
        Ok(discarded)
    }

    pub(crate) fn select_object(&mut self, id: ShapeId, e: Option<&PointerEvent>) -> bool {
        let previous = self.active_objects();
        let selected = self.set_active_object_inner(id, e);
        self.fire_selection_events(&previous, e);
        selected
    }

    pub(crate) fn deselect_all(&mut self, e: Option<&PointerEvent>) -> bool {
        let previous = self.active_objects();
        if !previous.is_empty() {
            let payload = CanvasEvent {
                e: e.cloned(),
                deselected: self.active_object.into_iter().collect(),
                ..Default::default()
            };
            self.fire(BEFORE_SELECTION_CLEARED, &payload);
        }
        let discarded = self.discard_active_object_inner(e);
        self.fire_selection_events(&previous, e);
        discarded
    }

    /// Swap the active shape without notifying.
    pub(crate) fn set_active_object_inner(
        &mut self,
        id: ShapeId,
        e: Option<&PointerEvent>,
    ) -> bool {
        if self.active_object == Some(id) {
            return false;
        }
        if !self.discard_active_object_inner(e) && self.active_object.is_some() {
            return false;
        }
        let Some(shape) = self.scene.get(id) else {
            return false;
        };
        if shape.on_select() {
            tracing::trace!(shape_id = id, "Selection vetoed");
            return false;
        }
        self.active_object = Some(id);
        self.scene.set_coords(id);
        true
    }

    /// Drop the active shape without notifying. A multi-selection wrapper
    /// is dissolved and its members go back to the scene.
    pub(crate) fn discard_active_object_inner(&mut self, e: Option<&PointerEvent>) -> bool {
        let Some(active) = self.active_object else {
            return false;
        };
        if self.input_state.transform_target() == Some(active) {
            match e {
                Some(e) => {
                    self.finalize_current_transform(e);
                }
                None => self.input_state.reset(),
            }
        }
        self.active_object = None;
        if self.scene.get(active).is_some_and(Shape::is_active_selection) {
            if self.hover.target == Some(active) {
                self.hover = HoverState::default();
            }
            if let Err(err) = self.scene.dissolve_selection(active) {
                tracing::warn!(selection_id = active, error = %err, "Failed to dissolve selection");
            }
        }
        true
    }

    /// Notify shapes and the canvas about the difference between `previous`
    /// and the current selection.
    pub(crate) fn fire_selection_events(&mut self, previous: &[ShapeId], e: Option<&PointerEvent>) {
        let current = self.active_objects();
        let mut selected = Vec::new();
        let mut deselected = Vec::new();

        for old in previous {
            if !current.contains(old) {
                let payload = CanvasEvent {
                    e: e.cloned(),
                    target: Some(*old),
                    ..Default::default()
                };
                self.fire_on_shape(*old, SHAPE_DESELECTED, &payload);
                deselected.push(*old);
            }
        }
        for new in &current {
            if !previous.contains(new) {
                let payload = CanvasEvent {
                    e: e.cloned(),
                    target: Some(*new),
                    ..Default::default()
                };
                self.fire_on_shape(*new, SHAPE_SELECTED, &payload);
                selected.push(*new);
            }
        }

        let changed = !selected.is_empty() || !deselected.is_empty();
        let payload = CanvasEvent {
            e: e.cloned(),
            selected,
            deselected,
            ..Default::default()
        };
        if !previous.is_empty() && !current.is_empty() {
            if changed {
                self.fire(SELECTION_UPDATED, &payload);
            }
        } else if !current.is_empty() {
            tracing::debug!(count = current.len(), "Selection created");
            self.fire(SELECTION_CREATED, &payload);
        } else if !previous.is_empty() {
            tracing::debug!(count = previous.len(), "Selection cleared");
            self.fire(SELECTION_CLEARED, &payload);
        }
    }

    /// Whether the active shape changes between `target` and the current one.
    pub(crate) fn should_render(&self, target: Option<ShapeId>) -> bool {
        match (self.active_object, target) {
            (Some(active), Some(target)) => active != target,
            (active, target) => active.is_some() != target.is_some(),
        }
    }
}
