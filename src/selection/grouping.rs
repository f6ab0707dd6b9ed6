//! Multi-select extension: toggling shapes in and out of the active
//! selection with the selection key.

use crate::canvas::{Canvas, HoverState};
use crate::input::PointerEvent;
use crate::scene::ShapeId;

impl Canvas {
    pub(crate) fn is_selection_key_pressed(&self, e: &PointerEvent) -> bool {
        e.modifiers.is_held(self.options.selection_key)
    }

    /// Whether a pointer-down on `target` drops the current selection.
    pub(crate) fn should_clear_selection(&self, e: &PointerEvent, target: Option<ShapeId>) -> bool {
        let Some(shape) = target.and_then(|id| self.scene.get(id)) else {
            return true;
        };
        let id = shape.id();
        let active = self.active_object;
        let active_objects = self.active_objects();

        let outside_multi_selection = active.is_some()
            && active_objects.len() > 1
            && !active_objects.contains(&id)
            && active != Some(id)
            && !self.is_selection_key_pressed(e);
        let unselectable_elsewhere = !shape.selectable && active.is_some() && active != Some(id);
        outside_multi_selection || !shape.evented || unselectable_elsewhere
    }

    /// Extend, shrink or create the multi-selection. Returns true when the
    /// pointer-down was consumed by grouping.
    pub(crate) fn handle_multi_selection(
        &mut self,
        e: &PointerEvent,
        target: Option<ShapeId>,
    ) -> bool {
        let (Some(active), Some(mut target)) = (self.active_object, target) else {
            return false;
        };
        let Some(target_shape) = self.scene.get(target) else {
            return false;
        };
        let is_selection = self.active_selection().is_some();
        let unrelated = is_selection
            || (!self.scene.is_descendant_of(target, active)
                && !self.scene.is_descendant_of(active, target));
        let applies = self.is_selection_key_pressed(e)
            && self.options.selection
            && target_shape.selectable
            && (active != target || is_selection)
            && unrelated
            && !target_shape.on_select()
            && self.active_control_at(active, e).is_none();
        if !applies {
            return false;
        }

        let previous = self.active_objects();
        if is_selection {
            if target == active {
                // Clicked inside the selection: look for a member to drop,
                // then for a shape underneath to add
                let scene_point = self.scene_point(e);
                let found = self
                    .scene
                    .search_possible_targets(&previous, scene_point)
                    .0
                    .or_else(|| self.scene.find_top_level_target(scene_point).0);
                match found.filter(|id| self.scene.get(*id).is_some_and(|shape| shape.selectable)) {
                    Some(found) => target = found,
                    None => return false,
                }
            }

            if self.scene.get(target).and_then(|shape| shape.group) == Some(active) {
                if let Err(err) = self.scene.selection_remove(active, target) {
                    tracing::warn!(shape_id = target, error = %err, "Failed to leave selection");
                    return false;
                }
                self.hover = HoverState {
                    target: Some(target),
                    sub_targets: Vec::new(),
                };
                let remaining = self.scene.selection_members(active).unwrap_or_default();
                if let [only] = remaining.as_slice() {
                    // Deselecting the wrapper releases the last member
                    self.set_active_object_inner(*only, Some(e));
                }
            } else {
                if let Err(err) = self.scene.selection_add(active, target) {
                    tracing::warn!(shape_id = target, error = %err, "Failed to join selection");
                    return false;
                }
                self.hover.target = Some(active);
            }
            self.fire_selection_events(&previous, Some(e));
        } else {
            let selection = match self.scene.create_selection(&[active, target]) {
                Ok(selection) => selection,
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to create selection");
                    return false;
                }
            };
            self.hover.target = Some(selection);
            self.set_active_object_inner(selection, Some(e));
            self.fire_selection_events(&previous, Some(e));
        }
        true
    }
}
