//! Rubber-band selection resolved on pointer-up.

use crate::canvas::Canvas;
use crate::input::{GroupSelector, PointerEvent};
use crate::profile_scope;
use crate::scene::ShapeId;
use crate::shape::Shape;

impl Canvas {
    /// Shapes a lasso picks: the topmost hit for a zero-size box, every
    /// match otherwise (vetoed shapes dropped when several match).
    pub(crate) fn lasso_objects(&self, selector: &GroupSelector) -> Vec<ShapeId> {
        let (tl, br) = selector.normalized();
        let collected = self
            .scene
            .collect_objects(tl, br, !self.options.selection_fully_contained);
        if selector.is_zero_size() {
            return collected.into_iter().take(1).collect();
        }
        if collected.len() > 1 {
            return collected
                .into_iter()
                .filter(|id| !self.scene.get(*id).is_some_and(Shape::on_select))
                .rev()
                .collect();
        }
        collected
    }

    /// Turn the lasso into a selection: one shape becomes active, several
    /// become a multi-selection, none clears the selection.
    pub(crate) fn handle_selection(&mut self, e: &PointerEvent, selector: &GroupSelector) -> bool {
        profile_scope!("handle_selection");

        if !self.options.selection {
            return false;
        }
        let objects = self.lasso_objects(selector);
        tracing::debug!(count = objects.len(), click = selector.is_zero_size(), "Lasso resolved");

        let previous = self.active_objects();
        match objects.as_slice() {
            [] => {
                self.discard_active_object_inner(Some(e));
            }
            [only] => {
                self.set_active_object_inner(*only, Some(e));
            }
            _ => {
                self.discard_active_object_inner(Some(e));
                match self.scene.create_selection(&objects) {
                    Ok(selection) => {
                        self.set_active_object_inner(selection, Some(e));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to create selection from lasso")
                    }
                }
            }
        }
        self.fire_selection_events(&previous, Some(e));
        true
    }
}
