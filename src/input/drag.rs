//! Pointer move handling - lasso growth, session dispatch, hover tracking.
//!
//! ## Performance Notes
//!
//! Pointer move is called for every input sample during a gesture
//! (potentially 60+ times per second). Key optimizations:
//! - The session handler is resolved once at pointer-down
//! - Hit testing only runs while idle
//! - Repaints are coalesced into one request per event
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use super::coords::CoordinateConverter;
use super::pointer::PointerRole;
use super::session::TransformPhase;
use super::{InputState, PointerEvent};
use crate::canvas::Canvas;
use crate::constants::{ACTION_DRAG, FREE_DRAWING_CURSOR};
use crate::error::CanvasResult;
use crate::events::{CanvasEvent, progress_event_name};
use crate::profile_scope;

impl Canvas {
    pub fn on_mouse_move(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        profile_scope!("on_mouse_move");

        if self.pointer_tracker.track_move(e) != PointerRole::Main {
            return Ok(());
        }

        self.is_click = false;
        self.cache_event_target(e);
        self.handle_event(e, "move:before");

        if self.drawing_mode {
            if self.input_state.is_drawing() {
                let pointer = self.scene_point(e);
                if let Some(brush) = self.brush.as_mut() {
                    brush.on_mouse_move(pointer, e);
                }
            }
            self.set_cursor(FREE_DRAWING_CURSOR);
            self.handle_event(e, "move");
            return self.take_failures();
        }

        if self.input_state.is_lasso() {
            let current = self.scene_point(e);
            self.input_state.set_lasso_current(current);
            self.render_top();
        } else if self.input_state.is_transforming() {
            self.transform_object(e);
        } else {
            let target = self.event_targets.target;
            let sub_targets = self.event_targets.sub_targets.clone();
            self.set_cursor_from_event(e, target, &sub_targets);
            self.fire_over_out_events(e, target, sub_targets);
        }

        self.handle_event(e, "move");
        self.take_failures()
    }

    /// Feed one pointer sample to the live session.
    fn transform_object(&mut self, e: &PointerEvent) {
        profile_scope!("transform_object");

        let Some(target) = self.input_state.transform_target() else {
            return;
        };
        let parent = self.scene.parent_matrix(target);
        let pointer =
            CoordinateConverter::scene_to_parent_plane(self.scene_point(e), parent.as_ref());

        let InputState::Transforming(transform) = &mut self.input_state else {
            return;
        };
        transform.modifiers = e.modifiers;
        transform.last_pointer = pointer;
        transform.phase = TransformPhase::Active;

        let Some(shape) = self.scene.get_mut(target) else {
            // Target left the scene mid-gesture
            return;
        };
        let performed = match transform.action_handler.clone() {
            Some(handler) => handler(e, transform, shape, pointer),
            None => false,
        };
        transform.action_performed |= performed;
        if !performed {
            return;
        }

        let action = transform.action.clone();
        let info = transform.info();
        let move_cursor = shape.move_cursor.clone();
        self.scene.set_coords(target);
        self.request_render_all();

        if action == ACTION_DRAG {
            let cursor = move_cursor.unwrap_or_else(|| self.options.move_cursor.clone());
            self.set_cursor(&cursor);
        }
        if let Some(progress) = progress_event_name(&action) {
            let payload = CanvasEvent {
                target: Some(target),
                transform: Some(info),
                action: Some(action.clone()),
                ..self.pointer_payload(e)
            };
            self.fire(&format!("object:{progress}"), &payload);
            self.fire_on_shape(target, progress, &payload);
        }
    }
}
