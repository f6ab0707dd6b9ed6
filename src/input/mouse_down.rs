//! Pointer down handling - selection, session start, lasso start, drawing.
//!
//! ## Performance Notes
//!
//! Pointer down runs a full hit test: R-tree broad phase over the stack,
//! then polygon tests topmost-first. Enable profiling with
//! `cargo build --features profiling` to see timing.

use super::pointer::PointerRole;
use super::{InputState, MouseButton, PointerEvent};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::profile_scope;

impl Canvas {
    pub fn on_mouse_down(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        profile_scope!("on_mouse_down");

        match self.pointer_tracker.track_down(e) {
            PointerRole::Main => {}
            PointerRole::Secondary => {
                // An extra finger ends any gesture in progress
                if self.input_state.is_transforming() {
                    tracing::debug!(pointer_id = e.pointer_id, "Secondary touch cancels transform");
                    self.end_current_transform(e)?;
                }
                return Ok(());
            }
            PointerRole::Suppressed => return Ok(()),
        }

        // At most one session per surface: ignore downs until it ends
        if self.input_state.is_transforming() {
            return Ok(());
        }

        self.is_click = true;
        self.cache_event_target(e);
        self.handle_event(e, "down:before");

        if !e.is_main_button() {
            if self.fires_for_button(e.button) {
                self.handle_event(e, "down");
            }
            return self.take_failures();
        }

        if self.drawing_mode {
            self.on_mouse_down_in_drawing_mode(e);
            return self.take_failures();
        }

        self.handle_pointer_down(e);
        self.take_failures()
    }

    pub(crate) fn fires_for_button(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Main => true,
            MouseButton::Middle => self.options.fire_middle_click,
            MouseButton::Secondary => self.options.fire_right_click,
        }
    }

    fn on_mouse_down_in_drawing_mode(&mut self, e: &PointerEvent) {
        self.input_state = InputState::Drawing;
        if self.active_object.is_some() {
            self.deselect_all(Some(e));
            self.request_render_all();
        }
        let pointer = self.scene_point(e);
        if let Some(brush) = self.brush.as_mut() {
            brush.on_mouse_down(pointer, e);
        }
        self.handle_event(e, "down");
    }

    fn handle_pointer_down(&mut self, e: &PointerEvent) {
        let mut target = self.event_targets.target;
        let mut should_render = self.should_render(target);
        let mut grouped = false;

        if self.handle_multi_selection(e, target) {
            // The active shape may have changed while grouping
            target = self.active_object;
            grouped = true;
            should_render = true;
        } else if self.should_clear_selection(e, target) {
            self.deselect_all(Some(e));
        }

        let target_shape = target.and_then(|id| self.scene.get(id));
        let starts_lasso = match target_shape {
            None => true,
            Some(shape) => !shape.selectable && target != self.active_object,
        };
        if self.options.selection && starts_lasso {
            let start = self.scene_point(e);
            self.input_state.start_lasso(start);
            tracing::trace!(x = start.x, y = start.y, "Lasso started");
        }

        if let Some(target) = target {
            let already_selected = Some(target) == self.active_object;
            if self.scene.get(target).is_some_and(|shape| shape.selectable) {
                self.select_object(target, Some(e));
            }
            let handle = self.active_control_at(target, e);
            if Some(target) == self.active_object && (handle.is_some() || !grouped) {
                self.setup_current_transform(e, target, already_selected, handle);
            }
        }

        self.handle_event(e, "down");
        if should_render {
            self.request_render_all();
        }
    }
}
