//! Pointer up handling - finalize the session, resolve the lasso, classify
//! click versus drag.

use super::pointer::PointerRole;
use super::{InputState, PointerEvent};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::profile_scope;

impl Canvas {
    pub fn on_mouse_up(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        profile_scope!("on_mouse_up");

        if self.pointer_tracker.track_up(e) != PointerRole::Main {
            return Ok(());
        }

        self.cache_event_target(e);
        self.handle_event(e, "up:before");

        if !e.is_main_button() {
            if self.fires_for_button(e.button) {
                self.handle_event(e, "up");
            }
            return self.take_failures();
        }

        if self.drawing_mode {
            self.on_mouse_up_in_drawing_mode(e);
            return self.take_failures();
        }

        self.handle_pointer_up(e);
        self.take_failures()
    }

    fn on_mouse_up_in_drawing_mode(&mut self, e: &PointerEvent) {
        let pointer = self.scene_point(e);
        let keep_drawing = self.input_state.is_drawing()
            && self.brush.as_mut().is_some_and(|brush| brush.on_mouse_up(pointer, e));
        if !keep_drawing {
            self.input_state.reset();
        }
        self.handle_event(e, "up");
    }

    fn handle_pointer_up(&mut self, e: &PointerEvent) {
        let target = self.event_targets.target;
        let mut should_render = false;

        if self.input_state.is_transforming() {
            should_render = self.finalize_current_transform(e);
        }

        if let InputState::Lasso(selector) = self.input_state.take() {
            self.is_click = selector.is_zero_size();
            let target_was_active = target.is_some() && target == self.active_object;
            self.handle_selection(e, &selector);
            if !should_render {
                should_render = self.should_render(target)
                    || (!target_was_active && target == self.active_object);
            }
        }

        let sub_targets = self.event_targets.sub_targets.clone();
        self.set_cursor_from_event(e, target, &sub_targets);
        self.handle_event(e, "up");
        self.input_state.reset();

        if should_render {
            self.request_render_all();
        } else if !self.is_click {
            self.render_top();
        }
    }

    pub fn on_double_click(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        self.cache_event_target(e);
        self.handle_event(e, "dblclick");
        self.take_failures()
    }
}
