//! Hit testing, hover tracking and cursor resolution.

use super::PointerEvent;
use crate::canvas::{Canvas, HoverState};
use crate::constants::DEFAULT_CURSOR;
use crate::controls::{Control, ControlContext};
use crate::events::{
    CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE, CanvasEvent, DRAG_ENTER, DRAG_LEAVE, MOUSE_OUT,
    MOUSE_OVER, SHAPE_MOUSE_OUT, SHAPE_MOUSE_OVER, shape_event_name,
};
use crate::profile_scope;
use crate::scene::ShapeId;

/// Which family of synthetic enter/leave notifications to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SyntheticKind {
    Mouse,
    Drag,
}

impl SyntheticKind {
    /// Canvas in, canvas out, shape in, shape out
    fn names(self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Mouse => (MOUSE_OVER, MOUSE_OUT, SHAPE_MOUSE_OVER, SHAPE_MOUSE_OUT),
            Self::Drag => (CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE, DRAG_ENTER, DRAG_LEAVE),
        }
    }
}

impl Canvas {
    /// Shape under the pointer and its nested sub-targets (innermost first).
    ///
    /// The active shape wins when the pointer is over one of its controls or
    /// inside it; otherwise the stack is searched topmost-first.
    pub fn find_target(&self, e: &PointerEvent) -> (Option<ShapeId>, Vec<ShapeId>) {
        profile_scope!("find_target");

        if self.options.skip_target_find {
            return (None, Vec::new());
        }
        let scene_point = self.scene_point(e);
        if let Some(active) = self.active_object {
            if self.active_control_at(active, e).is_some() {
                return (Some(active), Vec::new());
            }
            if self.active_objects().len() > 1 && self.scene.check_target(active, scene_point) {
                return (Some(active), Vec::new());
            }
            let (hit, sub_targets) = self.scene.search_possible_targets(&[active], scene_point);
            if hit == Some(active) {
                return (hit, sub_targets);
            }
        }
        self.scene.find_top_level_target(scene_point)
    }

    /// Control of the active shape under the pointer. Controls of inactive
    /// shapes are never hit.
    pub(crate) fn active_control_at(
        &self,
        id: ShapeId,
        e: &PointerEvent,
    ) -> Option<(String, Control)> {
        if self.active_object != Some(id) {
            return None;
        }
        let shape = self.scene.get(id)?;
        shape
            .find_control(e.point, e.is_touch())
            .map(|(key, control)| (key.to_string(), control.clone()))
    }

    /// Resolve the target for the event being handled: the session target
    /// while a session is live, a fresh hit test otherwise.
    pub(crate) fn cache_event_target(&mut self, e: &PointerEvent) {
        let (target, sub_targets) = match self.input_state.transform_target() {
            Some(target) => (Some(target), Vec::new()),
            None => self.find_target(e),
        };
        self.event_targets.target = target;
        self.event_targets.sub_targets = sub_targets;
    }

    /// Fire `mouse:<kind>` on the canvas and `mouse<kind>` on the target and
    /// every distinct sub-target.
    pub(crate) fn handle_event(&mut self, e: &PointerEvent, kind: &str) {
        let target = self.event_targets.target;
        let sub_targets = self.event_targets.sub_targets.clone();
        let mut payload = CanvasEvent {
            target,
            sub_targets: sub_targets.clone(),
            transform: self.input_state.transform().map(|transform| transform.info()),
            ..self.pointer_payload(e)
        };
        if kind.starts_with("up") {
            payload.is_click = self.is_click;
            payload.current_target = self.find_target(e).0;
        }

        let canvas_event = format!("mouse:{kind}");
        let shape_event = shape_event_name(&canvas_event);
        self.fire(&canvas_event, &payload);
        if let Some(target) = target {
            self.fire_on_shape(target, &shape_event, &payload);
        }
        for sub_target in sub_targets {
            if Some(sub_target) != target {
                self.fire_on_shape(sub_target, &shape_event, &payload);
            }
        }
    }

    /// Apply the hover or control cursor for the shape under the pointer.
    pub(crate) fn set_cursor_from_event(
        &mut self,
        e: &PointerEvent,
        target: Option<ShapeId>,
        sub_targets: &[ShapeId],
    ) {
        let Some(shape) = target.and_then(|id| self.scene.get(id)) else {
            let cursor = if self.options.default_cursor.is_empty() {
                DEFAULT_CURSOR.to_string()
            } else {
                self.options.default_cursor.clone()
            };
            self.set_cursor(&cursor);
            return;
        };
        let mut hover_cursor =
            shape.hover_cursor.clone().unwrap_or_else(|| self.options.hover_cursor.clone());

        let selection = self.active_selection();
        let in_selection = selection.is_some() && shape.group == selection;
        let corner = if in_selection {
            None
        } else {
            self.active_control_at(shape.id(), e)
        };

        let cursor = match corner {
            Some((_, control)) => {
                let ctx = ControlContext {
                    shape,
                    total_angle: self.scene.total_angle(shape.id()),
                    options: &self.options,
                };
                control.cursor_style(e, &ctx)
            }
            None => {
                if shape.sub_target_check {
                    for sub_target in sub_targets.iter().rev() {
                        let cursor =
                            self.scene.get(*sub_target).and_then(|s| s.hover_cursor.clone());
                        if let Some(cursor) = cursor {
                            hover_cursor = cursor;
                        }
                    }
                }
                hover_cursor
            }
        };
        self.set_cursor(&cursor);
    }

    /// Emit enter/leave notifications for one slot of the hover list when
    /// its identity changed.
    pub(crate) fn fire_synthetic_in_out(
        &mut self,
        kind: SyntheticKind,
        e: &PointerEvent,
        target: Option<ShapeId>,
        old_target: Option<ShapeId>,
        fire_canvas: bool,
    ) {
        if target == old_target {
            return;
        }
        let (canvas_in, canvas_out, shape_in, shape_out) = kind.names();
        if let Some(old) = old_target {
            let payload = CanvasEvent {
                target: Some(old),
                next_target: target,
                ..self.pointer_payload(e)
            };
            if fire_canvas {
                self.fire(canvas_out, &payload);
            }
            self.fire_on_shape(old, shape_out, &payload);
        }
        if let Some(new) = target {
            let payload = CanvasEvent {
                target: Some(new),
                previous_target: old_target,
                ..self.pointer_payload(e)
            };
            if fire_canvas {
                self.fire(canvas_in, &payload);
            }
            self.fire_on_shape(new, shape_in, &payload);
        }
    }

    /// Diff `next` against a previous hover list slot by slot, firing
    /// enter/leave only for slots whose identity changed.
    pub(crate) fn diff_hover(
        &mut self,
        kind: SyntheticKind,
        e: &PointerEvent,
        previous: &HoverState,
        next: &HoverState,
    ) {
        self.fire_synthetic_in_out(kind, e, next.target, previous.target, true);
        let slots = previous.sub_targets.len().max(next.sub_targets.len());
        for slot in 0..slots {
            self.fire_synthetic_in_out(
                kind,
                e,
                next.sub_targets.get(slot).copied(),
                previous.sub_targets.get(slot).copied(),
                false,
            );
        }
    }

    pub(crate) fn fire_over_out_events(
        &mut self,
        e: &PointerEvent,
        target: Option<ShapeId>,
        sub_targets: Vec<ShapeId>,
    ) {
        let previous = std::mem::take(&mut self.hover);
        let next = HoverState { target, sub_targets };
        self.diff_hover(SyntheticKind::Mouse, e, &previous, &next);
        self.hover = next;
    }
}
