//! Drag-and-drop notifications for external payloads dragged over the
//! canvas. Hover for drags is tracked separately from pointer hover.

use super::PointerEvent;
use super::targets::SyntheticKind;
use crate::canvas::{Canvas, HoverState};
use crate::error::CanvasResult;
use crate::events::{CanvasEvent, DRAG_ENTER, DRAG_LEAVE, DRAG_OVER, DROP, DROP_BEFORE};
use crate::scene::ShapeId;

impl Canvas {
    fn drag_payload(
        &self,
        e: &PointerEvent,
        target: Option<ShapeId>,
        sub_targets: &[ShapeId],
    ) -> CanvasEvent {
        CanvasEvent {
            target,
            sub_targets: sub_targets.to_vec(),
            ..self.pointer_payload(e)
        }
    }

    /// Fire on the canvas, the target and every distinct sub-target.
    fn fire_basic(&mut self, event: &str, payload: &CanvasEvent) {
        self.fire(event, payload);
        if let Some(target) = payload.target {
            self.fire_on_shape(target, event, payload);
        }
        for sub_target in &payload.sub_targets {
            if Some(*sub_target) != payload.target {
                self.fire_on_shape(*sub_target, event, payload);
            }
        }
    }

    fn update_drag_hover(
        &mut self,
        e: &PointerEvent,
        target: Option<ShapeId>,
        sub_targets: Vec<ShapeId>,
    ) {
        let previous = std::mem::take(&mut self.drag_hover);
        let next = HoverState { target, sub_targets };
        self.diff_hover(SyntheticKind::Drag, e, &previous, &next);
        self.drag_hover = next;
    }

    pub fn on_drag_enter(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        let (target, sub_targets) = self.find_target(e);
        let payload = self.drag_payload(e, target, &sub_targets);
        self.fire(DRAG_ENTER, &payload);
        self.update_drag_hover(e, target, sub_targets);
        self.take_failures()
    }

    pub fn on_drag_over(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        let (target, sub_targets) = self.find_target(e);
        let payload = self.drag_payload(e, target, &sub_targets);
        self.fire(DRAG_OVER, &payload);
        self.update_drag_hover(e, target, sub_targets);
        if let Some(target) = payload.target {
            self.fire_on_shape(target, DRAG_OVER, &payload);
        }
        for sub_target in &payload.sub_targets {
            self.fire_on_shape(*sub_target, DRAG_OVER, &payload);
        }
        self.take_failures()
    }

    pub fn on_drag_leave(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        let previous = self.drag_hover.clone();
        let payload = self.drag_payload(e, previous.target, &previous.sub_targets);
        self.fire(DRAG_LEAVE, &payload);
        self.update_drag_hover(e, None, Vec::new());
        self.take_failures()
    }

    pub fn on_drop(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        let (target, sub_targets) = self.find_target(e);
        let payload = self.drag_payload(e, target, &sub_targets);
        self.fire_basic(DROP_BEFORE, &payload);
        self.fire_basic(DROP, &payload);
        self.drag_hover = HoverState::default();
        self.take_failures()
    }
}
