//! Transform session lifecycle: setup on pointer-down, finalize on
//! pointer-up, forced end on cancel.

use super::coords::CoordinateConverter;
use super::session::{Transform, TransformPhase};
use super::{InputState, PointerEvent};
use crate::canvas::Canvas;
use crate::constants::{ACTION_DRAG, ACTION_ROTATE, ACTION_SCALE, ACTION_SCALE_X, ACTION_SCALE_Y};
use crate::controls::{ActionHandler, Control, ControlContext, ControlHook, drag_handler};
use crate::error::{CanvasError, CanvasResult};
use crate::events::{BEFORE_TRANSFORM, CanvasEvent, OBJECT_MODIFIED, SHAPE_MODIFIED};
use crate::geometry::Point;
use crate::input::TransformInfo;
use crate::profile_scope;
use crate::scene::ShapeId;
use crate::shape::Shape;
use std::sync::Arc;

/// Anchor opposite to a control: a left handle pins the right edge, a top
/// handle pins the bottom edge, a centered coordinate stays centered.
pub(crate) fn origin_from_control(control: &Control) -> Point {
    let opposite = |value: f64| {
        if value < 0.0 {
            0.5
        } else if value > 0.0 {
            -0.5
        } else {
            0.0
        }
    };
    Point::new(opposite(control.x), opposite(control.y))
}

impl Canvas {
    /// Whether the session should pin the shape center instead of the
    /// opposite handle. The centered key inverts the configured behavior.
    pub(crate) fn should_center_transform(
        &self,
        shape: &Shape,
        action: &str,
        centered_key_held: bool,
    ) -> bool {
        let centered = match action {
            ACTION_SCALE | ACTION_SCALE_X | ACTION_SCALE_Y => {
                self.options.centered_scaling || shape.centered_scaling
            }
            ACTION_ROTATE => self.options.centered_rotation || shape.centered_rotation,
            _ => false,
        };
        centered != centered_key_held
    }

    /// Create the session for `target`. A handle only engages when the
    /// target was already active before this pointer-down; otherwise the
    /// gesture is a body drag.
    pub(crate) fn setup_current_transform(
        &mut self,
        e: &PointerEvent,
        target: ShapeId,
        already_selected: bool,
        handle: Option<(String, Control)>,
    ) {
        let Some(shape) = self.scene.get(target) else {
            return;
        };
        let parent = self.scene.parent_matrix(target);
        let pointer =
            CoordinateConverter::scene_to_parent_plane(self.scene_point(e), parent.as_ref());
        let engaged = handle.filter(|_| already_selected);

        let ctx = ControlContext {
            shape,
            total_angle: self.scene.total_angle(target),
            options: &self.options,
        };
        let (corner, action, action_handler, control_position, control_offset, anchor) =
            match &engaged {
                Some((key, control)) => (
                    Some(key.clone()),
                    control.get_action_name(e, &ctx),
                    control.get_action_handler(),
                    control.relative_position(),
                    Point::new(control.offset_x, control.offset_y),
                    origin_from_control(control),
                ),
                None => {
                    let handler: ActionHandler = Arc::new(drag_handler);
                    let zero = Point::ZERO;
                    (None, ACTION_DRAG.to_string(), Some(handler), zero, zero, zero)
                }
            };
        let centered_key_held = e.modifiers.is_held(self.options.centered_key);
        let origin = if self.should_center_transform(shape, &action, centered_key_held) {
            Point::ZERO
        } else {
            anchor
        };

        let transform = Transform {
            target,
            corner,
            action,
            action_handler,
            phase: TransformPhase::Armed,
            start_pointer: pointer,
            last_pointer: pointer,
            offset: pointer - shape.position,
            origin,
            control_position,
            control_offset,
            original: shape.snapshot(),
            theta: shape.angle,
            action_performed: false,
            modifiers: e.modifiers,
            uniform_scaling: self.options.uniform_scaling,
            uni_scale_key: self.options.uni_scale_key,
            zoom: self.scene.zoom(),
        };
        tracing::debug!(
            shape_id = target,
            action = %transform.action,
            corner = ?transform.corner,
            "Transform session started"
        );
        let info = transform.info();
        self.input_state = InputState::Transforming(Box::new(transform));

        let payload = CanvasEvent {
            target: Some(target),
            transform: Some(info.clone()),
            ..self.pointer_payload(e)
        };
        self.fire(BEFORE_TRANSFORM, &payload);

        if let Some((key, control)) = engaged {
            if let Some(hook) = control.get_mouse_down_handler() {
                let label = format!("{key}:mousedown");
                self.run_control_hook(&hook, &info, self.scene_point(e), &label);
            }
        }
    }

    /// Run a control hook, keeping its failure for the end of the handler.
    pub(crate) fn run_control_hook(
        &mut self,
        hook: &ControlHook,
        info: &TransformInfo,
        pointer: Point,
        label: &str,
    ) {
        if let Err(err) = hook(info, pointer) {
            tracing::warn!(hook = label, error = %err, "Control hook failed");
            self.pending_failures.push(CanvasError::Listeners {
                event: label.to_string(),
                failures: vec![err],
            });
        }
    }

    /// Consume the live session. Runs the engaged control's mouse-up hook,
    /// refreshes the target's coordinates and fires `object:modified` when
    /// the gesture changed something. Returns whether an action was performed.
    pub(crate) fn finalize_current_transform(&mut self, e: &PointerEvent) -> bool {
        if !self.input_state.is_transforming() {
            return false;
        }
        let InputState::Transforming(mut transform) = self.input_state.take() else {
            return false;
        };
        transform.phase = TransformPhase::Finalizing;
        let target = transform.target;
        let info = transform.info();

        let hook = transform
            .corner
            .as_deref()
            .and_then(|key| self.scene.get(target)?.control(key)?.get_mouse_up_handler());
        if let Some(hook) = hook {
            let label = format!("{}:mouseup", transform.corner.as_deref().unwrap_or_default());
            self.run_control_hook(&hook, &info, self.scene_point(e), &label);
        }

        let Some(shape) = self.scene.get(target) else {
            tracing::debug!(shape_id = target, "Transform target vanished before finalize");
            return false;
        };
        let changed = shape.snapshot() != transform.original;
        self.scene.set_coords(target);

        let modified = transform.action_performed || (self.options.stateful && changed);
        if modified {
            let payload = CanvasEvent {
                target: Some(target),
                transform: Some(info),
                action: Some(transform.action.clone()),
                ..self.pointer_payload(e)
            };
            self.fire(OBJECT_MODIFIED, &payload);
            self.fire_on_shape(target, SHAPE_MODIFIED, &payload);
        }
        tracing::debug!(
            shape_id = target,
            action = %transform.action,
            performed = transform.action_performed,
            modified,
            "Transform session finalized"
        );
        transform.action_performed
    }

    /// Finalize and drop the live session, if any.
    pub fn end_current_transform(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        if self.finalize_current_transform(e) {
            self.request_render_all();
        }
        self.take_failures()
    }

    /// Lost pointer capture, blur or a platform cancel: finish whatever is
    /// in progress so no stale state survives.
    pub fn on_pointer_cancel(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        profile_scope!("on_pointer_cancel");

        let performed = self.finalize_current_transform(e);
        if self.input_state.is_lasso() {
            tracing::trace!("Lasso dropped by cancel");
        }
        self.input_state.reset();
        self.pointer_tracker.cancel(e.timestamp_ms);
        self.is_click = false;
        self.reset_cursor();
        if performed {
            self.request_render_all();
        } else {
            self.render_top();
        }
        self.take_failures()
    }
}
