//! Cursor and action-name resolution for the default controls.

use super::actions::{ScaleAxis, scale_is_proportional, scaling_is_forbidden};
use super::control::{Control, ControlContext};
use crate::constants::{
    ACTION_SCALE_X, ACTION_SCALE_Y, ACTION_SKEW_X, ACTION_SKEW_Y, SCALE_CURSOR_MAP, SKEW_CURSOR_MAP,
};
use crate::input::PointerEvent;

/// Index of the 45 degree sector a control points at, in `0..=8`.
///
/// Zero is east and values grow clockwise (y points down).
pub fn find_corner_quadrant(total_angle: f64, control: &Control) -> usize {
    let corner_angle = total_angle + control.y.atan2(control.x).to_degrees() + 360.0;
    (corner_angle.rem_euclid(360.0) / 45.0).round() as usize
}

fn axis_of(control: &Control) -> Option<ScaleAxis> {
    if control.x != 0.0 && control.y == 0.0 {
        Some(ScaleAxis::X)
    } else if control.x == 0.0 && control.y != 0.0 {
        Some(ScaleAxis::Y)
    } else {
        None
    }
}

/// True when the alternate-action modifier switches edges to skewing.
pub fn is_alt_action(event: &PointerEvent, ctx: &ControlContext<'_>) -> bool {
    event.modifiers.is_held(ctx.options.alt_action_key)
}

pub fn scale_cursor_style(
    event: &PointerEvent,
    control: &Control,
    ctx: &ControlContext<'_>,
) -> String {
    let proportional =
        scale_is_proportional(event, ctx.options.uniform_scaling, ctx.options.uni_scale_key);
    if scaling_is_forbidden(ctx.shape, axis_of(control), proportional) {
        return ctx.options.not_allowed_cursor.clone();
    }
    let quadrant = find_corner_quadrant(ctx.total_angle, control);
    format!("{}-resize", SCALE_CURSOR_MAP[quadrant.min(SCALE_CURSOR_MAP.len() - 1)])
}

pub fn skew_cursor_style(
    _event: &PointerEvent,
    control: &Control,
    ctx: &ControlContext<'_>,
) -> String {
    if (control.x != 0.0 && ctx.shape.lock_skewing_y)
        || (control.y != 0.0 && ctx.shape.lock_skewing_x)
    {
        return ctx.options.not_allowed_cursor.clone();
    }
    let quadrant = find_corner_quadrant(ctx.total_angle, control) % SKEW_CURSOR_MAP.len();
    format!("{}-resize", SKEW_CURSOR_MAP[quadrant])
}

/// Edge controls: skew cursor while the alternate-action key is held.
pub fn scale_skew_cursor_style(
    event: &PointerEvent,
    control: &Control,
    ctx: &ControlContext<'_>,
) -> String {
    if is_alt_action(event, ctx) {
        skew_cursor_style(event, control, ctx)
    } else {
        scale_cursor_style(event, control, ctx)
    }
}

pub fn rotation_cursor_style(
    _event: &PointerEvent,
    control: &Control,
    ctx: &ControlContext<'_>,
) -> String {
    if ctx.shape.lock_rotation {
        ctx.options.not_allowed_cursor.clone()
    } else {
        control.cursor_style.clone()
    }
}

/// Edge controls report `scaleX`/`scaleY`, or the orthogonal skew while the
/// alternate-action key is held.
pub fn scale_or_skew_action_name(
    event: &PointerEvent,
    control: &Control,
    ctx: &ControlContext<'_>,
) -> String {
    let alternative = is_alt_action(event, ctx);
    let name = match (control.x == 0.0, control.y == 0.0, alternative) {
        (true, _, true) => ACTION_SKEW_X,
        (true, _, false) => ACTION_SCALE_Y,
        (false, true, true) => ACTION_SKEW_Y,
        (false, true, false) => ACTION_SCALE_X,
        _ => "",
    };
    name.to_string()
}
