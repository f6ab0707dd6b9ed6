//! Action handlers: map a pointer sample and the live session to new
//! geometric properties on the session target.
//!
//! Handlers receive the pointer in the target's parent plane. They never
//! fail: degenerate geometry (zero-length drags, zero dimensions) leaves the
//! shape untouched and reports `false`.

use crate::config::ModifierKey;
use crate::constants::{ACTION_SKEW_X, ACTION_SKEW_Y};
use crate::geometry::{Point, rotate_point};
use crate::input::{PointerEvent, Transform};
use crate::shape::Shape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    X,
    Y,
}

/// Corner scaling keeps the aspect ratio when uniform scaling is on and the
/// modifier is not held, or the other way round.
pub fn scale_is_proportional(
    event: &PointerEvent,
    uniform_scaling: bool,
    uni_scale_key: ModifierKey,
) -> bool {
    uniform_scaling != event.modifiers.is_held(uni_scale_key)
}

pub fn scaling_is_forbidden(shape: &Shape, by: Option<ScaleAxis>, proportional: bool) -> bool {
    let lock_x = shape.lock_scaling_x;
    let lock_y = shape.lock_scaling_y;
    if lock_x && lock_y {
        return true;
    }
    match by {
        None => (lock_x || lock_y) && proportional,
        Some(ScaleAxis::X) => lock_x,
        Some(ScaleAxis::Y) => lock_y,
    }
}

/// Keeps the session origin point fixed in the parent plane while `action`
/// mutates the shape.
pub fn with_fixed_anchor(
    shape: &mut Shape,
    origin: Point,
    action: impl FnOnce(&mut Shape) -> bool,
) -> bool {
    let constraint = shape.point_by_origin(origin);
    let performed = action(shape);
    shape.set_position_by_origin(constraint, origin);
    performed
}

/// Pointer relative to the session origin, in the shape's unrotated frame,
/// with padding and the control offset removed.
pub fn local_pointer(transform: &Transform, shape: &Shape, pointer: Point) -> Point {
    let anchor = shape.point_by_origin(transform.origin);
    let mut local = rotate_point(pointer, anchor, -shape.angle) - anchor;
    let padding = shape.padding / transform.zoom;
    if local.x >= padding {
        local.x -= padding;
    } else if local.x <= -padding {
        local.x += padding;
    }
    if local.y >= padding {
        local.y -= padding;
    } else if local.y <= -padding {
        local.y += padding;
    }
    local - transform.control_offset
}

// ============================================================================
// Drag
// ============================================================================

/// Translates the target so it keeps its grab offset under the pointer.
pub fn drag_handler(
    _event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    let next = pointer - transform.offset;
    let move_x = !shape.lock_movement_x && shape.position.x != next.x;
    let move_y = !shape.lock_movement_y && shape.position.y != next.y;
    if move_x {
        shape.position.x = next.x;
    }
    if move_y {
        shape.position.y = next.y;
    }
    move_x || move_y
}

// ============================================================================
// Scaling
// ============================================================================

fn scale_object(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
    by: Option<ScaleAxis>,
) -> bool {
    let proportional =
        scale_is_proportional(event, transform.uniform_scaling, transform.uni_scale_key);
    if scaling_is_forbidden(shape, by, proportional) {
        return false;
    }

    let local = local_pointer(transform, shape, pointer);
    let dim = shape.transformed_dimensions();
    let original = &transform.original;

    let (mut scale_x, mut scale_y) = if proportional && by.is_none() {
        let distance = local.x.abs() + local.y.abs();
        let original_distance = (dim.x * original.scale_x / shape.scale_x).abs()
            + (dim.y * original.scale_y / shape.scale_y).abs();
        let ratio = distance / original_distance;
        (original.scale_x * ratio, original.scale_y * ratio)
    } else {
        (
            (local.x * shape.scale_x / dim.x).abs(),
            (local.y * shape.scale_y / dim.y).abs(),
        )
    };
    if transform.is_centered() {
        scale_x *= 2.0;
        scale_y *= 2.0;
    }

    let usable = |value: f64| value.is_finite() && value != 0.0;
    let valid = match by {
        None => usable(scale_x) && usable(scale_y),
        Some(ScaleAxis::X) => usable(scale_x),
        Some(ScaleAxis::Y) => usable(scale_y),
    };
    if !valid {
        return false;
    }

    let before = (shape.scale_x, shape.scale_y);
    match by {
        None => {
            if !shape.lock_scaling_x {
                shape.scale_x = scale_x;
            }
            if !shape.lock_scaling_y {
                shape.scale_y = scale_y;
            }
        }
        Some(ScaleAxis::X) => shape.scale_x = scale_x,
        Some(ScaleAxis::Y) => shape.scale_y = scale_y,
    }
    before != (shape.scale_x, shape.scale_y)
}

/// Corner handles: scale both axes, proportionally unless toggled off.
pub fn scaling_equally(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    with_fixed_anchor(shape, transform.origin, |shape| {
        scale_object(event, transform, shape, pointer, None)
    })
}

pub fn scaling_x(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    with_fixed_anchor(shape, transform.origin, |shape| {
        scale_object(event, transform, shape, pointer, Some(ScaleAxis::X))
    })
}

pub fn scaling_y(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    with_fixed_anchor(shape, transform.origin, |shape| {
        scale_object(event, transform, shape, pointer, Some(ScaleAxis::Y))
    })
}

/// Left/right edges: `scaleX`, or `skewY` when the session resolved to it.
pub fn scaling_x_or_skewing_y(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    if transform.action == ACTION_SKEW_Y {
        skew_handler_y(event, transform, shape, pointer)
    } else {
        scaling_x(event, transform, shape, pointer)
    }
}

/// Top/bottom edges: `scaleY`, or `skewX` when the session resolved to it.
pub fn scaling_y_or_skewing_x(
    event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    if transform.action == ACTION_SKEW_X {
        skew_handler_x(event, transform, shape, pointer)
    } else {
        scaling_y(event, transform, shape, pointer)
    }
}

// ============================================================================
// Skewing
// ============================================================================

fn skew_object(transform: &Transform, shape: &mut Shape, pointer: Point, axis: ScaleAxis) -> bool {
    let locked = match axis {
        ScaleAxis::X => shape.lock_skewing_x,
        ScaleAxis::Y => shape.lock_skewing_y,
    };
    if locked {
        return false;
    }

    let delta = rotate_point(pointer - transform.start_pointer, Point::ZERO, -shape.angle);
    // Edge being dragged, relative to the box center
    let (side, offset, scale, extent, start) = match axis {
        ScaleAxis::X => (
            transform.control_position.y.signum(),
            delta.x,
            shape.scale_x,
            shape.height,
            transform.original.skew_x,
        ),
        ScaleAxis::Y => (
            transform.control_position.x.signum(),
            delta.y,
            shape.scale_y,
            shape.width,
            transform.original.skew_y,
        ),
    };
    let span = scale * extent;
    if span == 0.0 || !span.is_finite() {
        return false;
    }
    let factor = if transform.is_centered() { 2.0 } else { 1.0 };
    let shear = start.to_radians().tan() + factor * offset * side / span;
    let skew = shear.atan().to_degrees();
    if !skew.is_finite() {
        return false;
    }

    with_fixed_anchor(shape, transform.origin, |shape| {
        let current = match axis {
            ScaleAxis::X => &mut shape.skew_x,
            ScaleAxis::Y => &mut shape.skew_y,
        };
        let changed = *current != skew;
        *current = skew;
        changed
    })
}

/// Horizontal shear driven by the top/bottom edges.
pub fn skew_handler_x(
    _event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    skew_object(transform, shape, pointer, ScaleAxis::X)
}

/// Vertical shear driven by the left/right edges.
pub fn skew_handler_y(
    _event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    skew_object(transform, shape, pointer, ScaleAxis::Y)
}

// ============================================================================
// Rotation
// ============================================================================

/// Locks `angle` onto a multiple of `snap_angle` within `threshold`
/// (defaults to `snap_angle`). The lower multiple wins a tie.
pub fn snap_angle(angle: f64, snap_angle: f64, threshold: Option<f64>) -> f64 {
    if snap_angle <= 0.0 {
        return angle;
    }
    let threshold = threshold.filter(|t| *t > 0.0).unwrap_or(snap_angle);
    let lower = (angle / snap_angle).floor() * snap_angle;
    let upper = (angle / snap_angle).ceil() * snap_angle;
    if (angle - lower).abs() < threshold {
        lower
    } else if (angle - upper).abs() < threshold {
        upper
    } else {
        angle
    }
}

pub fn rotation_with_snapping(
    _event: &PointerEvent,
    transform: &Transform,
    shape: &mut Shape,
    pointer: Point,
) -> bool {
    if shape.lock_rotation {
        return false;
    }
    let pivot = shape.point_by_origin(transform.origin);
    let start = transform.start_pointer;
    let last_angle = (start.y - pivot.y).atan2(start.x - pivot.x);
    let current_angle = (pointer.y - pivot.y).atan2(pointer.x - pivot.x);
    let raw = ((current_angle - last_angle).to_degrees() + transform.theta).rem_euclid(360.0);
    let angle = snap_angle(raw, shape.snap_angle, shape.snap_threshold);
    if !angle.is_finite() {
        return false;
    }

    with_fixed_anchor(shape, transform.origin, |shape| {
        let rotated = shape.angle != angle;
        shape.angle = angle;
        rotated
    })
}
