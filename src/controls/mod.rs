//! Shape handles and the gestures they start.
//!
//! ## Modules
//!
//! - `control` - one handle: position rule, visibility, pluggable hooks
//! - `registry` - control sets shared per type tag
//! - `cursor` - cursor and action-name resolution
//! - `actions` - action handlers applied on every pointer sample

pub mod actions;
pub mod control;
pub mod cursor;
pub mod registry;

pub use actions::{
    ScaleAxis, drag_handler, rotation_with_snapping, scale_is_proportional, scaling_equally,
    scaling_is_forbidden, scaling_x, scaling_x_or_skewing_y, scaling_y, scaling_y_or_skewing_x,
    skew_handler_x, skew_handler_y, snap_angle,
};
pub use control::{
    ActionHandler, Control, ControlContext, ControlCoords, ControlHook, ControlResolver,
};
pub use cursor::{
    find_corner_quadrant, scale_cursor_style, scale_skew_cursor_style, skew_cursor_style,
};
pub use registry::{ControlSet, controls_for, default_controls, register, unregister};
