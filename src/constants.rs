//! Engine-wide constants.
//!
//! Centralizes magic numbers and cursor names to make the codebase
//! more maintainable and self-documenting.

// ============================================================================
// Control Layout
// ============================================================================

/// Edge length of a control hit box in viewport pixels
pub const DEFAULT_CORNER_SIZE: f64 = 13.0;

/// Edge length of a control hit box for touch pointers
pub const DEFAULT_TOUCH_CORNER_SIZE: f64 = 24.0;

/// Distance of the rotation handle above the top edge, in viewport pixels
pub const ROTATION_HANDLE_OFFSET: f64 = -40.0;

// ============================================================================
// Shape Defaults
// ============================================================================

/// Default width/height for new shapes
pub const DEFAULT_SHAPE_SIZE: (f64, f64) = (100.0, 100.0);

/// Type tags used to look up control sets
pub const RECT_TYPE: &str = "rect";
pub const ELLIPSE_TYPE: &str = "ellipse";
pub const GROUP_TYPE: &str = "group";
pub const ACTIVE_SELECTION_TYPE: &str = "activeSelection";

// ============================================================================
// Cursors
// ============================================================================

pub const DEFAULT_CURSOR: &str = "default";
pub const HOVER_CURSOR: &str = "move";
pub const MOVE_CURSOR: &str = "move";
pub const NOT_ALLOWED_CURSOR: &str = "not-allowed";
pub const ROTATION_CURSOR: &str = "crosshair";
pub const FREE_DRAWING_CURSOR: &str = "crosshair";

/// Compass directions for scale cursors, indexed by 45 degree quadrant.
/// The last entry repeats the first so a rounded 360 maps back to east.
pub const SCALE_CURSOR_MAP: [&str; 9] = ["e", "se", "s", "sw", "w", "nw", "n", "ne", "e"];

/// Axis names for skew cursors, indexed by quadrant modulo 4
pub const SKEW_CURSOR_MAP: [&str; 4] = ["ns", "nesw", "ew", "nwse"];

// ============================================================================
// Timing
// ============================================================================

/// Mouse events are ignored for this long after the last touch ends
pub const TOUCH_IDLE_DEBOUNCE_MS: u64 = 400;

// ============================================================================
// Action Names
// ============================================================================

pub const ACTION_DRAG: &str = "drag";
pub const ACTION_SCALE: &str = "scale";
pub const ACTION_SCALE_X: &str = "scaleX";
pub const ACTION_SCALE_Y: &str = "scaleY";
pub const ACTION_SKEW_X: &str = "skewX";
pub const ACTION_SKEW_Y: &str = "skewY";
pub const ACTION_ROTATE: &str = "rotate";
