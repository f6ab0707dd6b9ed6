//! Pointer input handling for the canvas.
//!
//! This module implements all pointer interaction logic: hit testing, the
//! transform session, hover tracking, lasso selection, drag-and-drop and
//! free drawing.
//!
//! ## Architecture
//!
//! The input system uses an explicit state machine (`InputState`) to track
//! the current interaction mode. A live transform session only exists
//! inside `InputState::Transforming`, so two concurrent sessions cannot be
//! represented.
//!
//! ## Modules
//!
//! - `pointer` - Pointer events, modifiers and main-contact tracking
//! - `session` - The transform session record
//! - `state` - Input state machine enum and helper methods
//! - `lifecycle` - Session setup, finalize and cancel
//! - `targets` - Hit testing, hover and cursor resolution
//! - `mouse_down` - Pointer down (selection, session start, lasso start)
//! - `drag` - Pointer move (lasso, session dispatch, hover)
//! - `mouse_up` - Pointer up (finalize, lasso resolution, click detection)
//! - `drop` - Drag-and-drop notifications
//! - `transform` - Viewport transformations (wheel, zoom, pan, conversion)

pub mod coords;
mod drag;
mod drop;
mod lifecycle;
mod mouse_down;
mod mouse_up;
mod pointer;
mod session;
mod state;
mod targets;
mod transform;

pub use pointer::{Modifiers, MouseButton, PointerEvent, PointerKind, PointerRole, PointerTracker};
pub use session::{Transform, TransformInfo, TransformPhase};
pub use state::{GroupSelector, InputState};
