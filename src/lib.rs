//! Interactive transform and selection engine for a 2D shape canvas.
//!
//! A [`Canvas`] owns a [`Scene`] of shapes and turns raw pointer input into
//! hit testing, handle gestures (move, scale, rotate, skew), hover tracking,
//! rubber-band and multi-selection, and a stream of named notifications.
//! Rendering is left to the host: handlers only record a [`RenderRequest`].
//!
//! ```ignore
//! let mut canvas = Canvas::default();
//! let id = canvas.add(Shape::rect(100.0, 50.0).at(200.0, 200.0));
//! canvas.on("object:modified", |event| {
//!     tracing::info!(target = ?event.target, "modified");
//!     Ok(())
//! });
//! canvas.on_mouse_down(&PointerEvent::mouse(200.0, 200.0))?;
//! ```

pub mod canvas;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod perf;
pub mod scene;
mod selection;
pub mod shape;
pub mod spatial_index;

pub use canvas::{Canvas, FreeDrawingBrush, HoverState, RenderRequest};
pub use config::{CanvasOptions, ModifierKey};
pub use error::{CanvasError, CanvasResult};
pub use events::{CanvasEvent, Observable, Subscription};
pub use geometry::{AffineMatrix, Point, Rect, TransformOptions};
pub use input::{
    InputState, Modifiers, MouseButton, PointerEvent, PointerKind, Transform, TransformInfo,
    TransformPhase,
};
pub use scene::{Scene, ShapeId};
pub use shape::{Shape, ShapeKind, ShapeSnapshot};
