//! Input state machine - one explicit state per surface.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Transforming   (pointer down on the active shape's body or handle)
//! Idle -> Lasso          (pointer down on empty or non-selectable space)
//! Idle -> Drawing        (pointer down in free-drawing mode)
//!
//! Any -> Idle            (pointer up or cancel - finalizes the operation)
//! ```

use super::session::Transform;
use crate::geometry::{Point, Rect};
use crate::scene::ShapeId;

/// Rubber-band rectangle, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSelector {
    pub start: Point,
    /// Live width/height relative to `start`; may be negative
    pub delta: Point,
}

impl GroupSelector {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            delta: Point::ZERO,
        }
    }

    /// Top-left and bottom-right corners.
    pub fn normalized(&self) -> (Point, Point) {
        let end = self.start + self.delta;
        (self.start.min(end), self.start.max(end))
    }

    pub fn bounds(&self) -> Rect {
        let (tl, br) = self.normalized();
        Rect::from_points([tl, br])
    }

    pub fn is_zero_size(&self) -> bool {
        self.delta.x == 0.0 && self.delta.y == 0.0
    }
}

/// Unified input state for pointer interactions.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No active input operation
    #[default]
    Idle,

    /// A transform session owns the pointer
    Transforming(Box<Transform>),

    /// Rubber-band selection in progress
    Lasso(GroupSelector),

    /// Pointer forwarded to the free-drawing brush
    Drawing,
}

impl InputState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_transforming(&self) -> bool {
        matches!(self, Self::Transforming(_))
    }

    pub fn is_lasso(&self) -> bool {
        matches!(self, Self::Lasso(_))
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing)
    }

    pub fn transform(&self) -> Option<&Transform> {
        match self {
            Self::Transforming(transform) => Some(transform),
            _ => None,
        }
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        match self {
            Self::Transforming(transform) => Some(transform),
            _ => None,
        }
    }

    /// Target of the live session, if any
    pub fn transform_target(&self) -> Option<ShapeId> {
        self.transform().map(|transform| transform.target)
    }

    pub fn group_selector(&self) -> Option<&GroupSelector> {
        match self {
            Self::Lasso(selector) => Some(selector),
            _ => None,
        }
    }

    pub fn start_lasso(&mut self, start: Point) {
        *self = Self::Lasso(GroupSelector::new(start));
    }

    pub fn set_lasso_current(&mut self, current: Point) {
        if let Self::Lasso(selector) = self {
            selector.delta = current - selector.start;
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
