//! The live transform session.
//!
//! A session is created on pointer-down over an engaged handle (or a body
//! drag), fed every pointer-move, and consumed on pointer-up or cancel. The
//! action handler is resolved once at creation and never re-resolved.

use crate::config::ModifierKey;
use crate::controls::ActionHandler;
use crate::geometry::Point;
use crate::input::Modifiers;
use crate::scene::ShapeId;
use crate::shape::ShapeSnapshot;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransformPhase {
    /// Created on pointer-down, no move seen yet
    Armed,
    Active,
    Finalizing,
}

#[derive(Clone)]
pub struct Transform {
    pub target: ShapeId,
    /// Engaged control key; `None` for a body drag
    pub corner: Option<String>,
    pub action: String,
    pub action_handler: Option<ActionHandler>,
    pub phase: TransformPhase,
    /// Pointer at pointer-down, in the target's parent plane
    pub start_pointer: Point,
    pub last_pointer: Point,
    /// Grab offset: start pointer minus the target position
    pub offset: Point,
    /// Box-relative anchor kept fixed by the action, `(0, 0)` for center
    pub origin: Point,
    /// Relative position of the engaged control
    pub control_position: Point,
    pub control_offset: Point,
    pub original: ShapeSnapshot,
    /// Target angle at session start, degrees
    pub theta: f64,
    pub action_performed: bool,
    pub modifiers: Modifiers,
    pub uniform_scaling: bool,
    pub uni_scale_key: ModifierKey,
    pub zoom: f64,
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("target", &self.target)
            .field("corner", &self.corner)
            .field("action", &self.action)
            .field("phase", &self.phase)
            .field("origin", &self.origin)
            .field("action_performed", &self.action_performed)
            .finish_non_exhaustive()
    }
}

impl Transform {
    pub fn is_centered(&self) -> bool {
        self.origin == Point::ZERO
    }

    /// Read-only view handed to listeners and control hooks.
    pub fn info(&self) -> TransformInfo {
        TransformInfo {
            target: self.target,
            corner: self.corner.clone(),
            action: self.action.clone(),
            phase: self.phase,
            original: self.original,
            origin: self.origin,
            action_performed: self.action_performed,
            modifiers: self.modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformInfo {
    pub target: ShapeId,
    pub corner: Option<String>,
    pub action: String,
    pub phase: TransformPhase,
    pub original: ShapeSnapshot,
    pub origin: Point,
    pub action_performed: bool,
    #[serde(skip)]
    pub modifiers: Modifiers,
}
