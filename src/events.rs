//! Notification fan-out.
//!
//! Every interactive entity (the canvas and each shape) owns an
//! [`Observable`]. Listeners receive a read-only [`CanvasEvent`] payload and
//! return `anyhow::Result<()>`. `fire` snapshots the listener list before
//! dispatch, so a listener may unsubscribe itself (or others) mid-dispatch,
//! and every listener registered at dispatch time runs even when an earlier
//! one fails. Failures come back aggregated in
//! [`CanvasError::Listeners`](crate::error::CanvasError::Listeners).

use crate::error::{CanvasError, CanvasResult};
use crate::geometry::Point;
use crate::input::{PointerEvent, TransformInfo};
use crate::scene::ShapeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

// ============================================================================
// Event Names
// ============================================================================

pub const MOUSE_DOWN_BEFORE: &str = "mouse:down:before";
pub const MOUSE_DOWN: &str = "mouse:down";
pub const MOUSE_MOVE_BEFORE: &str = "mouse:move:before";
pub const MOUSE_MOVE: &str = "mouse:move";
pub const MOUSE_UP_BEFORE: &str = "mouse:up:before";
pub const MOUSE_UP: &str = "mouse:up";
pub const MOUSE_OVER: &str = "mouse:over";
pub const MOUSE_OUT: &str = "mouse:out";
pub const MOUSE_DBLCLICK: &str = "mouse:dblclick";
pub const MOUSE_WHEEL: &str = "mouse:wheel";

pub const SHAPE_MOUSE_OVER: &str = "mouseover";
pub const SHAPE_MOUSE_OUT: &str = "mouseout";

pub const BEFORE_TRANSFORM: &str = "before:transform";
pub const OBJECT_MODIFIED: &str = "object:modified";
pub const OBJECT_MOVING: &str = "object:moving";
pub const OBJECT_SCALING: &str = "object:scaling";
pub const OBJECT_ROTATING: &str = "object:rotating";
pub const OBJECT_SKEWING: &str = "object:skewing";
pub const SHAPE_MODIFIED: &str = "modified";

pub const BEFORE_SELECTION_CLEARED: &str = "before:selection:cleared";
pub const SELECTION_CREATED: &str = "selection:created";
pub const SELECTION_UPDATED: &str = "selection:updated";
pub const SELECTION_CLEARED: &str = "selection:cleared";
pub const SHAPE_SELECTED: &str = "selected";
pub const SHAPE_DESELECTED: &str = "deselected";

pub const DRAG_ENTER: &str = "dragenter";
pub const DRAG_OVER: &str = "dragover";
pub const DRAG_LEAVE: &str = "dragleave";
pub const DROP_BEFORE: &str = "drop:before";
pub const DROP: &str = "drop";
pub const CANVAS_DRAG_ENTER: &str = "drag:enter";
pub const CANVAS_DRAG_LEAVE: &str = "drag:leave";

/// Shape-level name for a canvas `mouse:*` notification: `mouse:down` becomes `mousedown`.
pub fn shape_event_name(canvas_event: &str) -> String {
    match canvas_event.strip_prefix("mouse:") {
        Some(rest) => format!("mouse{rest}"),
        None => canvas_event.to_string(),
    }
}

/// Progress notification fired after a performed action, by action name.
pub fn progress_event_name(action: &str) -> Option<&'static str> {
    match action {
        "drag" => Some("moving"),
        "scale" | "scaleX" | "scaleY" => Some("scaling"),
        "rotate" => Some("rotating"),
        "skewX" | "skewY" => Some("skewing"),
        _ => None,
    }
}

// ============================================================================
// Payload
// ============================================================================

/// Payload carried by every notification.
///
/// Fields not relevant to a given notification stay at their defaults.
#[derive(Debug, Clone, Default)]
pub struct CanvasEvent {
    pub e: Option<PointerEvent>,
    pub target: Option<ShapeId>,
    /// Nested hit targets, innermost first
    pub sub_targets: Vec<ShapeId>,
    pub transform: Option<TransformInfo>,
    pub scene_point: Option<Point>,
    pub viewport_point: Option<Point>,
    pub is_click: bool,
    /// Shape under the pointer at release time (up events)
    pub current_target: Option<ShapeId>,
    /// Outgoing shape for enter notifications
    pub previous_target: Option<ShapeId>,
    /// Incoming shape for leave notifications
    pub next_target: Option<ShapeId>,
    pub selected: Vec<ShapeId>,
    pub deselected: Vec<ShapeId>,
    pub action: Option<String>,
}

// ============================================================================
// Observable
// ============================================================================

pub type Listener = Rc<dyn Fn(&CanvasEvent) -> anyhow::Result<()>>;

struct Registration {
    id: u64,
    listener: Listener,
    once: bool,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<String, Vec<Registration>>,
}

/// Pub-sub hub for one interactive entity.
#[derive(Clone, Default)]
pub struct Observable {
    inner: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.borrow();
        let counts: HashMap<&str, usize> = registry
            .listeners
            .iter()
            .map(|(name, regs)| (name.as_str(), regs.len()))
            .collect();
        f.debug_struct("Observable").field("listeners", &counts).finish()
    }
}

/// Handle returned by [`Observable::on`]; removes the listener when asked.
///
/// Dropping the handle keeps the listener registered.
#[derive(Clone)]
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    event: String,
    id: u64,
}

impl Subscription {
    /// Remove the listener. Returns false if it was already gone.
    pub fn unsubscribe(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let Some(regs) = registry.listeners.get_mut(&self.event) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|reg| reg.id != self.id);
        before != regs.len()
    }
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, event: &str, listener: Listener, once: bool) -> Subscription {
        let mut registry = self.inner.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry
            .listeners
            .entry(event.to_string())
            .or_default()
            .push(Registration { id, listener, once });
        Subscription {
            registry: Rc::downgrade(&self.inner),
            event: event.to_string(),
            id,
        }
    }

    pub fn on<F>(&self, event: &str, listener: F) -> Subscription
    where
        F: Fn(&CanvasEvent) -> anyhow::Result<()> + 'static,
    {
        self.register(event, Rc::new(listener), false)
    }

    /// Register a listener removed after its first invocation.
    pub fn once<F>(&self, event: &str, listener: F) -> Subscription
    where
        F: Fn(&CanvasEvent) -> anyhow::Result<()> + 'static,
    {
        self.register(event, Rc::new(listener), true)
    }

    /// Remove every listener for `event`.
    pub fn off(&self, event: &str) {
        self.inner.borrow_mut().listeners.remove(event);
    }

    pub fn off_all(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.borrow().listeners.get(event).map_or(0, Vec::len)
    }

    /// Dispatch `event` to a snapshot of its listeners.
    pub fn fire(&self, event: &str, payload: &CanvasEvent) -> CanvasResult<()> {
        let snapshot: Vec<Listener> = {
            let mut registry = self.inner.borrow_mut();
            let Some(regs) = registry.listeners.get_mut(event) else {
                return Ok(());
            };
            let snapshot = regs.iter().map(|reg| Rc::clone(&reg.listener)).collect();
            regs.retain(|reg| !reg.once);
            snapshot
        };

        let mut failures = Vec::new();
        for listener in snapshot {
            if let Err(err) = listener(payload) {
                tracing::warn!(event, error = %err, "Listener failed");
                failures.push(err);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CanvasError::Listeners {
                event: event.to_string(),
                failures,
            })
        }
    }
}
