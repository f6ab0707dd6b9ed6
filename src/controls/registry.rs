//! Control sets shared between shapes of the same type.
//!
//! A set is immutable once built. Shapes hold an `Arc` to the set of their
//! type tag; customizing a type means registering a modified copy, and
//! per-shape visibility overrides live on the shape itself.

use super::actions::{
    rotation_with_snapping, scaling_equally, scaling_x_or_skewing_y, scaling_y_or_skewing_x,
};
use super::control::{ActionHandler, Control, ControlResolver};
use super::cursor::{
    rotation_cursor_style, scale_cursor_style, scale_or_skew_action_name, scale_skew_cursor_style,
};
use crate::constants::{
    ACTION_ROTATE, ACTION_SCALE, ACTION_SCALE_X, ACTION_SCALE_Y, ROTATION_CURSOR,
    ROTATION_HANDLE_OFFSET,
};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered mapping from control key to control. Hit testing walks it in
/// reverse, so later entries win overlaps.
#[derive(Debug, Clone, Default)]
pub struct ControlSet {
    controls: Vec<(String, Control)>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|(k, _)| k == key).map(|(_, control)| control)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Control)> {
        self.controls.iter().map(|(key, control)| (key.as_str(), control))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Copy of this set with `key` replaced (or appended).
    pub fn with_control(&self, key: &str, control: Control) -> Self {
        let mut copy = self.clone();
        match copy.controls.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = control,
            None => copy.controls.push((key.to_string(), control)),
        }
        copy
    }

    /// Copy of this set without `key`.
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.controls.retain(|(k, _)| k != key);
        copy
    }
}

fn resolver(
    f: fn(&crate::input::PointerEvent, &Control, &super::ControlContext<'_>) -> String,
) -> ControlResolver {
    Arc::new(f)
}

fn edge(x: f64, y: f64, name: &str, handler: ActionHandler) -> Control {
    Control::new(x, y)
        .with_action(name, handler)
        .with_cursor_style_handler(resolver(scale_skew_cursor_style))
        .with_action_name_resolver(resolver(scale_or_skew_action_name))
}

fn corner(x: f64, y: f64) -> Control {
    Control::new(x, y)
        .with_action(ACTION_SCALE, Arc::new(scaling_equally))
        .with_cursor_style_handler(resolver(scale_cursor_style))
}

/// Eight scale/skew handles plus the rotation handle above the top edge.
pub fn default_controls() -> ControlSet {
    let x_or_skew_y: ActionHandler = Arc::new(scaling_x_or_skewing_y);
    let y_or_skew_x: ActionHandler = Arc::new(scaling_y_or_skewing_x);
    ControlSet {
        controls: vec![
            ("ml".to_string(), edge(-0.5, 0.0, ACTION_SCALE_X, Arc::clone(&x_or_skew_y))),
            ("mr".to_string(), edge(0.5, 0.0, ACTION_SCALE_X, x_or_skew_y)),
            ("mb".to_string(), edge(0.0, 0.5, ACTION_SCALE_Y, Arc::clone(&y_or_skew_x))),
            ("mt".to_string(), edge(0.0, -0.5, ACTION_SCALE_Y, y_or_skew_x)),
            ("tl".to_string(), corner(-0.5, -0.5)),
            ("tr".to_string(), corner(0.5, -0.5)),
            ("bl".to_string(), corner(-0.5, 0.5)),
            ("br".to_string(), corner(0.5, 0.5)),
            (
                "mtr".to_string(),
                Control::new(0.0, -0.5)
                    .with_offset(0.0, ROTATION_HANDLE_OFFSET)
                    .with_action(ACTION_ROTATE, Arc::new(rotation_with_snapping))
                    .with_cursor_style(ROTATION_CURSOR)
                    .with_cursor_style_handler(resolver(rotation_cursor_style))
                    .with_connection(),
            ),
        ],
    }
}

static DEFAULT_SET: Lazy<Arc<ControlSet>> = Lazy::new(|| Arc::new(default_controls()));

static REGISTRY: Lazy<RwLock<HashMap<String, Arc<ControlSet>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Control set for a type tag; types without a registration share the default set.
pub fn controls_for(type_tag: &str) -> Arc<ControlSet> {
    REGISTRY
        .read()
        .get(type_tag)
        .cloned()
        .unwrap_or_else(|| Arc::clone(&DEFAULT_SET))
}

/// Replace the set used by newly created shapes of `type_tag`.
pub fn register(type_tag: &str, set: ControlSet) {
    tracing::debug!(type_tag, controls = set.len(), "Registered control set");
    REGISTRY.write().insert(type_tag.to_string(), Arc::new(set));
}

/// Drop a type's registration so it falls back to the default set.
pub fn unregister(type_tag: &str) -> bool {
    REGISTRY.write().remove(type_tag).is_some()
}
