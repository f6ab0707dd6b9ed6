//! Canvas configuration.
//!
//! Options are plain serde data so hosts can keep them in a JSON settings
//! file. Missing keys fall back to the defaults below.

use crate::constants::{
    DEFAULT_CORNER_SIZE, DEFAULT_CURSOR, DEFAULT_TOUCH_CORNER_SIZE, HOVER_CURSOR, MOVE_CURSOR,
    NOT_ALLOWED_CURSOR, TOUCH_IDLE_DEBOUNCE_MS,
};
use crate::error::CanvasResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keyboard modifier bound to an interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Shift,
    Alt,
    Ctrl,
    Meta,
    /// The interaction has no modifier
    None,
}

/// Interaction options for one canvas surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
    /// Enables multi-selection (shift-click grouping and lasso)
    pub selection: bool,
    /// Held to add/remove shapes from the selection
    pub selection_key: ModifierKey,
    /// Held to toggle proportional corner scaling
    pub uni_scale_key: ModifierKey,
    /// Held to switch edge handles from scaling to skewing
    pub alt_action_key: ModifierKey,
    /// Held to toggle scaling/rotating about the center
    pub centered_key: ModifierKey,
    /// Corner handles scale proportionally unless `uni_scale_key` is held
    pub uniform_scaling: bool,
    /// Scaling keeps the center fixed unless `centered_key` is held
    pub centered_scaling: bool,
    /// Rotation pivots on the center unless `centered_key` is held
    pub centered_rotation: bool,
    /// Lasso selects only shapes fully inside the rectangle
    pub selection_fully_contained: bool,
    /// Decide `object:modified` by comparing before/after snapshots
    pub stateful: bool,
    /// Fire mouse notifications for the secondary button
    pub fire_right_click: bool,
    /// Fire mouse notifications for the middle button
    pub fire_middle_click: bool,
    /// Disable hit testing entirely
    pub skip_target_find: bool,
    pub hover_cursor: String,
    pub move_cursor: String,
    pub default_cursor: String,
    pub not_allowed_cursor: String,
    /// Control hit box edge length in viewport pixels
    pub corner_size: f64,
    /// Control hit box edge length for touch pointers
    pub touch_corner_size: f64,
    /// Mouse events are ignored for this long after the last touch ends
    pub touch_idle_debounce_ms: u64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            selection: true,
            selection_key: ModifierKey::Shift,
            uni_scale_key: ModifierKey::Shift,
            alt_action_key: ModifierKey::Shift,
            centered_key: ModifierKey::Alt,
            uniform_scaling: true,
            centered_scaling: true,
            centered_rotation: true,
            selection_fully_contained: false,
            stateful: false,
            fire_right_click: false,
            fire_middle_click: false,
            skip_target_find: false,
            hover_cursor: HOVER_CURSOR.to_string(),
            move_cursor: MOVE_CURSOR.to_string(),
            default_cursor: DEFAULT_CURSOR.to_string(),
            not_allowed_cursor: NOT_ALLOWED_CURSOR.to_string(),
            corner_size: DEFAULT_CORNER_SIZE,
            touch_corner_size: DEFAULT_TOUCH_CORNER_SIZE,
            touch_idle_debounce_ms: TOUCH_IDLE_DEBOUNCE_MS,
        }
    }
}

impl CanvasOptions {
    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded canvas options");
        Ok(options)
    }

    pub fn to_json_string(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
