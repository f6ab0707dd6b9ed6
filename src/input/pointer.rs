//! Pointer events and main-contact tracking.
//!
//! Mouse, pen and touch input arrive as one [`PointerEvent`] type. The
//! [`PointerTracker`] picks a single main contact per surface: the first
//! touch that lands while no other touch is down. Extra touches are
//! secondary, and mouse events synthesized by the platform shortly after a
//! touch are suppressed.

use crate::config::ModifierKey;
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Main,
    Middle,
    Secondary,
}

/// Modifier keys held while the event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn is_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Alt => self.alt,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Meta => self.meta,
            ModifierKey::None => false,
        }
    }
}

/// One pointer sample, positioned in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pointer_id: u32,
    /// Platform primary flag; when absent the tracker decides
    pub is_primary: Option<bool>,
    pub button: MouseButton,
    pub point: Point,
    pub modifiers: Modifiers,
    pub timestamp_ms: u64,
    /// Wheel delta
    pub delta: Point,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Mouse,
            pointer_id: 1,
            is_primary: Some(true),
            button: MouseButton::Main,
            point: Point::new(x, y),
            modifiers: Modifiers::default(),
            timestamp_ms: 0,
            delta: Point::ZERO,
        }
    }

    pub fn touch(pointer_id: u32, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Touch,
            pointer_id,
            is_primary: None,
            ..Self::mouse(x, y)
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn at_time(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }

    pub fn with_delta(mut self, dx: f64, dy: f64) -> Self {
        self.delta = Point::new(dx, dy);
        self
    }

    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }

    pub fn is_main_button(&self) -> bool {
        self.button == MouseButton::Main
    }
}

/// How the state machine should treat a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRole {
    Main,
    /// Extra touch contact; never drives a gesture
    Secondary,
    /// Compatibility mouse event following a touch
    Suppressed,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    main_touch_id: Option<u32>,
    last_touch_end_ms: Option<u64>,
    debounce_ms: u64,
}

impl PointerTracker {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            main_touch_id: None,
            last_touch_end_ms: None,
            debounce_ms,
        }
    }

    pub fn main_touch_id(&self) -> Option<u32> {
        self.main_touch_id
    }

    fn classify(&self, event: &PointerEvent) -> PointerRole {
        if event.kind != PointerKind::Touch {
            let touch_active = self.main_touch_id.is_some();
            let within_debounce = self
                .last_touch_end_ms
                .is_some_and(|end| event.timestamp_ms.saturating_sub(end) < self.debounce_ms);
            return if touch_active || within_debounce {
                PointerRole::Suppressed
            } else {
                PointerRole::Main
            };
        }
        let is_main = match event.is_primary {
            Some(primary) => primary,
            None => self.main_touch_id.is_none_or(|id| id == event.pointer_id),
        };
        if is_main {
            PointerRole::Main
        } else {
            PointerRole::Secondary
        }
    }

    pub fn track_down(&mut self, event: &PointerEvent) -> PointerRole {
        let role = self.classify(event);
        if event.is_touch() && role == PointerRole::Main {
            self.main_touch_id = Some(event.pointer_id);
        }
        role
    }

    pub fn track_move(&self, event: &PointerEvent) -> PointerRole {
        self.classify(event)
    }

    pub fn track_up(&mut self, event: &PointerEvent) -> PointerRole {
        let role = self.classify(event);
        if event.is_touch() && role == PointerRole::Main {
            self.main_touch_id = None;
            self.last_touch_end_ms = Some(event.timestamp_ms);
        }
        role
    }

    /// Forget the main contact (blur, lost capture).
    pub fn cancel(&mut self, timestamp_ms: u64) {
        if self.main_touch_id.take().is_some() {
            self.last_touch_end_ms = Some(timestamp_ms);
        }
    }
}
