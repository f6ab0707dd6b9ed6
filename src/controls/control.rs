//! A single interactive handle on a shape's bounding box.

use crate::config::CanvasOptions;
use crate::geometry::{AffineMatrix, Point};
use crate::input::{PointerEvent, Transform, TransformInfo};
use crate::shape::Shape;
use std::fmt;
use std::sync::Arc;

/// Mutates the session target for one pointer sample. Returns whether
/// anything changed.
pub type ActionHandler =
    Arc<dyn Fn(&PointerEvent, &Transform, &mut Shape, Point) -> bool + Send + Sync>;

/// Runs when a gesture engages (mouse down) or releases (mouse up) a control.
/// Receives the session and the scene-space pointer.
pub type ControlHook = Arc<dyn Fn(&TransformInfo, Point) -> anyhow::Result<()> + Send + Sync>;

/// Resolves a cursor name or an action name for a control under the pointer.
pub type ControlResolver =
    Arc<dyn Fn(&PointerEvent, &Control, &ControlContext<'_>) -> String + Send + Sync>;

/// What a resolver may inspect besides the pointer event.
pub struct ControlContext<'a> {
    pub shape: &'a Shape,
    /// Rotation of the shape's full transform, ancestors included
    pub total_angle: f64,
    pub options: &'a CanvasOptions,
}

/// Viewport geometry of one control, refreshed by `Scene::set_coords`.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlCoords {
    pub key: String,
    pub position: Point,
    /// Hit box for mouse and pen pointers: tl, tr, br, bl
    pub corner: [Point; 4],
    /// Larger hit box for touch pointers
    pub touch_corner: [Point; 4],
}

#[derive(Clone)]
pub struct Control {
    /// Position relative to the unscaled bounding box, in `[-0.5, 0.5]`
    pub x: f64,
    pub y: f64,
    /// Viewport pixels added after scaling
    pub offset_x: f64,
    pub offset_y: f64,
    /// Hit box override; the shape's corner size applies when `None`
    pub size: Option<f64>,
    pub touch_size: Option<f64>,
    pub action_name: String,
    pub cursor_style: String,
    pub visible: bool,
    /// Drawn with a line back to the bounding box (rotation handle)
    pub with_connection: bool,
    pub action_handler: Option<ActionHandler>,
    pub mouse_down_handler: Option<ControlHook>,
    pub mouse_up_handler: Option<ControlHook>,
    pub cursor_style_handler: Option<ControlResolver>,
    pub action_name_resolver: Option<ControlResolver>,
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("offset_x", &self.offset_x)
            .field("offset_y", &self.offset_y)
            .field("action_name", &self.action_name)
            .field("visible", &self.visible)
            .field("has_action_handler", &self.action_handler.is_some())
            .finish()
    }
}

impl Control {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            offset_x: 0.0,
            offset_y: 0.0,
            size: None,
            touch_size: None,
            action_name: String::new(),
            cursor_style: "crosshair".to_string(),
            visible: true,
            with_connection: false,
            action_handler: None,
            mouse_down_handler: None,
            mouse_up_handler: None,
            cursor_style_handler: None,
            action_name_resolver: None,
        }
    }

    pub fn with_offset(mut self, offset_x: f64, offset_y: f64) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    pub fn with_action(mut self, name: &str, handler: ActionHandler) -> Self {
        self.action_name = name.to_string();
        self.action_handler = Some(handler);
        self
    }

    pub fn with_cursor_style(mut self, cursor: &str) -> Self {
        self.cursor_style = cursor.to_string();
        self
    }

    pub fn with_cursor_style_handler(mut self, handler: ControlResolver) -> Self {
        self.cursor_style_handler = Some(handler);
        self
    }

    pub fn with_action_name_resolver(mut self, resolver: ControlResolver) -> Self {
        self.action_name_resolver = Some(resolver);
        self
    }

    pub fn with_mouse_down_handler(mut self, hook: ControlHook) -> Self {
        self.mouse_down_handler = Some(hook);
        self
    }

    pub fn with_mouse_up_handler(mut self, hook: ControlHook) -> Self {
        self.mouse_up_handler = Some(hook);
        self
    }

    pub fn with_connection(mut self) -> Self {
        self.with_connection = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Position relative to the box, as a vector from its center.
    pub fn relative_position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn get_action_name(&self, event: &PointerEvent, ctx: &ControlContext<'_>) -> String {
        match &self.action_name_resolver {
            Some(resolver) => resolver(event, self, ctx),
            None => self.action_name.clone(),
        }
    }

    pub fn get_action_handler(&self) -> Option<ActionHandler> {
        self.action_handler.clone()
    }

    pub fn get_mouse_down_handler(&self) -> Option<ControlHook> {
        self.mouse_down_handler.clone()
    }

    pub fn get_mouse_up_handler(&self) -> Option<ControlHook> {
        self.mouse_up_handler.clone()
    }

    pub fn cursor_style(&self, event: &PointerEvent, ctx: &ControlContext<'_>) -> String {
        match &self.cursor_style_handler {
            Some(handler) => handler(event, self, ctx),
            None => self.cursor_style.clone(),
        }
    }

    /// Viewport position of the control.
    ///
    /// `dimensions` is the shape's box size in viewport pixels and
    /// `final_matrix` places the box center and rotation in the viewport.
    pub fn position_handler(&self, dimensions: Point, final_matrix: &AffineMatrix) -> Point {
        final_matrix.transform_point(Point::new(
            self.x * dimensions.x + self.offset_x,
            self.y * dimensions.y + self.offset_y,
        ))
    }

    /// Square hit box of `size` pixels centered on `center`, rotated by `angle` degrees.
    pub fn corner_polygon(center: Point, size: f64, angle: f64) -> [Point; 4] {
        let matrix = AffineMatrix::from_translation(center)
            * AffineMatrix::from_rotation(angle)
            * AffineMatrix::from_scale(size, size);
        [
            matrix.transform_point(Point::new(-0.5, -0.5)),
            matrix.transform_point(Point::new(0.5, -0.5)),
            matrix.transform_point(Point::new(0.5, 0.5)),
            matrix.transform_point(Point::new(-0.5, 0.5)),
        ]
    }
}
