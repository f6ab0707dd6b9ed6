//! Shapes: geometry, interaction flags and cached coordinates.
//!
//! A shape's `position` is its center in the parent plane (the scene for
//! top-level shapes, the container's local plane otherwise). Its own matrix
//! is `translate(position) · rotate(angle) · scale · skewX · skewY`.

use crate::constants::{
    ACTIVE_SELECTION_TYPE, DEFAULT_SHAPE_SIZE, ELLIPSE_TYPE, GROUP_TYPE, RECT_TYPE,
};
use crate::controls::{Control, ControlCoords, ControlSet, controls_for};
use crate::events::Observable;
use crate::geometry::{
    AffineMatrix, Point, Rect, TransformOptions, intersect_polygon_rectangle, is_point_in_polygon,
};
use crate::scene::ShapeId;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// What a shape is. Containers own their membership lists; members only
/// carry a back-reference (`Shape::group`).
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect,
    Ellipse,
    Group {
        children: Vec<ShapeId>,
    },
    /// Transient multi-selection wrapper; never part of the z-order
    ActiveSelection {
        members: Vec<ShapeId>,
    },
}

impl ShapeKind {
    pub fn type_tag(&self) -> &'static str {
        match self {
            ShapeKind::Rect => RECT_TYPE,
            ShapeKind::Ellipse => ELLIPSE_TYPE,
            ShapeKind::Group { .. } => GROUP_TYPE,
            ShapeKind::ActiveSelection { .. } => ACTIVE_SELECTION_TYPE,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ShapeKind::Group { .. } | ShapeKind::ActiveSelection { .. })
    }

    /// Children of a group or members of a selection.
    pub fn contents(&self) -> &[ShapeId] {
        match self {
            ShapeKind::Group { children } => children,
            ShapeKind::ActiveSelection { members } => members,
            _ => &[],
        }
    }

    pub(crate) fn contents_mut(&mut self) -> Option<&mut Vec<ShapeId>> {
        match self {
            ShapeKind::Group { children } => Some(children),
            ShapeKind::ActiveSelection { members } => Some(members),
            _ => None,
        }
    }
}

/// Geometry captured at the start of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShapeSnapshot {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub angle: f64,
    pub skew_x: f64,
    pub skew_y: f64,
}

/// Returns true to refuse becoming the active shape.
pub type SelectVeto = Rc<dyn Fn(ShapeId) -> bool>;

pub struct Shape {
    pub(crate) id: ShapeId,
    pub kind: ShapeKind,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees, clockwise
    pub angle: f64,
    pub skew_x: f64,
    pub skew_y: f64,
    /// Space between the shape and its controls, in viewport pixels
    pub padding: f64,
    /// Containing group or selection
    pub group: Option<ShapeId>,

    pub selectable: bool,
    pub evented: bool,
    pub visible: bool,
    pub has_controls: bool,
    pub lock_movement_x: bool,
    pub lock_movement_y: bool,
    pub lock_rotation: bool,
    pub lock_scaling_x: bool,
    pub lock_scaling_y: bool,
    pub lock_skewing_x: bool,
    pub lock_skewing_y: bool,
    pub centered_scaling: bool,
    pub centered_rotation: bool,
    /// Rotation step in degrees; zero disables snapping
    pub snap_angle: f64,
    pub snap_threshold: Option<f64>,
    pub hover_cursor: Option<String>,
    pub move_cursor: Option<String>,
    /// Hit children are reported as sub-targets
    pub sub_target_check: bool,
    pub corner_size: Option<f64>,
    pub touch_corner_size: Option<f64>,

    controls: Arc<ControlSet>,
    control_visibility: HashMap<String, bool>,
    select_veto: Option<SelectVeto>,
    events: Observable,
    pub(crate) a_coords: [Point; 4],
    pub(crate) o_coords: Vec<ControlCoords>,
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("size", &(self.width, self.height))
            .field("scale", &(self.scale_x, self.scale_y))
            .field("angle", &self.angle)
            .field("skew", &(self.skew_x, self.skew_y))
            .field("group", &self.group)
            .finish_non_exhaustive()
    }
}

impl Shape {
    pub fn new(kind: ShapeKind, width: f64, height: f64) -> Self {
        let controls = controls_for(kind.type_tag());
        Self {
            id: 0,
            kind,
            position: Point::ZERO,
            width,
            height,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            skew_x: 0.0,
            skew_y: 0.0,
            padding: 0.0,
            group: None,
            selectable: true,
            evented: true,
            visible: true,
            has_controls: true,
            lock_movement_x: false,
            lock_movement_y: false,
            lock_rotation: false,
            lock_scaling_x: false,
            lock_scaling_y: false,
            lock_skewing_x: false,
            lock_skewing_y: false,
            centered_scaling: false,
            centered_rotation: false,
            snap_angle: 0.0,
            snap_threshold: None,
            hover_cursor: None,
            move_cursor: None,
            sub_target_check: false,
            corner_size: None,
            touch_corner_size: None,
            controls,
            control_visibility: HashMap::new(),
            select_veto: None,
            events: Observable::new(),
            a_coords: [Point::ZERO; 4],
            o_coords: Vec::new(),
        }
    }

    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Rect, width, height)
    }

    pub fn ellipse(width: f64, height: f64) -> Self {
        Self::new(ShapeKind::Ellipse, width, height)
    }

    /// A rectangle of the default size.
    pub fn default_rect() -> Self {
        Self::rect(DEFAULT_SHAPE_SIZE.0, DEFAULT_SHAPE_SIZE.1)
    }

    /// Center the shape on `(x, y)` in its parent plane.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    pub fn with_skew(mut self, skew_x: f64, skew_y: f64) -> Self {
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_select_veto(mut self, veto: impl Fn(ShapeId) -> bool + 'static) -> Self {
        self.select_veto = Some(Rc::new(veto));
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.type_tag()
    }

    pub fn is_active_selection(&self) -> bool {
        matches!(self.kind, ShapeKind::ActiveSelection { .. })
    }

    /// Listeners for shape-level notifications (`mousedown`, `modified`, ...).
    pub fn events(&self) -> &Observable {
        &self.events
    }

    // ------------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------------

    pub fn controls(&self) -> &Arc<ControlSet> {
        &self.controls
    }

    pub fn set_controls(&mut self, controls: Arc<ControlSet>) {
        self.controls = controls;
    }

    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls.get(key)
    }

    /// Per-shape visibility override, layered over the shared set.
    pub fn set_control_visible(&mut self, key: &str, visible: bool) {
        self.control_visibility.insert(key.to_string(), visible);
    }

    pub fn is_control_visible(&self, key: &str) -> bool {
        if !self.has_controls {
            return false;
        }
        match self.control_visibility.get(key) {
            Some(visible) => *visible,
            None => self.controls.get(key).is_some_and(|control| control.visible),
        }
    }

    /// Viewport geometry of the controls, as of the last `set_coords`.
    pub fn control_coords(&self, key: &str) -> Option<&ControlCoords> {
        self.o_coords.iter().find(|coords| coords.key == key)
    }

    /// Topmost visible control whose hit box contains `viewport_point`.
    ///
    /// Controls are tested in reverse declaration order, so the rotation
    /// handle wins over the top edge it overlaps.
    pub fn find_control(&self, viewport_point: Point, is_touch: bool) -> Option<(&str, &Control)> {
        if !self.has_controls {
            return None;
        }
        self.o_coords.iter().rev().find_map(|coords| {
            if !self.is_control_visible(&coords.key) {
                return None;
            }
            let polygon = if is_touch { &coords.touch_corner } else { &coords.corner };
            if !is_point_in_polygon(viewport_point, polygon) {
                return None;
            }
            self.controls.get(&coords.key).map(|control| (coords.key.as_str(), control))
        })
    }

    // ------------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------------

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            angle: self.angle,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
            translate_x: self.position.x,
            translate_y: self.position.y,
        }
    }

    /// Maps the shape's local plane (origin at its center) to its parent plane.
    pub fn own_matrix(&self) -> AffineMatrix {
        AffineMatrix::compose(&self.transform_options())
    }

    /// Scale and skew without rotation or translation.
    pub fn dimensions_matrix(&self) -> AffineMatrix {
        AffineMatrix::dimensions(self.scale_x, self.scale_y, self.skew_x, self.skew_y)
    }

    /// Size of the box after scale and skew, before rotation.
    pub fn transformed_dimensions(&self) -> Point {
        dimensions_through(&self.dimensions_matrix(), self.size())
    }

    /// Parent-plane position of a box-relative origin, `(0, 0)` being the
    /// center and `(±0.5, ±0.5)` the corners.
    pub fn point_by_origin(&self, origin: Point) -> Point {
        self.own_matrix().transform_point(origin * self.size())
    }

    /// Moves the shape so that `origin` lands on `point`.
    pub fn set_position_by_origin(&mut self, point: Point, origin: Point) {
        let current = self.point_by_origin(origin);
        self.position += point - current;
    }

    pub fn snapshot(&self) -> ShapeSnapshot {
        ShapeSnapshot {
            position: self.position,
            width: self.width,
            height: self.height,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            angle: self.angle,
            skew_x: self.skew_x,
            skew_y: self.skew_y,
        }
    }

    /// Apply decomposed parent-plane properties.
    pub(crate) fn apply_transform_options(&mut self, options: &TransformOptions) {
        self.position = Point::new(options.translate_x, options.translate_y);
        self.angle = options.angle;
        self.scale_x = options.scale_x;
        self.scale_y = options.scale_y;
        self.skew_x = options.skew_x;
        self.skew_y = options.skew_y;
    }

    /// Whether the shape refuses selection.
    pub fn on_select(&self) -> bool {
        self.select_veto.as_ref().is_some_and(|veto| veto(self.id))
    }

    // ------------------------------------------------------------------------
    // Cached scene coordinates
    // ------------------------------------------------------------------------

    /// Scene-space corners (tl, tr, br, bl) as of the last `set_coords`.
    pub fn coords(&self) -> [Point; 4] {
        self.a_coords
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_points(self.a_coords)
    }

    pub fn contains_point(&self, scene_point: Point) -> bool {
        is_point_in_polygon(scene_point, &self.a_coords)
    }

    pub fn intersects_with_rect(&self, tl: Point, br: Point) -> bool {
        intersect_polygon_rectangle(&self.a_coords, tl, br).is_intersection()
    }

    pub fn is_contained_within_rect(&self, tl: Point, br: Point) -> bool {
        let bounds = self.bounding_rect();
        bounds.left >= tl.x
            && bounds.left + bounds.width <= br.x
            && bounds.top >= tl.y
            && bounds.top + bounds.height <= br.y
    }
}

/// Axis-aligned size of a `size` box mapped through `matrix` (ignoring translation).
pub(crate) fn dimensions_through(matrix: &AffineMatrix, size: Point) -> Point {
    if matrix.b == 0.0 && matrix.c == 0.0 {
        return Point::new((size.x * matrix.a).abs(), (size.y * matrix.d).abs());
    }
    let half = size / 2.0;
    let corners = [
        Point::new(-half.x, -half.y),
        Point::new(half.x, -half.y),
        Point::new(half.x, half.y),
        Point::new(-half.x, half.y),
    ]
    .map(|corner| matrix.transform_vector(corner));
    let bounds = Rect::from_points(corners);
    Point::new(bounds.width, bounds.height)
}
