//! Dependency-free geometry used by every other layer.
//!
//! - `matrix` - affine compose/decompose/invert and cross-plane point conversion
//! - `intersection` - segment and polygon tests for hit testing and lasso selection

pub mod intersection;
pub mod matrix;

pub use intersection::{
    Intersection, IntersectionStatus, intersect_line_line, intersect_polygon_polygon,
    intersect_polygon_rectangle, intersect_segment_polygon, intersect_segment_segment,
    is_point_in_polygon,
};
pub use matrix::{
    AffineMatrix, Point, TransformOptions, flatten_planes, rotate_point, send_point_through_planes,
    send_point_to_plane, send_vector_to_plane,
};

/// Axis-aligned rectangle in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        let mut min = Point::splat(f64::INFINITY);
        let mut max = Point::splat(f64::NEG_INFINITY);
        for point in points {
            min = min.min(point);
            max = max.max(point);
        }
        if !min.is_finite() || !max.is_finite() {
            return Self::default();
        }
        Self {
            left: min.x,
            top: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn min(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn max(&self) -> Point {
        Point::new(self.left + self.width, self.top + self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_points([self.min(), self.max(), other.min(), other.max()])
    }
}
