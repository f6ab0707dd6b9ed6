//! Line, segment and polygon intersection tests used by hit testing and
//! rubber-band selection.

use super::matrix::Point;

const COLLINEAR_EPSILON: f64 = 1e-9;

/// How two primitives relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionStatus {
    /// At least one crossing point was found.
    Intersection,
    /// The primitives overlap along a shared line.
    Coincident,
    /// Lines are parallel and distinct.
    Parallel,
    /// Nothing in common.
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub status: IntersectionStatus,
    pub points: Vec<Point>,
}

impl Intersection {
    fn new(status: IntersectionStatus) -> Self {
        Self { status, points: Vec::new() }
    }

    fn none() -> Self {
        Self::new(IntersectionStatus::None)
    }

    pub fn is_intersection(&self) -> bool {
        self.status == IntersectionStatus::Intersection
    }
}

/// True when `point` lies on the segment `a`-`b` (or on the line through them
/// when `infinite`).
pub fn is_point_contained(point: Point, a: Point, b: Point, infinite: bool) -> bool {
    if a == b {
        return point == a;
    }
    let ab = b - a;
    let ap = point - a;
    if ab.perp_dot(ap).abs() > COLLINEAR_EPSILON * ab.length().max(1.0) {
        return false;
    }
    if infinite {
        return true;
    }
    let t = ap.dot(ab) / ab.length_squared();
    (0.0..=1.0).contains(&t)
}

/// Intersects the lines (or segments) `a1`-`a2` and `b1`-`b2`.
pub fn intersect_line_line(
    a1: Point,
    a2: Point,
    b1: Point,
    b2: Point,
    a_infinite: bool,
    b_infinite: bool,
) -> Intersection {
    let a = a2 - a1;
    let b = b2 - b1;
    let offset = a1 - b1;
    let ua_t = b.x * offset.y - b.y * offset.x;
    let ub_t = a.x * offset.y - a.y * offset.x;
    let u_b = b.y * a.x - b.x * a.y;

    if u_b != 0.0 {
        let ua = ua_t / u_b;
        let ub = ub_t / u_b;
        if (a_infinite || (0.0..=1.0).contains(&ua)) && (b_infinite || (0.0..=1.0).contains(&ub)) {
            let mut result = Intersection::new(IntersectionStatus::Intersection);
            result.points.push(a1 + a * ua);
            return result;
        }
        return Intersection::none();
    }

    if ua_t == 0.0 || ub_t == 0.0 {
        let coincide = a_infinite
            || b_infinite
            || is_point_contained(a1, b1, b2, false)
            || is_point_contained(a2, b1, b2, false)
            || is_point_contained(b1, a1, a2, false)
            || is_point_contained(b2, a1, a2, false);
        if coincide {
            return Intersection::new(IntersectionStatus::Coincident);
        }
        return Intersection::none();
    }

    Intersection::new(IntersectionStatus::Parallel)
}

pub fn intersect_segment_segment(a1: Point, a2: Point, b1: Point, b2: Point) -> Intersection {
    intersect_line_line(a1, a2, b1, b2, false, false)
}

/// Intersects a line (or segment) with the closed polygon `points`.
pub fn intersect_line_polygon(
    a1: Point,
    a2: Point,
    points: &[Point],
    infinite: bool,
) -> Intersection {
    let mut result = Intersection::none();
    let len = points.len();
    for i in 0..len {
        let b1 = points[i];
        let b2 = points[(i + 1) % len];
        let inter = intersect_line_line(a1, a2, b1, b2, infinite, false);
        if inter.status == IntersectionStatus::Coincident {
            return inter;
        }
        result.points.extend(inter.points);
    }
    if !result.points.is_empty() {
        result.status = IntersectionStatus::Intersection;
    }
    result
}

pub fn intersect_segment_polygon(a1: Point, a2: Point, points: &[Point]) -> Intersection {
    intersect_line_polygon(a1, a2, points, false)
}

/// Intersects the outlines of two closed polygons.
///
/// Reports `Coincident` only when every edge of `first` overlaps `second`.
pub fn intersect_polygon_polygon(first: &[Point], second: &[Point]) -> Intersection {
    let mut result = Intersection::none();
    let len = first.len();
    let mut coincidences = 0;
    for i in 0..len {
        let a1 = first[i];
        let a2 = first[(i + 1) % len];
        let inter = intersect_segment_polygon(a1, a2, second);
        if inter.status == IntersectionStatus::Coincident {
            coincidences += 1;
            result.points.push(a1);
            result.points.push(a2);
        } else {
            result.points.extend(inter.points);
        }
    }
    if coincidences > 0 && coincidences == len {
        return Intersection::new(IntersectionStatus::Coincident);
    }
    if !result.points.is_empty() {
        result.status = IntersectionStatus::Intersection;
    }
    result
}

/// Intersects a polygon outline with the axis-aligned rectangle spanned by
/// two opposite corners.
pub fn intersect_polygon_rectangle(points: &[Point], r1: Point, r2: Point) -> Intersection {
    let min = r1.min(r2);
    let max = r1.max(r2);
    let rectangle = [min, Point::new(max.x, min.y), max, Point::new(min.x, max.y)];
    intersect_polygon_polygon(points, &rectangle)
}

/// Even-odd point-in-polygon test. Points on an edge count as inside.
pub fn is_point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let len = polygon.len();
    if len < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = len - 1;
    for i in 0..len {
        let pi = polygon[i];
        let pj = polygon[j];
        if is_point_contained(point, pj, pi, false) {
            return true;
        }
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
