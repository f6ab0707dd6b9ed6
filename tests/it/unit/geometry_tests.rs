//! Geometry checks through shapes placed in a scene.

use crate::helpers::approx;
use shapeboard::geometry::{intersect_polygon_rectangle, is_point_in_polygon, send_point_to_plane};
use shapeboard::scene::Scene;
use shapeboard::{AffineMatrix, Point, Rect, Shape, TransformOptions};

fn close(a: Point, b: Point) -> bool {
    a.distance(b) < 1e-6
}

#[test]
fn test_shape_matrix_survives_decomposition() {
    let shapes = [
        Shape::rect(40.0, 20.0).at(10.0, 20.0).with_angle(35.0).with_scale(2.0, 0.5),
        Shape::rect(40.0, 20.0).at(-5.0, 0.0).with_skew(15.0, 0.0),
        Shape::rect(40.0, 20.0).at(0.0, 0.0).with_angle(-120.0).with_skew(0.0, 25.0),
    ];
    for shape in shapes {
        let matrix = shape.own_matrix();
        let rebuilt = AffineMatrix::compose(&matrix.decompose());
        assert!(rebuilt.approx_eq(&matrix, 1e-9), "{rebuilt:?} != {matrix:?}");
    }
}

#[test]
fn test_zero_skew_y_is_preserved() {
    let options = TransformOptions {
        angle: 20.0,
        skew_x: 12.0,
        ..Default::default()
    };
    let parts = AffineMatrix::compose(&options).decompose();
    assert_eq!(parts.skew_y, 0.0);
    assert!(approx(parts.skew_x, 12.0));
    assert!(approx(parts.angle, 20.0));
}

#[test]
fn test_rotated_shape_corners_and_hits() {
    let mut scene = Scene::new();
    let id = scene.add(Shape::rect(100.0, 100.0).at(0.0, 0.0).with_angle(45.0));
    let shape = scene.get(id).unwrap();

    let half_diagonal = 50.0 * 2f64.sqrt();
    let top_left = shape.coords()[0];
    assert!(close(top_left, Point::new(0.0, -half_diagonal)), "{top_left:?}");

    // Inside the axis-aligned box but outside the diamond
    assert!(!shape.contains_point(Point::new(45.0, 45.0)));
    assert!(shape.contains_point(Point::new(60.0, 0.0)));

    let bounds = shape.bounding_rect();
    assert!(approx(bounds.width, 2.0 * half_diagonal));
    assert!(close(bounds.center(), Point::ZERO));
}

#[test]
fn test_rect_containment_and_crossing() {
    let mut scene = Scene::new();
    let id = scene.add(Shape::rect(20.0, 20.0).at(50.0, 50.0));
    let shape = scene.get(id).unwrap();

    assert!(shape.is_contained_within_rect(Point::new(0.0, 0.0), Point::new(100.0, 100.0)));
    assert!(!shape.is_contained_within_rect(Point::new(0.0, 0.0), Point::new(55.0, 55.0)));
    assert!(shape.intersects_with_rect(Point::new(0.0, 0.0), Point::new(55.0, 55.0)));
    let crossing =
        intersect_polygon_rectangle(&shape.coords(), Point::new(55.0, 55.0), Point::new(0.0, 0.0));
    assert!(crossing.is_intersection());
    assert!(is_point_in_polygon(Point::new(50.0, 50.0), &shape.coords()));
}

#[test]
fn test_rect_from_points() {
    let rect =
        Rect::from_points([Point::new(3.0, 8.0), Point::new(-1.0, 2.0), Point::new(5.0, 4.0)]);
    assert_eq!(rect, Rect { left: -1.0, top: 2.0, width: 6.0, height: 6.0 });
    assert_eq!(Rect::from_points(std::iter::empty()), Rect::default());
    let joined = rect.union(&Rect { left: 10.0, top: 0.0, width: 1.0, height: 1.0 });
    assert_eq!(joined.max(), Point::new(11.0, 8.0));
}

#[test]
fn test_viewport_point_into_zoomed_scene() {
    let viewport = AffineMatrix::new(2.0, 0.0, 0.0, 2.0, 30.0, 10.0);
    let scene_point = send_point_to_plane(Point::new(130.0, 110.0), None, Some(&viewport));
    assert!(close(scene_point, Point::new(50.0, 50.0)));
}
