//! Gestures under a zoomed or panned viewport.

use crate::helpers::{TestCanvasBuilder, approx, click, drag, mouse};
use shapeboard::Point;

#[test]
fn test_hit_testing_uses_scene_coordinates() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .build();

    click(&mut canvas, mouse(100.0, 100.0));
    assert_eq!(canvas.active_object(), None);

    click(&mut canvas, mouse(200.0, 200.0));
    assert_eq!(canvas.active_object(), Some(ids[0]));
}

#[test]
fn test_drag_distance_is_divided_by_zoom() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .build();

    drag(&mut canvas, (200.0, 200.0), (300.0, 200.0), 2);

    assert!(approx(canvas.shape(ids[0]).unwrap().position.x, 150.0));
}

#[test]
fn test_handles_keep_screen_size_under_zoom() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_rect(100.0, 50.0, (100.0, 100.0))
        .build();
    click(&mut canvas, mouse(200.0, 200.0));

    // Right-middle handle: scene (150, 100), viewport (300, 200)
    drag(&mut canvas, (300.0, 200.0), (400.0, 200.0), 2);

    let scaled = canvas.shape(ids[0]).unwrap();
    assert!(approx(scaled.scale_x, 2.0), "scale_x = {}", scaled.scale_x);
}

#[test]
fn test_pan_shifts_targets() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(50.0, 50.0, (100.0, 100.0)).build();
    canvas.relative_pan(Point::new(100.0, 0.0));

    click(&mut canvas, mouse(100.0, 100.0));
    assert_eq!(canvas.active_object(), None);
    click(&mut canvas, mouse(200.0, 100.0));
    assert_eq!(canvas.active_object(), Some(ids[0]));
}

#[test]
fn test_zoom_to_point_keeps_pointer_anchor() {
    let (mut canvas, _) = TestCanvasBuilder::new().build();
    let anchor = Point::new(120.0, 80.0);
    let before = canvas.scene_point(&mouse(anchor.x, anchor.y));

    canvas.zoom_to_point(anchor, 3.0);

    let after = canvas.scene_point(&mouse(anchor.x, anchor.y));
    assert!(approx(canvas.zoom(), 3.0));
    assert!(approx(before.x, after.x) && approx(before.y, after.y));
}
