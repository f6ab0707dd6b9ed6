//! Unit tests for control sets, hooks and cursor resolution.

use crate::helpers::{TestCanvasBuilder, click, mouse};
use shapeboard::controls::{
    Control, ControlContext, ControlHook, default_controls, find_corner_quadrant,
    scale_cursor_style, scaling_x,
};
use shapeboard::{CanvasError, CanvasOptions, Point, Shape, TransformInfo};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_hook(counter: &Arc<AtomicUsize>) -> ControlHook {
    let counter = Arc::clone(counter);
    Arc::new(move |_info: &TransformInfo, _pointer: Point| -> anyhow::Result<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

// ============================================================================
// Cursor resolution
// ============================================================================

#[test]
fn test_corner_quadrants() {
    let top_right = Control::new(0.5, -0.5);
    assert_eq!(find_corner_quadrant(0.0, &top_right), 7);
    assert_eq!(find_corner_quadrant(45.0, &top_right), 0);
    assert_eq!(find_corner_quadrant(0.0, &Control::new(0.5, 0.0)), 0);
    assert_eq!(find_corner_quadrant(0.0, &Control::new(0.0, 0.5)), 2);
}

#[test]
fn test_scale_cursor_for_rotated_shape() {
    let options = CanvasOptions::default();
    let shape = Shape::rect(10.0, 10.0);
    let event = mouse(0.0, 0.0);
    let top_right = Control::new(0.5, -0.5);

    let upright = ControlContext {
        shape: &shape,
        total_angle: 0.0,
        options: &options,
    };
    assert_eq!(scale_cursor_style(&event, &top_right, &upright), "ne-resize");

    let turned = ControlContext {
        total_angle: 45.0,
        ..upright
    };
    assert_eq!(scale_cursor_style(&event, &top_right, &turned), "e-resize");
}

// ============================================================================
// Per-shape control sets
// ============================================================================

#[test]
fn test_control_hooks_bracket_the_session() {
    let downs = Arc::new(AtomicUsize::new(0));
    let ups = Arc::new(AtomicUsize::new(0));
    let handle = Control::new(0.5, 0.0)
        .with_action("scaleX", Arc::new(scaling_x))
        .with_mouse_down_handler(counting_hook(&downs))
        .with_mouse_up_handler(counting_hook(&ups));
    let mut shape = Shape::rect(100.0, 50.0).at(200.0, 200.0);
    shape.set_controls(Arc::new(default_controls().with_control("mr", handle)));

    let (mut canvas, ids) = TestCanvasBuilder::new().with_shape(shape).build();
    click(&mut canvas, mouse(200.0, 200.0));
    assert_eq!(downs.load(Ordering::SeqCst), 0);

    canvas.on_mouse_down(&mouse(250.0, 200.0)).unwrap();
    assert_eq!(downs.load(Ordering::SeqCst), 1);
    canvas.on_mouse_move(&mouse(300.0, 200.0)).unwrap();
    canvas.on_mouse_up(&mouse(300.0, 200.0)).unwrap();
    assert_eq!(ups.load(Ordering::SeqCst), 1);
    assert!((canvas.shape(ids[0]).unwrap().scale_x - 2.0).abs() < 1e-6);
}

#[test]
fn test_failing_hook_is_reported_after_the_handler() {
    let failing: ControlHook =
        Arc::new(|_info: &TransformInfo, _pointer: Point| -> anyhow::Result<()> {
            anyhow::bail!("hook refused")
        });
    let handle = Control::new(0.5, 0.0)
        .with_action("scaleX", Arc::new(scaling_x))
        .with_mouse_down_handler(failing);
    let mut shape = Shape::rect(100.0, 50.0).at(200.0, 200.0);
    shape.set_controls(Arc::new(default_controls().with_control("mr", handle)));

    let (mut canvas, _) = TestCanvasBuilder::new().with_shape(shape).build();
    click(&mut canvas, mouse(200.0, 200.0));

    let err = canvas.on_mouse_down(&mouse(250.0, 200.0)).unwrap_err();
    assert!(matches!(err, CanvasError::Listeners { ref event, .. } if event == "mr:mousedown"));
    // The session still started
    assert_eq!(canvas.current_transform().map(|t| t.action.as_str()), Some("scaleX"));
}

#[test]
fn test_hidden_control_is_not_hit() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    canvas.scene_mut().get_mut(ids[0]).unwrap().set_control_visible("mr", false);
    click(&mut canvas, mouse(200.0, 200.0));

    // Pressing where the handle would be grabs the body instead
    canvas.on_mouse_down(&mouse(249.0, 200.0)).unwrap();
    assert_eq!(canvas.current_transform().map(|t| t.action.as_str()), Some("drag"));
    canvas.on_mouse_up(&mouse(249.0, 200.0)).unwrap();
}

#[test]
fn test_shape_without_controls_only_drags() {
    let mut bare = Shape::rect(100.0, 50.0).at(200.0, 200.0);
    bare.has_controls = false;
    let (mut canvas, _) = TestCanvasBuilder::new().with_shape(bare).build();
    click(&mut canvas, mouse(200.0, 200.0));

    canvas.on_mouse_down(&mouse(249.0, 200.0)).unwrap();
    assert_eq!(canvas.current_transform().and_then(|t| t.corner.clone()), None);
}
