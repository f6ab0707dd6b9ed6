//! Notification order for complete gestures, hover tracking and listener
//! failure propagation.

use crate::helpers::{EventRecorder, TestCanvasBuilder, click, mouse};
use shapeboard::events::{MOUSE_DOWN, MOUSE_OUT, MOUSE_OVER, SHAPE_MOUSE_OUT, SHAPE_MOUSE_OVER};
use shapeboard::{CanvasError, CanvasOptions, MouseButton, Shape};
use std::cell::Cell;
use std::rc::Rc;

// ============================================================================
// Gesture sequences
// ============================================================================

#[test]
fn test_handle_gesture_notification_order() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    click(&mut canvas, mouse(200.0, 200.0));
    let recorder = EventRecorder::attach(&canvas);

    canvas.on_mouse_down(&mouse(250.0, 200.0)).unwrap();
    canvas.on_mouse_move(&mouse(280.0, 200.0)).unwrap();
    canvas.on_mouse_up(&mouse(280.0, 200.0)).unwrap();

    insta::assert_json_snapshot!(recorder.names(), @r###"
    [
      "mouse:down:before",
      "before:transform",
      "mouse:down",
      "mouse:move:before",
      "object:scaling",
      "mouse:move",
      "mouse:up:before",
      "object:modified",
      "mouse:up"
    ]
    "###);

    let before = recorder.last("before:transform").unwrap();
    let info = before.transform.unwrap();
    assert_eq!(info.corner.as_deref(), Some("mr"));
    assert_eq!(info.action, "scaleX");
}

#[test]
fn test_shape_receives_unprefixed_pointer_events() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    let shape_events = EventRecorder::attach_to(
        canvas.shape(ids[0]).unwrap().events(),
        &["mousedown:before", "mousedown", "mouseup:before", "mouseup", "selected"],
    );

    click(&mut canvas, mouse(200.0, 200.0));

    assert_eq!(
        shape_events.names(),
        vec!["mousedown:before", "selected", "mousedown", "mouseup:before", "mouseup"]
    );
}

#[test]
fn test_up_payload_reports_current_target() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    let recorder = EventRecorder::attach(&canvas);

    canvas.on_mouse_down(&mouse(500.0, 500.0)).unwrap();
    canvas.on_mouse_move(&mouse(210.0, 200.0)).unwrap();
    canvas.on_mouse_up(&mouse(200.0, 200.0)).unwrap();

    let up = recorder.last("mouse:up").unwrap();
    assert_eq!(up.current_target, Some(ids[0]));
    assert!(!up.is_click);
}

#[test]
fn test_secondary_button_is_silent_unless_enabled() {
    let (mut canvas, _) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    let recorder = EventRecorder::attach(&canvas);

    let right = mouse(200.0, 200.0).with_button(MouseButton::Secondary);
    click(&mut canvas, right.clone());
    assert_eq!(recorder.count(MOUSE_DOWN), 0);
    assert_eq!(canvas.active_object(), None);

    canvas.options.fire_right_click = true;
    click(&mut canvas, right);
    assert_eq!(recorder.count(MOUSE_DOWN), 1);
    assert_eq!(canvas.active_object(), None);
}

#[test]
fn test_double_click_and_wheel_notify() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    let recorder = EventRecorder::attach(&canvas);

    canvas.on_double_click(&mouse(200.0, 200.0)).unwrap();
    canvas.on_wheel(&mouse(200.0, 200.0).with_delta(0.0, -120.0)).unwrap();

    assert_eq!(recorder.names(), vec!["mouse:dblclick", "mouse:wheel"]);
    assert_eq!(recorder.last("mouse:wheel").unwrap().target, Some(ids[0]));
}

// ============================================================================
// Hover
// ============================================================================

#[test]
fn test_hover_enter_and_leave() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .build();
    let recorder = EventRecorder::attach_to(canvas.events(), &[MOUSE_OVER, MOUSE_OUT]);
    let shape_events = EventRecorder::attach_to(
        canvas.shape(ids[0]).unwrap().events(),
        &[SHAPE_MOUSE_OVER, SHAPE_MOUSE_OUT],
    );

    canvas.on_mouse_move(&mouse(0.0, 0.0)).unwrap();
    canvas.on_mouse_move(&mouse(100.0, 100.0)).unwrap();
    canvas.on_mouse_move(&mouse(105.0, 100.0)).unwrap();
    canvas.on_mouse_move(&mouse(300.0, 100.0)).unwrap();
    canvas.on_mouse_move(&mouse(500.0, 500.0)).unwrap();

    insta::assert_json_snapshot!(recorder.names(), @r###"
    [
      "mouse:over",
      "mouse:out",
      "mouse:over",
      "mouse:out"
    ]
    "###);
    assert_eq!(shape_events.names(), vec![SHAPE_MOUSE_OVER, SHAPE_MOUSE_OUT]);

    let handoff = recorder.last(MOUSE_OVER).unwrap();
    assert_eq!(handoff.target, Some(ids[1]));
    assert_eq!(handoff.previous_target, Some(ids[0]));
    assert_eq!(canvas.hovered().target, None);
}

#[test]
fn test_hover_cursor() {
    let mut custom = Shape::rect(50.0, 50.0).at(300.0, 100.0);
    custom.hover_cursor = Some("pointer".to_string());
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_shape(custom)
        .build();

    canvas.on_mouse_move(&mouse(100.0, 100.0)).unwrap();
    assert_eq!(canvas.cursor(), "move");
    canvas.on_mouse_move(&mouse(300.0, 100.0)).unwrap();
    assert_eq!(canvas.cursor(), "pointer");
    canvas.on_mouse_move(&mouse(500.0, 500.0)).unwrap();
    assert_eq!(canvas.cursor(), "default");
}

#[test]
fn test_control_cursor_follows_rotation() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_shape(Shape::rect(100.0, 100.0).at(200.0, 200.0))
        .build();
    click(&mut canvas, mouse(200.0, 200.0));

    // Top-right corner
    canvas.on_mouse_move(&mouse(250.0, 150.0)).unwrap();
    assert_eq!(canvas.cursor(), "ne-resize");

    canvas.scene_mut().get_mut(ids[0]).unwrap().angle = 45.0;
    canvas.set_coords(ids[0]);
    let corner = canvas.shape(ids[0]).unwrap().control_coords("tr").unwrap().position;
    canvas.on_mouse_move(&mouse(corner.x, corner.y)).unwrap();
    assert_eq!(canvas.cursor(), "e-resize");
}

// ============================================================================
// Listener failures
// ============================================================================

#[test]
fn test_failing_listener_does_not_stop_siblings() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(100.0, 50.0, (200.0, 200.0)).build();
    let ran = Rc::new(Cell::new(0));

    canvas.on(MOUSE_DOWN, |_| anyhow::bail!("listener exploded"));
    let counter = Rc::clone(&ran);
    canvas.on(MOUSE_DOWN, move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });

    let err = canvas.on_mouse_down(&mouse(200.0, 200.0)).unwrap_err();
    assert!(matches!(err, CanvasError::Listeners { ref event, .. } if event == MOUSE_DOWN));
    assert_eq!(err.listener_failures().len(), 1);
    assert_eq!(ran.get(), 1);

    // The handler finished its work before reporting
    assert_eq!(canvas.active_object(), Some(ids[0]));
    assert!(canvas.current_transform().is_some());
    canvas.on_mouse_up(&mouse(200.0, 200.0)).unwrap();
    assert!(canvas.input_state().is_idle());
}

#[test]
fn test_skip_target_find_disables_hit_testing() {
    let options = CanvasOptions {
        skip_target_find: true,
        ..Default::default()
    };
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_options(options)
        .with_rect(100.0, 50.0, (200.0, 200.0))
        .build();

    canvas.on_mouse_down(&mouse(200.0, 200.0)).unwrap();
    assert!(canvas.input_state().is_lasso());
    canvas.on_mouse_up(&mouse(200.0, 200.0)).unwrap();
    // The lasso still resolves geometrically
    assert!(canvas.active_object().is_some());
}
