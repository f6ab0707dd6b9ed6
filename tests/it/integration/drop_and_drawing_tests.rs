//! Drag-and-drop notifications and the free-drawing mode.

use crate::helpers::{EventRecorder, TestCanvasBuilder, click, drag, mouse};
use shapeboard::events::{
    CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE, DRAG_ENTER, DRAG_LEAVE, DRAG_OVER, DROP, DROP_BEFORE,
};
use shapeboard::{FreeDrawingBrush, Point, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;

// ============================================================================
// Drag and drop
// ============================================================================

#[test]
fn test_drag_over_tracks_enter_and_leave() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .build();
    let recorder =
        EventRecorder::attach_to(canvas.events(), &[CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE]);
    let first = EventRecorder::attach_to(
        canvas.shape(ids[0]).unwrap().events(),
        &[DRAG_ENTER, DRAG_OVER, DRAG_LEAVE],
    );

    canvas.on_drag_enter(&mouse(0.0, 0.0)).unwrap();
    canvas.on_drag_over(&mouse(100.0, 100.0)).unwrap();
    canvas.on_drag_over(&mouse(102.0, 100.0)).unwrap();
    canvas.on_drag_over(&mouse(300.0, 100.0)).unwrap();
    canvas.on_drag_leave(&mouse(600.0, 100.0)).unwrap();

    assert_eq!(
        recorder.names(),
        vec![CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE, CANVAS_DRAG_ENTER, CANVAS_DRAG_LEAVE]
    );
    assert_eq!(first.names(), vec![DRAG_ENTER, DRAG_OVER, DRAG_OVER, DRAG_LEAVE]);
}

#[test]
fn test_drop_sequence() {
    let (mut canvas, ids) = TestCanvasBuilder::new().with_rect(50.0, 50.0, (100.0, 100.0)).build();
    let recorder = EventRecorder::attach_to(canvas.events(), &[DROP_BEFORE, DROP]);
    let shape_events = EventRecorder::attach_to(
        canvas.shape(ids[0]).unwrap().events(),
        &[DROP_BEFORE, DROP],
    );

    canvas.on_drag_over(&mouse(100.0, 100.0)).unwrap();
    canvas.on_drop(&mouse(100.0, 100.0)).unwrap();

    assert_eq!(recorder.names(), vec![DROP_BEFORE, DROP]);
    assert_eq!(shape_events.names(), vec![DROP_BEFORE, DROP]);
    assert_eq!(recorder.last(DROP).unwrap().target, Some(ids[0]));
}

// ============================================================================
// Free drawing
// ============================================================================

#[derive(Default)]
struct StrokeLog {
    calls: Vec<(&'static str, Point)>,
}

struct RecordingBrush {
    log: Rc<RefCell<StrokeLog>>,
}

impl FreeDrawingBrush for RecordingBrush {
    fn on_mouse_down(&mut self, pointer: Point, _event: &PointerEvent) {
        self.log.borrow_mut().calls.push(("down", pointer));
    }

    fn on_mouse_move(&mut self, pointer: Point, _event: &PointerEvent) {
        self.log.borrow_mut().calls.push(("move", pointer));
    }

    fn on_mouse_up(&mut self, pointer: Point, _event: &PointerEvent) -> bool {
        self.log.borrow_mut().calls.push(("up", pointer));
        false
    }
}

#[test]
fn test_drawing_mode_routes_pointer_to_brush() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_zoom(2.0)
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .build();
    click(&mut canvas, mouse(200.0, 200.0));
    assert_eq!(canvas.active_object(), Some(ids[0]));

    let log = Rc::new(RefCell::new(StrokeLog::default()));
    canvas.set_free_drawing_brush(Box::new(RecordingBrush { log: Rc::clone(&log) }));
    canvas.set_drawing_mode(true);

    drag(&mut canvas, (200.0, 200.0), (240.0, 200.0), 2);

    let calls: Vec<&str> = log.borrow().calls.iter().map(|(name, _)| *name).collect();
    assert_eq!(calls, vec!["down", "move", "move", "up"]);
    // Scene coordinates reach the brush
    assert_eq!(log.borrow().calls[0].1, Point::new(100.0, 100.0));
    assert_eq!(canvas.active_object(), None);
    assert!(canvas.input_state().is_idle());
    assert_eq!(canvas.cursor(), "crosshair");

    // The shape under the stroke was not moved
    assert_eq!(canvas.shape(ids[0]).unwrap().position, Point::new(100.0, 100.0));
}
