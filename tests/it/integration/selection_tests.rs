//! Click, multi-select and lasso selection through the pointer handlers.

use crate::helpers::{EventRecorder, TestCanvasBuilder, click, drag, mouse, shift_mouse};
use shapeboard::events::{
    SELECTION_CLEARED, SELECTION_CREATED, SELECTION_UPDATED, SHAPE_DESELECTED, SHAPE_SELECTED,
};
use shapeboard::{CanvasOptions, Shape};

fn two_apart() -> (shapeboard::Canvas, Vec<shapeboard::ShapeId>) {
    TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .build()
}

// ============================================================================
// Click selection
// ============================================================================

#[test]
fn test_click_selects_and_empty_click_clears() {
    let (mut canvas, ids) = two_apart();
    let recorder = EventRecorder::attach(&canvas);

    click(&mut canvas, mouse(100.0, 100.0));
    assert_eq!(canvas.active_object(), Some(ids[0]));

    click(&mut canvas, mouse(300.0, 100.0));
    assert_eq!(canvas.active_object(), Some(ids[1]));

    click(&mut canvas, mouse(500.0, 500.0));
    assert_eq!(canvas.active_object(), None);

    insta::assert_json_snapshot!(recorder.names_without_pointer(), @r###"
    [
      "selection:created",
      "before:transform",
      "selection:updated",
      "before:transform",
      "before:selection:cleared",
      "selection:cleared"
    ]
    "###);
}

#[test]
fn test_shape_level_selected_and_deselected() {
    let (mut canvas, ids) = two_apart();
    let first = EventRecorder::attach_to(
        canvas.shape(ids[0]).unwrap().events(),
        &[SHAPE_SELECTED, SHAPE_DESELECTED],
    );

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, mouse(300.0, 100.0));

    assert_eq!(first.names(), vec![SHAPE_SELECTED, SHAPE_DESELECTED]);
}

#[test]
fn test_unselectable_shape_is_never_active() {
    let mut locked = Shape::rect(50.0, 50.0).at(100.0, 100.0);
    locked.selectable = false;
    let (mut canvas, _) = TestCanvasBuilder::new().with_shape(locked).build();

    click(&mut canvas, mouse(100.0, 100.0));
    assert_eq!(canvas.active_object(), None);
    assert!(canvas.input_state().is_idle());
}

#[test]
fn test_vetoed_shape_is_not_selected() {
    let (mut canvas, _) = TestCanvasBuilder::new()
        .with_shape(Shape::rect(50.0, 50.0).at(100.0, 100.0).with_select_veto(|_| true))
        .build();
    let recorder = EventRecorder::attach(&canvas);

    click(&mut canvas, mouse(100.0, 100.0));

    assert_eq!(canvas.active_object(), None);
    assert_eq!(recorder.count(SELECTION_CREATED), 0);
}

// ============================================================================
// Multi-selection
// ============================================================================

#[test]
fn test_shift_click_builds_a_selection() {
    let (mut canvas, ids) = two_apart();
    let recorder = EventRecorder::attach(&canvas);

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));

    let selection = canvas.active_selection().expect("selection is active");
    assert_eq!(canvas.active_objects(), ids);
    assert_eq!(canvas.shape(ids[1]).unwrap().group, Some(selection));
    assert_eq!(recorder.count(SELECTION_UPDATED), 1);
    assert_eq!(recorder.last(SELECTION_UPDATED).unwrap().selected, vec![ids[1]]);
}

#[test]
fn test_shift_click_twice_returns_to_single_shape() {
    let (mut canvas, ids) = two_apart();

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));
    let selection = canvas.active_selection().unwrap();
    click(&mut canvas, shift_mouse(300.0, 100.0));

    assert_eq!(canvas.active_object(), Some(ids[0]));
    assert_eq!(canvas.active_selection(), None);
    assert!(!canvas.scene().contains(selection));
    assert_eq!(canvas.shape(ids[1]).unwrap().group, None);
}

#[test]
fn test_shift_click_adds_a_third_shape() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .with_rect(50.0, 50.0, (500.0, 100.0))
        .build();

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));
    click(&mut canvas, shift_mouse(500.0, 100.0));

    assert_eq!(canvas.active_objects(), ids);
}

#[test]
fn test_plain_click_outside_dissolves_selection() {
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .with_rect(50.0, 50.0, (500.0, 100.0))
        .build();

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));
    click(&mut canvas, mouse(500.0, 100.0));

    assert_eq!(canvas.active_object(), Some(ids[2]));
    assert!(ids[..2].iter().all(|id| canvas.shape(*id).unwrap().group.is_none()));
}

#[test]
fn test_dragging_a_selection_moves_it_as_one() {
    let (mut canvas, ids) = two_apart();
    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));

    drag(&mut canvas, (100.0, 100.0), (100.0, 150.0), 2);
    canvas.discard_active_object(None).unwrap();

    let first = canvas.shape(ids[0]).unwrap();
    let second = canvas.shape(ids[1]).unwrap();
    assert!((first.position.y - 150.0).abs() < 1e-6);
    assert!((second.position.y - 150.0).abs() < 1e-6);
    assert!((second.position.x - 300.0).abs() < 1e-6);
}

#[test]
fn test_multi_selection_disabled_by_option() {
    let options = CanvasOptions {
        selection: false,
        ..Default::default()
    };
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_options(options)
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .build();

    click(&mut canvas, mouse(100.0, 100.0));
    click(&mut canvas, shift_mouse(300.0, 100.0));

    assert_eq!(canvas.active_object(), Some(ids[1]));
    assert_eq!(canvas.active_selection(), None);
}

// ============================================================================
// Lasso
// ============================================================================

#[test]
fn test_lasso_collects_every_touched_shape() {
    let (mut canvas, ids) = two_apart();
    let recorder = EventRecorder::attach(&canvas);

    drag(&mut canvas, (400.0, 200.0), (90.0, 90.0), 3);

    let mut selected = canvas.active_objects();
    selected.sort();
    assert_eq!(selected, ids);
    assert!(canvas.active_selection().is_some());
    assert_eq!(recorder.count(SELECTION_CREATED), 1);
    assert!(!recorder.last("mouse:up").unwrap().is_click);
}

#[test]
fn test_lasso_fully_contained_mode() {
    let options = CanvasOptions {
        selection_fully_contained: true,
        ..Default::default()
    };
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_options(options)
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (300.0, 100.0))
        .build();

    drag(&mut canvas, (0.0, 0.0), (300.0, 200.0), 2);

    assert_eq!(canvas.active_object(), Some(ids[0]));
}

#[test]
fn test_lasso_single_hit_selects_plain_shape() {
    let (mut canvas, ids) = two_apart();

    drag(&mut canvas, (0.0, 0.0), (150.0, 150.0), 2);

    assert_eq!(canvas.active_object(), Some(ids[0]));
    assert_eq!(canvas.active_selection(), None);
}

#[test]
fn test_zero_size_lasso_selects_topmost_below_unselectable_cover() {
    let mut cover = Shape::rect(200.0, 200.0).at(100.0, 100.0);
    cover.selectable = false;
    let (mut canvas, ids) = TestCanvasBuilder::new()
        .with_rect(50.0, 50.0, (100.0, 100.0))
        .with_rect(50.0, 50.0, (110.0, 110.0))
        .with_shape(cover)
        .build();
    let recorder = EventRecorder::attach(&canvas);

    click(&mut canvas, mouse(105.0, 105.0));

    assert_eq!(canvas.active_object(), Some(ids[1]));
    assert!(recorder.last("mouse:up").unwrap().is_click);
}

#[test]
fn test_empty_lasso_clears_selection() {
    let (mut canvas, ids) = two_apart();
    let recorder = EventRecorder::attach(&canvas);
    click(&mut canvas, mouse(100.0, 100.0));
    assert_eq!(canvas.active_object(), Some(ids[0]));

    drag(&mut canvas, (600.0, 600.0), (700.0, 700.0), 2);

    assert_eq!(canvas.active_object(), None);
    assert_eq!(recorder.count(SELECTION_CLEARED), 1);
}
