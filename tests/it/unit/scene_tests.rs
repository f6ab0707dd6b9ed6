//! Unit tests for scene ownership, grouping and z-order.

use shapeboard::scene::Scene;
use shapeboard::{CanvasError, Point, Shape};

fn row_of(scene: &mut Scene, count: usize) -> Vec<u64> {
    (0..count)
        .map(|i| scene.add(Shape::rect(10.0, 10.0).at(i as f64 * 100.0, 0.0)))
        .collect()
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_group_takes_slot_of_topmost_child() {
    let mut scene = Scene::new();
    let ids = row_of(&mut scene, 4);

    let group = scene.add_group(&[ids[2], ids[1]]).unwrap();

    assert_eq!(scene.order(), &[ids[0], group, ids[3]]);
    assert_eq!(scene.contents(group), Some(&[ids[1], ids[2]][..]));
    let shape = scene.get(group).unwrap();
    assert_eq!(shape.type_tag(), "group");
    assert!((shape.width - 110.0).abs() < 1e-9);
    assert!(shape.position.distance(Point::new(150.0, 0.0)) < 1e-9);
}

#[test]
fn test_group_children_are_not_stacked_hits() {
    let mut scene = Scene::new();
    let ids = row_of(&mut scene, 2);
    let group = scene.add_group(&ids).unwrap();

    let (target, subs) = scene.find_top_level_target(Point::new(100.0, 0.0));
    assert_eq!(target, Some(group));
    assert!(subs.is_empty());

    scene.get_mut(group).unwrap().sub_target_check = true;
    let (_, subs) = scene.find_top_level_target(Point::new(100.0, 0.0));
    assert_eq!(subs, vec![ids[1]]);
}

#[test]
fn test_removing_group_drops_children() {
    let mut scene = Scene::new();
    let ids = row_of(&mut scene, 2);
    let group = scene.add_group(&ids).unwrap();

    scene.remove(group).unwrap();

    assert!(scene.is_empty());
    assert!(scene.order().is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_container_errors() {
    let mut scene = Scene::new();
    let ids = row_of(&mut scene, 2);
    let group = scene.add_group(&[ids[0]]).unwrap();

    assert!(matches!(scene.add_group(&[]), Err(CanvasError::EmptyGroup)));
    assert!(matches!(
        scene.create_selection(&[ids[0], ids[1]]),
        Err(CanvasError::AlreadyInContainer(id)) if id == ids[0]
    ));
    assert!(matches!(
        scene.selection_members(ids[1]),
        Err(CanvasError::NotAContainer(id)) if id == ids[1]
    ));
    assert!(matches!(scene.selection_members(group), Err(CanvasError::NotAContainer(_))));
    assert!(matches!(scene.remove(999), Err(CanvasError::UnknownShape(999))));
}

// ============================================================================
// Z-order
// ============================================================================

#[test]
fn test_selection_restacks_members_together() {
    let mut scene = Scene::new();
    let ids = row_of(&mut scene, 4);
    let selection = scene.create_selection(&[ids[0], ids[2]]).unwrap();

    assert!(scene.bring_to_front(selection));
    assert_eq!(scene.order(), &[ids[1], ids[3], ids[0], ids[2]]);
    assert!(scene.send_to_back(selection));
    assert_eq!(scene.order(), &[ids[0], ids[2], ids[1], ids[3]]);
    assert!(!scene.bring_to_front(999));
}
