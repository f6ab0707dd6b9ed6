//! Scene arena: shape ownership, z-order, containers and cached coordinates.
//!
//! Shapes live in a map keyed by [`ShapeId`]. Top-level shapes (and members
//! of the active selection, which stay where they were in the stack) are
//! listed back-to-front in `order`. Group children are listed only in their
//! group. Containers own their membership lists; members only keep the
//! non-owning `group` id.

use crate::constants::{DEFAULT_CORNER_SIZE, DEFAULT_TOUCH_CORNER_SIZE};
use crate::controls::{Control, ControlCoords};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::{AffineMatrix, Point, Rect};
use crate::shape::{Shape, ShapeKind, dimensions_through};
use crate::spatial_index::SpatialIndex;
use std::collections::{HashMap, HashSet};

pub type ShapeId = u64;

const BOX_CORNERS: [Point; 4] = [
    Point::new(-0.5, -0.5),
    Point::new(0.5, -0.5),
    Point::new(0.5, 0.5),
    Point::new(-0.5, 0.5),
];

pub struct Scene {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
    index: SpatialIndex,
    next_id: ShapeId,
    viewport_transform: AffineMatrix,
    corner_size: f64,
    touch_corner_size: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            order: Vec::new(),
            index: SpatialIndex::new(),
            next_id: 0,
            viewport_transform: AffineMatrix::IDENTITY,
            corner_size: DEFAULT_CORNER_SIZE,
            touch_corner_size: DEFAULT_TOUCH_CORNER_SIZE,
        }
    }

    /// Default control hit box sizes for shapes without their own.
    pub fn set_corner_sizes(&mut self, corner_size: f64, touch_corner_size: f64) {
        self.corner_size = corner_size;
        self.touch_corner_size = touch_corner_size;
        self.set_coords_all();
    }

    // ========================================================================
    // Ownership
    // ========================================================================

    /// Add a shape on top of the stack.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        self.next_id += 1;
        let id = self.next_id;
        shape.id = id;
        shape.group = None;
        self.shapes.insert(id, shape);
        self.order.push(id);
        self.set_coords(id);
        tracing::trace!(shape_id = id, "Shape added");
        id
    }

    /// Remove a shape. Group children go with their group; selection
    /// members are released back to the scene.
    pub fn remove(&mut self, id: ShapeId) -> CanvasResult<Shape> {
        let shape = self.shapes.get(&id).ok_or(CanvasError::UnknownShape(id))?;
        let container = shape.group;
        let kind = shape.kind.clone();

        if let Some(container) = container {
            self.detach_from_container(container, id);
        }
        match kind {
            ShapeKind::Group { children } => {
                for child in children {
                    // Children reference this group; drop them with it
                    if let Err(err) = self.remove(child) {
                        tracing::warn!(
                            group_id = id,
                            child_id = child,
                            error = %err,
                            "Failed to remove group child"
                        );
                    }
                }
            }
            ShapeKind::ActiveSelection { members } => {
                for member in members {
                    self.exit_container(member);
                    self.set_coords(member);
                }
            }
            ShapeKind::Rect | ShapeKind::Ellipse => {}
        }

        self.order.retain(|other| *other != id);
        self.index.remove(id);
        let removed = self.shapes.remove(&id).ok_or(CanvasError::UnknownShape(id))?;
        tracing::trace!(shape_id = id, "Shape removed");
        Ok(removed)
    }

    fn detach_from_container(&mut self, container: ShapeId, member: ShapeId) {
        let is_selection = self.shapes.get(&container).is_some_and(Shape::is_active_selection);
        if is_selection {
            self.exit_container(member);
        }
        if let Some(list) = self.shapes.get_mut(&container).and_then(|c| c.kind.contents_mut()) {
            list.retain(|other| *other != member);
        }
        if let Some(shape) = self.shapes.get_mut(&member) {
            shape.group = None;
        }
        if is_selection && self.contents(container).is_some_and(|c| !c.is_empty()) {
            self.relayout(container);
        }
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Stack of top-level shapes, back to front.
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Top-level shapes, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn contents(&self, container: ShapeId) -> Option<&[ShapeId]> {
        self.shapes.get(&container).map(|shape| shape.kind.contents())
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.index
    }

    // ========================================================================
    // Z-order
    // ========================================================================

    pub fn z_index(&self, id: ShapeId) -> Option<usize> {
        self.order.iter().position(|other| *other == id)
    }

    pub fn is_in_front_of(&self, a: ShapeId, b: ShapeId) -> bool {
        matches!((self.z_index(a), self.z_index(b)), (Some(a), Some(b)) if a > b)
    }

    /// Ids of `ids` that are in the stack, back to front.
    fn stacked(&self, ids: &[ShapeId]) -> Vec<ShapeId> {
        let wanted: HashSet<ShapeId> = ids.iter().copied().collect();
        self.order.iter().copied().filter(|id| wanted.contains(id)).collect()
    }

    fn restack(&mut self, id: ShapeId, to_front: bool) -> bool {
        let moving = match self.shapes.get(&id) {
            Some(shape) if shape.is_active_selection() => self.stacked(shape.kind.contents()),
            Some(_) => self.stacked(&[id]),
            None => return false,
        };
        if moving.is_empty() {
            return false;
        }
        self.order.retain(|other| !moving.contains(other));
        if to_front {
            self.order.extend(moving);
        } else {
            self.order.splice(0..0, moving);
        }
        true
    }

    /// Move a shape (or every member of a selection) to the top of the stack.
    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        self.restack(id, true)
    }

    pub fn send_to_back(&mut self, id: ShapeId) -> bool {
        self.restack(id, false)
    }

    // ========================================================================
    // Planes
    // ========================================================================

    pub fn calc_own_matrix(&self, id: ShapeId) -> AffineMatrix {
        self.shapes.get(&id).map(Shape::own_matrix).unwrap_or_default()
    }

    /// Maps the shape's local plane to the scene, ancestors included.
    pub fn calc_transform_matrix(&self, id: ShapeId) -> AffineMatrix {
        let Some(shape) = self.shapes.get(&id) else {
            return AffineMatrix::IDENTITY;
        };
        let mut matrix = shape.own_matrix();
        let mut parent = shape.group;
        while let Some(container) = parent.and_then(|pid| self.shapes.get(&pid)) {
            matrix = container.own_matrix() * matrix;
            parent = container.group;
        }
        matrix
    }

    /// Own matrices of the shape's containers, outermost first.
    pub fn plane_stack(&self, id: ShapeId) -> Vec<AffineMatrix> {
        let mut stack = Vec::new();
        let mut parent = self.shapes.get(&id).and_then(|shape| shape.group);
        while let Some(container) = parent.and_then(|pid| self.shapes.get(&pid)) {
            stack.push(container.own_matrix());
            parent = container.group;
        }
        stack.reverse();
        stack
    }

    /// Matrix of the plane the shape's own properties are expressed in;
    /// `None` for the scene plane.
    pub fn parent_matrix(&self, id: ShapeId) -> Option<AffineMatrix> {
        let parent = self.shapes.get(&id)?.group?;
        Some(self.calc_transform_matrix(parent))
    }

    pub fn total_angle(&self, id: ShapeId) -> f64 {
        self.calc_transform_matrix(id).decompose().angle
    }

    pub fn is_descendant_of(&self, id: ShapeId, ancestor: ShapeId) -> bool {
        let mut parent = self.shapes.get(&id).and_then(|shape| shape.group);
        while let Some(pid) = parent {
            if pid == ancestor {
                return true;
            }
            parent = self.shapes.get(&pid).and_then(|shape| shape.group);
        }
        false
    }

    // ========================================================================
    // Coordinates
    // ========================================================================

    pub fn viewport_transform(&self) -> AffineMatrix {
        self.viewport_transform
    }

    /// Replace the viewport transform and refresh every control position.
    pub fn set_viewport_transform(&mut self, transform: AffineMatrix) {
        self.viewport_transform = transform;
        self.set_coords_all();
    }

    pub fn zoom(&self) -> f64 {
        let vpt = self.viewport_transform;
        (vpt.a * vpt.a + vpt.b * vpt.b).sqrt()
    }

    fn is_stacked(&self, shape: &Shape) -> bool {
        match shape.group {
            None => !shape.is_active_selection(),
            Some(container) => self.shapes.get(&container).is_some_and(Shape::is_active_selection),
        }
    }

    /// Recompute scene corners and control geometry for a shape and its
    /// descendants, and refresh the spatial index.
    pub fn set_coords(&mut self, id: ShapeId) {
        let Some(shape) = self.shapes.get(&id) else {
            return;
        };
        let world = self.calc_transform_matrix(id);
        let size = shape.size();
        let a_coords = BOX_CORNERS.map(|corner| world.transform_point(corner * size));

        let vpt = self.viewport_transform;
        let zoom = self.zoom();
        let options = world.decompose();
        let viewport_angle = options.angle + vpt.decompose().angle;
        let dimensions = dimensions_through(
            &AffineMatrix::dimensions(options.scale_x, options.scale_y, options.skew_x, 0.0),
            size,
        ) * zoom
            + Point::splat(2.0 * shape.padding);
        let final_matrix = AffineMatrix::from_translation(vpt.transform_point(world.translation()))
            * AffineMatrix::from_rotation(viewport_angle);

        let corner_size = shape.corner_size.unwrap_or(self.corner_size);
        let touch_corner_size = shape.touch_corner_size.unwrap_or(self.touch_corner_size);
        let o_coords: Vec<ControlCoords> = shape
            .controls()
            .iter()
            .map(|(key, control)| {
                let position = control.position_handler(dimensions, &final_matrix);
                ControlCoords {
                    key: key.to_string(),
                    position,
                    corner: Control::corner_polygon(
                        position,
                        control.size.unwrap_or(corner_size),
                        viewport_angle,
                    ),
                    touch_corner: Control::corner_polygon(
                        position,
                        control.touch_size.unwrap_or(touch_corner_size),
                        viewport_angle,
                    ),
                }
            })
            .collect();
        let stacked = self.is_stacked(shape);
        let contents = shape.kind.contents().to_vec();

        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.a_coords = a_coords;
            shape.o_coords = o_coords;
        }
        if stacked {
            self.index.update(id, Rect::from_points(a_coords));
        }
        for child in contents {
            self.set_coords(child);
        }
    }

    pub fn set_coords_all(&mut self) {
        let roots: Vec<ShapeId> = self
            .shapes
            .values()
            .filter(|shape| shape.group.is_none())
            .map(Shape::id)
            .collect();
        for id in roots {
            self.set_coords(id);
        }
    }

    // ========================================================================
    // Hit testing
    // ========================================================================

    pub fn check_target(&self, id: ShapeId, scene_point: Point) -> bool {
        self.shapes.get(&id).is_some_and(|shape| {
            shape.visible && shape.evented && shape.contains_point(scene_point)
        })
    }

    /// Topmost hit among `candidates` (back to front), plus nested hits for
    /// containers with `sub_target_check`, innermost first.
    pub fn search_possible_targets(
        &self,
        candidates: &[ShapeId],
        scene_point: Point) -> (Option<ShapeId>,
        Vec<ShapeId>,
    ) {
        let mut sub_targets = Vec::new();
        let target = self.search_targets_into(candidates, scene_point, &mut sub_targets);
        (target, sub_targets)
    }

    fn search_targets_into(
        &self,
        candidates: &[ShapeId],
        scene_point: Point,
        sub_targets: &mut Vec<ShapeId>,
    ) -> Option<ShapeId> {
        let id = candidates.iter().rev().copied().find(|id| self.check_target(*id, scene_point))?;
        if let Some(shape) = self.shapes.get(&id) {
            if shape.kind.is_container() && shape.sub_target_check {
                let contents = shape.kind.contents();
                if let Some(sub) = self.search_targets_into(contents, scene_point, sub_targets) {
                    sub_targets.push(sub);
                }
            }
        }
        Some(id)
    }

    /// Hit test the stack, using the spatial index as the broad phase.
    pub fn find_top_level_target(&self, scene_point: Point) -> (Option<ShapeId>, Vec<ShapeId>) {
        let hits: HashSet<ShapeId> = self.index.query_point(scene_point).into_iter().collect();
        if hits.is_empty() {
            return (None, Vec::new());
        }
        let candidates: Vec<ShapeId> =
            self.order.iter().copied().filter(|id| hits.contains(id)).collect();
        self.search_possible_targets(&candidates, scene_point)
    }

    /// Selectable, visible stacked shapes touched by the rectangle, topmost first.
    ///
    /// With `include_intersecting` unset only fully contained shapes count.
    pub fn collect_objects(
        &self,
        tl: Point,
        br: Point,
        include_intersecting: bool,
    ) -> Vec<ShapeId> {
        let hits: HashSet<ShapeId> = self.index.query_rect(tl, br).into_iter().collect();
        self.order
            .iter()
            .rev()
            .copied()
            .filter(|id| hits.contains(id))
            .filter(|id| {
                let Some(shape) = self.shapes.get(id) else {
                    return false;
                };
                shape.selectable
                    && shape.visible
                    && ((include_intersecting && shape.intersects_with_rect(tl, br))
                        || shape.is_contained_within_rect(tl, br)
                        || (include_intersecting && shape.contains_point(tl))
                        || (include_intersecting && shape.contains_point(br)))
            })
            .collect()
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// Move a member into its container's plane, keeping its scene placement.
    fn enter_container(&mut self, container: ShapeId, member: ShapeId) {
        let world = self.calc_transform_matrix(member);
        let container_world = self.calc_transform_matrix(container);
        let local = container_world.invert() * world;
        if let Some(shape) = self.shapes.get_mut(&member) {
            shape.apply_transform_options(&local.decompose());
            shape.group = Some(container);
        }
    }

    /// Move a member into the plane of its container's parent.
    fn exit_container(&mut self, member: ShapeId) {
        let Some(container) = self.shapes.get(&member).and_then(|shape| shape.group) else {
            return;
        };
        let world = self.calc_transform_matrix(member);
        let parent = self.shapes.get(&container).and_then(|shape| shape.group);
        let local = match parent {
            Some(parent) => self.calc_transform_matrix(parent).invert() * world,
            None => world,
        };
        if let Some(shape) = self.shapes.get_mut(&member) {
            shape.apply_transform_options(&local.decompose());
            shape.group = parent;
        }
    }

    /// Size the container to the axis-aligned box of its contents, which
    /// must currently sit in the container's parent plane.
    fn fit_container(&mut self, container: ShapeId) {
        let contents = self.contents(container).map(<[ShapeId]>::to_vec).unwrap_or_default();
        let corners: Vec<Point> = contents
            .iter()
            .filter_map(|id| self.shapes.get(id))
            .flat_map(|shape| {
                let matrix = shape.own_matrix();
                let size = shape.size();
                BOX_CORNERS.map(|corner| matrix.transform_point(corner * size))
            })
            .collect();
        let bounds = Rect::from_points(corners);
        if let Some(shape) = self.shapes.get_mut(&container) {
            shape.position = bounds.center();
            shape.width = bounds.width;
            shape.height = bounds.height;
            shape.angle = 0.0;
            shape.scale_x = 1.0;
            shape.scale_y = 1.0;
            shape.skew_x = 0.0;
            shape.skew_y = 0.0;
        }
    }

    /// Refit a container around its contents without moving them.
    pub fn relayout(&mut self, container: ShapeId) {
        let contents = self.contents(container).map(<[ShapeId]>::to_vec).unwrap_or_default();
        for member in &contents {
            self.exit_container(*member);
        }
        self.fit_container(container);
        for member in &contents {
            self.enter_container(container, *member);
        }
        self.set_coords(container);
    }

    fn check_free(&self, ids: &[ShapeId]) -> CanvasResult<()> {
        if ids.is_empty() {
            return Err(CanvasError::EmptyGroup);
        }
        for id in ids {
            let shape = self.shapes.get(id).ok_or(CanvasError::UnknownShape(*id))?;
            if shape.group.is_some() {
                return Err(CanvasError::AlreadyInContainer(*id));
            }
        }
        Ok(())
    }

    fn insert_container(&mut self, kind: ShapeKind, members: &[ShapeId]) -> ShapeId {
        self.next_id += 1;
        let id = self.next_id;
        let mut shape = Shape::new(kind, 0.0, 0.0);
        shape.id = id;
        if let Some(list) = shape.kind.contents_mut() {
            list.extend_from_slice(members);
        }
        self.shapes.insert(id, shape);
        self.fit_container(id);
        for member in members {
            self.enter_container(id, *member);
        }
        id
    }

    /// Group top-level shapes permanently. The group takes the stack slot
    /// of its topmost child.
    pub fn add_group(&mut self, children: &[ShapeId]) -> CanvasResult<ShapeId> {
        self.check_free(children)?;
        let children = self.stacked(children);
        if children.is_empty() {
            return Err(CanvasError::EmptyGroup);
        }
        let slot = children
            .iter()
            .filter_map(|id| self.z_index(*id))
            .max()
            .map_or(self.order.len(), |top| top + 1 - children.len());

        let id = self.insert_container(ShapeKind::Group { children: Vec::new() }, &children);
        self.order.retain(|other| !children.contains(other));
        for child in &children {
            self.index.remove(*child);
        }
        self.order.insert(slot.min(self.order.len()), id);
        self.set_coords(id);
        tracing::debug!(group_id = id, children = children.len(), "Group created");
        Ok(id)
    }

    /// Wrap top-level shapes in a transient selection. Members keep their
    /// stack slots and are listed in stack order.
    pub fn create_selection(&mut self, members: &[ShapeId]) -> CanvasResult<ShapeId> {
        self.check_free(members)?;
        let members = self.stacked(members);
        if members.is_empty() {
            return Err(CanvasError::EmptyGroup);
        }
        let kind = ShapeKind::ActiveSelection { members: Vec::new() };
        let id = self.insert_container(kind, &members);
        self.set_coords(id);
        Ok(id)
    }

    /// Add a top-level shape to a selection, keeping stack order.
    pub fn selection_add(&mut self, selection: ShapeId, member: ShapeId) -> CanvasResult<()> {
        self.selection_members(selection)?;
        self.check_free(&[member])?;
        let mut members = self.contents(selection).map(<[ShapeId]>::to_vec).unwrap_or_default();
        members.push(member);
        let members = self.stacked(&members);
        for existing in self.contents(selection).map(<[ShapeId]>::to_vec).unwrap_or_default() {
            self.exit_container(existing);
        }
        if let Some(list) = self.shapes.get_mut(&selection).and_then(|s| s.kind.contents_mut()) {
            *list = members.clone();
        }
        self.fit_container(selection);
        for member in &members {
            self.enter_container(selection, *member);
        }
        self.set_coords(selection);
        Ok(())
    }

    /// Release one member back to the scene.
    pub fn selection_remove(&mut self, selection: ShapeId, member: ShapeId) -> CanvasResult<()> {
        let members = self.selection_members(selection)?;
        if !members.contains(&member) {
            return Err(CanvasError::UnknownShape(member));
        }
        self.detach_from_container(selection, member);
        self.set_coords(member);
        Ok(())
    }

    /// Release every member and delete the selection wrapper.
    pub fn dissolve_selection(&mut self, selection: ShapeId) -> CanvasResult<Vec<ShapeId>> {
        let members = self.selection_members(selection)?;
        self.remove(selection)?;
        Ok(members)
    }

    pub fn selection_members(&self, selection: ShapeId) -> CanvasResult<Vec<ShapeId>> {
        match self.shapes.get(&selection).map(|shape| &shape.kind) {
            Some(ShapeKind::ActiveSelection { members }) => Ok(members.clone()),
            Some(_) => Err(CanvasError::NotAContainer(selection)),
            None => Err(CanvasError::UnknownShape(selection)),
        }
    }
}
