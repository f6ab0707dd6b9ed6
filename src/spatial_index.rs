//! Spatial Index Module
//!
//! R-tree over the axis-aligned bounds of top-level shapes. Used as the
//! broad phase of hit testing and lasso collection; exact polygon tests
//! run on the candidates it returns.

use crate::geometry::{Point, Rect};
use crate::scene::ShapeId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A shape's scene-space bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub shape_id: ShapeId,
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl SpatialEntry {
    pub fn new(shape_id: ShapeId, bounds: Rect) -> Self {
        Self {
            shape_id,
            min: [bounds.left, bounds.top],
            max: [bounds.left + bounds.width, bounds.top + bounds.height],
        }
    }

    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min[0]
            && point.x <= self.max[0]
            && point.y >= self.min[1]
            && point.y <= self.max[1]
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.shape_id == other.shape_id
    }
}

/// Spatial index for top-level shapes.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ShapeId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or move a shape's bounds.
    pub fn update(&mut self, shape_id: ShapeId, bounds: Rect) {
        self.remove(shape_id);
        let entry = SpatialEntry::new(shape_id, bounds);
        self.tree.insert(entry);
        self.entries.insert(shape_id, entry);
    }

    pub fn remove(&mut self, shape_id: ShapeId) -> bool {
        if let Some(entry) = self.entries.remove(&shape_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, shape_id: ShapeId) -> bool {
        self.entries.contains_key(&shape_id)
    }

    /// Shapes whose bounds contain the point.
    pub fn query_point(&self, point: Point) -> Vec<ShapeId> {
        let envelope = AABB::from_point([point.x, point.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.contains_point(point))
            .map(|entry| entry.shape_id)
            .collect()
    }

    /// Shapes whose bounds touch the rectangle spanned by two corners.
    pub fn query_rect(&self, a: Point, b: Point) -> Vec<ShapeId> {
        let min = a.min(b);
        let max = a.max(b);
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.shape_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
