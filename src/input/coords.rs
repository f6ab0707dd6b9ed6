//! Coordinate conversion utilities for canvas interactions.
//!
//! Pointer events arrive in viewport pixels; shapes live in scene units, or
//! in the local plane of the group that contains them. These helpers keep
//! the conversion formulas in one place.

use crate::geometry::{AffineMatrix, Point, send_point_to_plane};

/// Context needed for coordinate conversions
pub struct CoordinateContext<'a> {
    pub viewport_transform: &'a AffineMatrix,
}

impl<'a> CoordinateContext<'a> {
    #[inline]
    pub fn new(viewport_transform: &'a AffineMatrix) -> Self {
        Self { viewport_transform }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert viewport position to scene position
    #[inline]
    pub fn viewport_to_scene(viewport_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        ctx.viewport_transform.invert().transform_point(viewport_pos)
    }

    /// Convert scene position to viewport position
    #[inline]
    pub fn scene_to_viewport(scene_pos: Point, ctx: &CoordinateContext<'_>) -> Point {
        ctx.viewport_transform.transform_point(scene_pos)
    }

    /// Convert a viewport delta to scene units (pan and zoom ignored)
    #[inline]
    pub fn delta_viewport_to_scene(delta: Point, ctx: &CoordinateContext<'_>) -> Point {
        ctx.viewport_transform.invert().transform_vector(delta)
    }

    /// Express a scene point in the plane described by `parent`, the
    /// container's scene matrix (`None` for the scene itself)
    #[inline]
    pub fn scene_to_parent_plane(scene_pos: Point, parent: Option<&AffineMatrix>) -> Point {
        send_point_to_plane(scene_pos, None, parent)
    }
}
