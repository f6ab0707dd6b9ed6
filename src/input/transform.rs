//! Canvas transformations - wheel, zoom, pan, coordinate conversion.

use super::PointerEvent;
use super::coords::{CoordinateContext, CoordinateConverter};
use crate::canvas::Canvas;
use crate::error::CanvasResult;
use crate::geometry::{AffineMatrix, Point};

impl Canvas {
    /// Pointer position in scene units.
    pub fn scene_point(&self, e: &PointerEvent) -> Point {
        let vpt = self.scene.viewport_transform();
        CoordinateConverter::viewport_to_scene(e.point, &CoordinateContext::new(&vpt))
    }

    /// Pointer position in viewport pixels.
    pub fn viewport_point(&self, e: &PointerEvent) -> Point {
        e.point
    }

    pub fn viewport_transform(&self) -> AffineMatrix {
        self.scene.viewport_transform()
    }

    /// Replace the viewport transform; control positions follow.
    pub fn set_viewport_transform(&mut self, transform: AffineMatrix) {
        self.scene.set_viewport_transform(transform);
        self.request_render_all();
    }

    pub fn zoom(&self) -> f64 {
        self.scene.zoom()
    }

    /// Zoom so that the viewport `point` keeps showing the same scene point.
    pub fn zoom_to_point(&mut self, point: Point, value: f64) {
        let vpt = self.scene.viewport_transform();
        let ctx = CoordinateContext::new(&vpt);
        let scene_point = CoordinateConverter::viewport_to_scene(point, &ctx);

        let mut next = vpt;
        next.a = value;
        next.d = value;
        let after = next.transform_point(scene_point);
        next.e += point.x - after.x;
        next.f += point.y - after.y;
        self.set_viewport_transform(next);
    }

    pub fn set_zoom(&mut self, value: f64) {
        self.zoom_to_point(Point::ZERO, value);
    }

    /// Place the viewport so that scene-space `point` sits at its top-left.
    pub fn absolute_pan(&mut self, point: Point) {
        let mut next = self.scene.viewport_transform();
        next.e = -point.x;
        next.f = -point.y;
        self.set_viewport_transform(next);
    }

    /// Move the viewport by `offset` viewport pixels.
    pub fn relative_pan(&mut self, offset: Point) {
        let vpt = self.scene.viewport_transform();
        self.absolute_pan(Point::new(-vpt.e - offset.x, -vpt.f - offset.y));
    }

    /// Wheel input only notifies; hosts decide whether it zooms or pans.
    pub fn on_wheel(&mut self, e: &PointerEvent) -> CanvasResult<()> {
        self.cache_event_target(e);
        self.handle_event(e, "wheel");
        self.take_failures()
    }
}
