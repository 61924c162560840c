//! View transform for panning and zooming the page.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom: the page at its natural size.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom.
pub const MAX_ZOOM: f64 = 5.0;

/// Camera maps document coordinates to screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen units
    pub offset: Vec2,
    /// Current zoom level
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: MIN_ZOOM,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to document transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Move the view so that `world_point` appears at `screen_point`.
    pub fn pin(&mut self, world_point: Point, screen_point: Point) {
        let current = self.world_to_screen(world_point);
        self.pan(screen_point - current);
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;
        self.pin(world_point, screen_point);
    }

    /// Width correction for device-independent strokes at the current zoom.
    pub fn density_correction(&self) -> f64 {
        1.0 / self.zoom
    }

    /// Reset camera to default position and zoom.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera_is_identity() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        assert_eq!(camera.screen_to_world(screen), screen);
        assert_eq!(camera.density_correction(), 1.0);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));
        assert!((back - original).hypot() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert_eq!(camera.zoom, MIN_ZOOM);

        camera.zoom_at(Point::ZERO, 1000.0);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_zoom_keeps_point_fixed() {
        let mut camera = Camera::new();
        let screen = Point::new(40.0, 60.0);
        let world = camera.screen_to_world(screen);
        camera.zoom_at(screen, 2.0);
        assert_eq!(camera.zoom, 2.0);
        assert!((camera.world_to_screen(world) - screen).hypot() < 1e-10);
    }

    #[test]
    fn test_pin() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.pin(Point::new(10.0, 10.0), Point::new(50.0, 50.0));
        assert!((camera.world_to_screen(Point::new(10.0, 10.0)) - Point::new(50.0, 50.0)).hypot() < 1e-10);
    }
}
