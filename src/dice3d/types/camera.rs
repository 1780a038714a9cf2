//! Camera-related types and components
//!
//! The tray is viewed through a fixed orthographic camera. Pointer rays are
//! rebuilt from its transform, frustum height, aspect ratio and zoom.

use bevy::math::Ray3d;
use bevy::prelude::*;

/// Where the camera sits, looking at the tray center
pub const CAMERA_EYE: Vec3 = Vec3::new(50.0, 50.0, 50.0);

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking the camera zoom factor (1.0 = default framing)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct TrayZoom {
    pub level: f32,
    pinch_distance: Option<f32>,
}

impl Default for TrayZoom {
    fn default() -> Self {
        Self {
            level: 1.0,
            pinch_distance: None,
        }
    }
}

impl TrayZoom {
    pub fn pinch_start(&mut self, distance: f32) {
        self.pinch_distance = (distance > 0.0).then_some(distance);
    }

    /// Scale the zoom by the change in finger distance since the last sample.
    pub fn pinch_move(&mut self, distance: f32, min: f32, max: f32) {
        let Some(previous) = self.pinch_distance else {
            self.pinch_start(distance);
            return;
        };
        if distance <= 0.0 {
            return;
        }
        self.level = (self.level * distance / previous).clamp(min, max);
        self.pinch_distance = Some(distance);
    }

    pub fn pinch_end(&mut self) {
        self.pinch_distance = None;
    }

    /// Mouse wheel zoom; positive deltas zoom in
    pub fn scroll(&mut self, delta: f32, min: f32, max: f32) {
        self.level = (self.level * 1.1_f32.powf(delta)).clamp(min, max);
    }

    /// Orthographic projection scale for this zoom level
    pub fn projection_scale(&self) -> f32 {
        1.0 / self.level
    }
}

/// Snapshot of the orthographic camera used to build pointer rays
#[derive(Debug, Clone, Copy)]
pub struct OrthoView {
    pub transform: Transform,
    /// Visible world height at zoom 1
    pub frustum_height: f32,
    /// Viewport width / height
    pub aspect: f32,
    pub zoom: f32,
}

impl OrthoView {
    /// Ray through a pointer position given in normalized device coordinates.
    ///
    /// Orthographic rays are parallel: the origin slides across the view
    /// plane and the direction is always the camera forward axis.
    pub fn ray_through(&self, ndc: Vec2) -> Ray3d {
        let half_height = self.frustum_height * 0.5 / self.zoom;
        let half_width = half_height * self.aspect;
        let origin = self.transform.translation
            + self.transform.right() * (ndc.x * half_width)
            + self.transform.up() * (ndc.y * half_height);

        Ray3d {
            origin,
            direction: self.transform.forward(),
        }
    }
}

/// Convert a window cursor position (logical pixels, top-left origin) to
/// normalized device coordinates in [-1, 1] with +Y up.
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        -(cursor.y / window_size.y) * 2.0 + 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_view() -> OrthoView {
        OrthoView {
            transform: Transform::from_translation(CAMERA_EYE).looking_at(Vec3::ZERO, Vec3::Y),
            frustum_height: 23.0,
            aspect: 16.0 / 9.0,
            zoom: 1.0,
        }
    }

    #[test]
    fn test_cursor_to_ndc_corners() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(cursor_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
        assert_eq!(cursor_to_ndc(size, size), Vec2::new(1.0, -1.0));
        assert_eq!(cursor_to_ndc(size * 0.5, size), Vec2::ZERO);
        assert_eq!(cursor_to_ndc(Vec2::ONE, Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_center_ray_points_at_origin() {
        let ray = default_view().ray_through(Vec2::ZERO);
        assert!((ray.origin - CAMERA_EYE).length() < 1e-4);
        let expected = Vec3::NEG_ONE.normalize();
        assert!((*ray.direction - expected).length() < 1e-4);
    }

    #[test]
    fn test_rays_are_parallel_and_offset_by_zoom() {
        let view = default_view();
        let a = view.ray_through(Vec2::new(0.0, 1.0));
        let b = view.ray_through(Vec2::new(0.0, -1.0));
        assert!((*a.direction - *b.direction).length() < 1e-6);
        assert!(((a.origin - b.origin).length() - 23.0).abs() < 1e-3);

        let zoomed = OrthoView { zoom: 2.0, ..view };
        let c = zoomed.ray_through(Vec2::new(0.0, 1.0));
        let d = zoomed.ray_through(Vec2::new(0.0, -1.0));
        assert!(((c.origin - d.origin).length() - 11.5).abs() < 1e-3);
    }

    #[test]
    fn test_pinch_zoom_is_clamped() {
        let mut zoom = TrayZoom::default();
        zoom.pinch_start(100.0);
        zoom.pinch_move(200.0, 0.5, 3.0);
        assert!((zoom.level - 2.0).abs() < 1e-6);
        zoom.pinch_move(1000.0, 0.5, 3.0);
        assert_eq!(zoom.level, 3.0);
        zoom.pinch_move(10.0, 0.5, 3.0);
        assert_eq!(zoom.level, 0.5);
        zoom.pinch_end();

        // Without a start sample the first move only records the distance.
        zoom.pinch_move(50.0, 0.5, 3.0);
        assert_eq!(zoom.level, 0.5);
    }

    #[test]
    fn test_scroll_zoom() {
        let mut zoom = TrayZoom::default();
        zoom.scroll(1.0, 0.5, 3.0);
        assert!(zoom.level > 1.0);
        zoom.scroll(-100.0, 0.5, 3.0);
        assert_eq!(zoom.level, 0.5);
        assert_eq!(zoom.projection_scale(), 2.0);
    }
}
