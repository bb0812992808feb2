//! Ray picking against scene objects.
//!
//! Pointer picks arrive as one explicit event per frame (a normalized
//! device coordinate); the engine builds a ray from the current camera
//! and tests it against the pickable marker. No callbacks, no captured
//! state.

use super::camera::Camera;
use glam::{Vec2, Vec3};

/// A world-space pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// Builds a ray through a normalized device coordinate.
    ///
    /// `ndc` is in [-1, 1] on both axes with +y up, the usual
    /// post-projection convention.
    pub fn from_camera(camera: &Camera, ndc: Vec2) -> Self {
        let forward = camera.forward();
        let right = Vec3::Y.cross(forward).normalize_or_zero();
        let up = forward.cross(right);

        let half_height = (camera.fov_y_deg.to_radians() / 2.0).tan();
        let half_width = half_height * camera.aspect;

        let dir = (forward + right * (ndc.x * half_width) + up * (ndc.y * half_height))
            .normalize_or_zero();

        Self {
            origin: camera.position,
            dir,
        }
    }

    /// Distance along the ray to a sphere hit, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let near = -b - disc.sqrt();
        if near >= 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: the exit point still counts.
        let far = -b + disc.sqrt();
        if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}
