//! Camera and orbit-controller state.
//!
//! The host owns camera creation and the actual controller input
//! handling; the engine reads the camera pose for label sizing and
//! writes pose/bound fields when entering or leaving the fixed
//! viewpoint.

use glam::Vec3;

/// Perspective camera pose, as read and written by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    /// Viewport width / height
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 50_000.0, -120_000.0),
            target: Vec3::ZERO,
            fov_y_deg: 45.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Normalized view direction.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }
}

/// Mutable state of the host's orbit camera controller.
///
/// Only the fields the engine touches are modeled: interaction
/// toggles, the orbit target, and the zoom (dolly distance) bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitController {
    pub enabled: bool,
    pub pan_enabled: bool,
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self {
            enabled: true,
            pan_enabled: true,
            target: Vec3::ZERO,
            min_distance: 100.0,
            max_distance: 500_000.0,
        }
    }
}
