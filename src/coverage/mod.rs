//! Sensor coverage volume.
//!
//! A cone with its apex at the local origin depicts the sensor's
//! field of view. Orientation comes in as azimuth (degrees clockwise
//! from north) and elevation (degrees above the horizontal); the cone
//! geometry is built once and only its rotation changes afterwards.

use crate::config::CoverageConfig;
use crate::ground::ClipPlane;
use crate::scene::{NodeId, SceneGraph};
use glam::{Quat, Vec3};

/// Cone axis when azimuth and elevation are both zero: due north.
pub const DEFAULT_AXIS: Vec3 = Vec3::Z;

/// Converts spherical pointing angles to a unit direction vector.
///
/// Frame is (x = east, y = up, z = north); azimuth 0 points north,
/// azimuth 90 east, elevation 90 straight up. The result is always
/// unit length.
pub fn direction_from_angles(azimuth_deg: f32, elevation_deg: f32) -> Vec3 {
    let az = azimuth_deg.to_radians();
    let el = elevation_deg.to_radians();
    Vec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos()).normalize()
}

/// The coverage cone in the scene.
///
/// Single writer of the shared coverage direction; placement and ring
/// subsystems read it after each orientation update.
#[derive(Debug)]
pub struct CoverageVolume {
    node: NodeId,
    dir: Vec3,
    config: CoverageConfig,
    /// Keeps the cone interior above ground level
    ground_clip: ClipPlane,
}

impl CoverageVolume {
    pub fn new(scene: &mut SceneGraph, config: CoverageConfig) -> Self {
        let node = scene.create_node("coverage");
        let geometry = scene.alloc_geometry();
        if let Some(n) = scene.node_mut(node) {
            n.geometry = Some(geometry);
        }
        Self {
            node,
            dir: DEFAULT_AXIS,
            config,
            ground_clip: ClipPlane::new(Vec3::Y, 0.0),
        }
    }

    /// Points the cone along the given azimuth and elevation.
    ///
    /// Idempotent and cheap: recomputes the unit direction and the
    /// shortest-arc rotation from the default axis; the geometry is
    /// never rebuilt.
    pub fn set_orientation(&mut self, scene: &mut SceneGraph, azimuth_deg: f32, elevation_deg: f32) {
        self.dir = direction_from_angles(azimuth_deg, elevation_deg);
        if let Some(node) = scene.node_mut(self.node) {
            node.rotation = Quat::from_rotation_arc(DEFAULT_AXIS, self.dir);
        }
    }

    /// Current coverage direction (unit length).
    pub fn direction(&self) -> Vec3 {
        self.dir
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn half_angle_deg(&self) -> f32 {
        self.config.half_angle_deg
    }

    pub fn range_m(&self) -> f32 {
        self.config.range_m
    }

    pub fn ground_clip(&self) -> ClipPlane {
        self.ground_clip
    }
}
