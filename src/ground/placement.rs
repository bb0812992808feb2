//! Ground square placement and clipping.

use crate::config::GroundConfig;
use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;

/// Half-space clipping plane: a point is kept when
/// `normal . p + constant >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub normal: Vec3,
    pub constant: f32,
}

impl ClipPlane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self { normal, constant }
    }

    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }
}

/// Horizontal projection of a direction, normalized.
///
/// A coverage direction pointing straight up or down has no horizontal
/// component to project; the north axis is substituted so placement
/// always has a well-defined forward axis. Recovered locally, never an
/// error.
pub fn horizontal_direction(dir: Vec3) -> Vec3 {
    let h = Vec3::new(dir.x, 0.0, dir.z);
    if h.length_squared() < 1e-12 {
        log::warn!("horizontal_direction: near-vertical input, falling back to north");
        return Vec3::Z;
    }
    h.normalize()
}

/// Positions the ground square relative to the coverage direction.
///
/// The square keeps `back_margin_m` of ground behind the origin along
/// the projected coverage axis and extends the rest ahead. Its four
/// bounding half-spaces are recomputed on every update and shared with
/// the ring overlays so nothing renders past the visible ground.
#[derive(Debug)]
pub struct GroundPlacement {
    node: NodeId,
    config: GroundConfig,
    center: Vec3,
    clip_planes: [ClipPlane; 4],
}

impl GroundPlacement {
    pub fn new(scene: &mut SceneGraph, config: GroundConfig) -> Self {
        let node = scene.create_node("ground");
        let geometry = scene.alloc_geometry();
        if let Some(n) = scene.node_mut(node) {
            n.geometry = Some(geometry);
        }
        let mut placement = Self {
            node,
            config,
            center: Vec3::ZERO,
            clip_planes: [ClipPlane::new(Vec3::Y, 0.0); 4],
        };
        placement.update(scene, Vec3::Z);
        placement
    }

    /// Re-derives center and clip planes from the coverage direction.
    pub fn update(&mut self, scene: &mut SceneGraph, coverage_dir: Vec3) {
        let forward = horizontal_direction(coverage_dir);
        let side = Vec3::Y.cross(forward);

        let half = self.config.size_m / 2.0;
        let back = self.config.back_margin_m;
        let ahead = self.config.size_m - back;

        self.center = forward * (half - back);
        if let Some(node) = scene.node_mut(self.node) {
            node.position = self.center;
        }

        self.clip_planes = [
            // Behind the origin: forward . p >= -back
            ClipPlane::new(forward, back),
            // Ahead of the origin: forward . p <= ahead
            ClipPlane::new(-forward, ahead),
            // Sides, half the square each way
            ClipPlane::new(side, half),
            ClipPlane::new(-side, half),
        ];
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn clip_planes(&self) -> &[ClipPlane; 4] {
        &self.clip_planes
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement() -> (SceneGraph, GroundPlacement) {
        let mut scene = SceneGraph::new();
        let placement = GroundPlacement::new(
            &mut scene,
            GroundConfig {
                size_m: 400_000.0,
                back_margin_m: 50_000.0,
            },
        );
        (scene, placement)
    }

    #[test]
    fn test_eastward_coverage_offsets_center_east() {
        let (mut scene, mut ground) = placement();
        ground.update(&mut scene, Vec3::X);
        assert!((ground.center() - Vec3::new(150_000.0, 0.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_clip_planes_bound_square_footprint() {
        let (mut scene, mut ground) = placement();
        ground.update(&mut scene, Vec3::X);

        let inside = |p: Vec3| ground.clip_planes().iter().all(|c| c.contains(p));

        assert!(inside(Vec3::new(-49_999.0, 0.0, 0.0)));
        assert!(inside(Vec3::new(349_999.0, 0.0, 0.0)));
        assert!(!inside(Vec3::new(-50_001.0, 0.0, 0.0)));
        assert!(!inside(Vec3::new(350_001.0, 0.0, 0.0)));
        assert!(inside(Vec3::new(0.0, 0.0, 199_999.0)));
        assert!(!inside(Vec3::new(0.0, 0.0, 200_001.0)));
    }

    #[test]
    fn test_vertical_coverage_falls_back_to_north() {
        let (mut scene, mut ground) = placement();
        ground.update(&mut scene, Vec3::Y);
        assert!((ground.center() - Vec3::new(0.0, 0.0, 150_000.0)).length() < 1e-3);
    }

    #[test]
    fn test_elevated_direction_uses_horizontal_projection() {
        let (mut scene, mut ground) = placement();
        // 45 degrees up toward east: horizontal part is pure east.
        ground.update(&mut scene, Vec3::new(1.0, 1.0, 0.0).normalize());
        assert!((ground.center() - Vec3::new(150_000.0, 0.0, 0.0)).length() < 1e-2);
    }
}
