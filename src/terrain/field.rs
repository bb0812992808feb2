//! Terrain field: mesh + scene node + anchoring.

use crate::config::TerrainConfig;
use crate::scene::{NodeId, SceneGraph};
use glam::Vec3;

use super::heightfield::{HeightfieldGrid, TerrainError};
use super::mesh::TerrainMesh;

/// The terrain instance placed in the scene.
///
/// Owns the deformable ground mesh and its scene node. Grids are bound
/// wholesale: procedural or loaded, the previous grid is replaced
/// entirely. Re-anchoring moves the whole mesh horizontally without
/// touching elevation data.
#[derive(Debug)]
pub struct TerrainField {
    node: NodeId,
    mesh: TerrainMesh,
    config: TerrainConfig,
}

impl TerrainField {
    pub fn new(scene: &mut SceneGraph, size_m: f32, config: TerrainConfig) -> Self {
        let node = scene.create_node("terrain");
        let geometry = scene.alloc_geometry();
        if let Some(n) = scene.node_mut(node) {
            n.geometry = Some(geometry);
        }
        let mesh = TerrainMesh::new(config.samples_per_side, size_m);
        Self { node, mesh, config }
    }

    /// Binds a heightfield grid to the mesh.
    pub fn bind(&mut self, grid: &HeightfieldGrid) -> Result<(), TerrainError> {
        self.mesh.bind_heights(grid, &self.config)
    }

    /// Moves the terrain to a horizontal offset from the local origin.
    pub fn re_anchor(&self, scene: &mut SceneGraph, east_m: f32, north_m: f32) {
        if let Some(node) = scene.node_mut(self.node) {
            node.position = Vec3::new(east_m, 0.0, north_m);
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }
}
