//! Distance-adaptive label sizing.
//!
//! Every text billboard in the scene registers here once. Each frame
//! the registry rescales all registered labels against the current
//! camera so on-screen text stays roughly constant in size, clamped to
//! a floor and ceiling in world units.

use crate::config::LabelConfig;
use crate::scene::{Camera, NodeId, SceneGraph};
use std::collections::HashMap;

/// Identifies a registered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u64);

/// A registered label billboard.
#[derive(Debug, Clone, Copy)]
struct LabelEntry {
    node: NodeId,
    /// Per-label scale factor applied to both the base size and the clamp bounds
    size_multiplier: f32,
    /// Width / height of the rasterized text, fixed at creation
    aspect: f32,
}

/// Registry of labels subject to distance-adaptive sizing.
///
/// Labels that should not be shown are hidden through their node's
/// visibility flag; entries are only removed when the owning actor is
/// disposed or on full teardown.
#[derive(Debug, Default)]
pub struct LabelRegistry {
    entries: HashMap<LabelId, LabelEntry>,
    next: u64,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a label node for per-frame rescaling.
    pub fn register(&mut self, node: NodeId, size_multiplier: f32, aspect: f32) -> LabelId {
        let id = LabelId(self.next);
        self.next += 1;
        self.entries.insert(
            id,
            LabelEntry {
                node,
                size_multiplier,
                aspect,
            },
        );
        id
    }

    /// Drops a label entry. The node itself is the caller's to dispose.
    pub fn remove(&mut self, id: LabelId) {
        self.entries.remove(&id);
    }

    /// Rescales every registered label against the camera.
    ///
    /// World height is proportional to camera distance so the label's
    /// projected size stays near constant, clamped to
    /// `[min_height * m, max_height * m]`. Width follows the aspect
    /// ratio captured when the text was rasterized.
    pub fn update(&self, scene: &mut SceneGraph, camera: &Camera, config: &LabelConfig) {
        for entry in self.entries.values() {
            let position = scene.world_position(entry.node);
            let distance = (camera.position - position).length();
            let m = entry.size_multiplier;
            let height = (distance * config.base_screen_factor * m)
                .clamp(config.min_height_m * m, config.max_height_m * m);
            if let Some(node) = scene.node_mut(entry.node) {
                node.scale = glam::Vec3::new(height * entry.aspect, height, 1.0);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full teardown. Nodes are disposed by the scene, not here.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
