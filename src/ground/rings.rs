//! Concentric range rings with distance labels.

use crate::config::RingConfig;
use crate::labels::LabelRegistry;
use crate::scene::{NodeId, SceneGraph, TextRasterizer};
use glam::Vec3;

use super::placement::{horizontal_direction, ClipPlane};

/// One ring and its pair of distance labels.
#[derive(Debug)]
struct RingEntry {
    radius_m: f32,
    ring: NodeId,
    front_label: NodeId,
    back_label: NodeId,
}

/// Concentric distance rings whose labels track the coverage axis.
///
/// Every radius gets a front label just beyond the ring along the
/// horizontal coverage direction. Only the smallest radius also shows
/// a back label on the opposite side; the others keep theirs hidden
/// permanently (labels are hidden, never unregistered).
#[derive(Debug)]
pub struct RangeRings {
    group: NodeId,
    entries: Vec<RingEntry>,
    /// Index of the designated (smallest) radius
    smallest: usize,
    config: RingConfig,
    clip_planes: [ClipPlane; 4],
}

fn format_distance(radius_m: f32) -> String {
    if radius_m >= 1_000.0 {
        format!("{:.0} km", radius_m / 1_000.0)
    } else {
        format!("{radius_m:.0} m")
    }
}

impl RangeRings {
    pub fn new(
        scene: &mut SceneGraph,
        labels: &mut LabelRegistry,
        rasterizer: &dyn TextRasterizer,
        config: RingConfig,
    ) -> Self {
        let group = scene.create_node("range_rings");

        let mut entries = Vec::with_capacity(config.radii_m.len());
        for &radius_m in &config.radii_m {
            let ring = scene.create_child(group, &format!("ring:{radius_m}"));
            let ring_geometry = scene.alloc_geometry();
            if let Some(node) = scene.node_mut(ring) {
                node.geometry = Some(ring_geometry);
                node.scale = Vec3::splat(radius_m);
            }

            let text = format_distance(radius_m);
            let front_label = Self::make_label(scene, labels, rasterizer, group, &text, &config);
            let back_label = Self::make_label(scene, labels, rasterizer, group, &text, &config);

            entries.push(RingEntry {
                radius_m,
                ring,
                front_label,
                back_label,
            });
        }

        let smallest = entries
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.radius_m.total_cmp(&b.radius_m))
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut rings = Self {
            group,
            entries,
            smallest,
            config,
            clip_planes: [ClipPlane::new(Vec3::Y, 0.0); 4],
        };
        rings.update_label_positions(scene, Vec3::Z);
        rings
    }

    fn make_label(
        scene: &mut SceneGraph,
        labels: &mut LabelRegistry,
        rasterizer: &dyn TextRasterizer,
        group: NodeId,
        text: &str,
        config: &RingConfig,
    ) -> NodeId {
        let node = scene.create_child(group, &format!("ring_label:{text}"));
        let texture = rasterizer.rasterize(text, scene);
        let geometry = scene.alloc_geometry();
        if let Some(n) = scene.node_mut(node) {
            n.geometry = Some(geometry);
            n.texture = Some(texture.texture);
        }
        labels.register(node, config.label_size_multiplier, texture.aspect);
        node
    }

    /// Recomputes every label position from the coverage direction.
    pub fn update_label_positions(&mut self, scene: &mut SceneGraph, coverage_dir: Vec3) {
        let forward = horizontal_direction(coverage_dir);

        for (index, entry) in self.entries.iter().enumerate() {
            let offset = entry.radius_m + self.config.label_offset_m;
            if let Some(node) = scene.node_mut(entry.front_label) {
                node.position = forward * offset;
            }
            if let Some(node) = scene.node_mut(entry.back_label) {
                node.position = -forward * offset;
                node.visible = index == self.smallest;
            }
        }
    }

    /// Adopts the ground footprint planes so rings never render
    /// outside the visible ground extent.
    pub fn set_clip_planes(&mut self, planes: &[ClipPlane; 4]) {
        self.clip_planes = *planes;
    }

    pub fn clip_planes(&self) -> &[ClipPlane; 4] {
        &self.clip_planes
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn ring_count(&self) -> usize {
        self.entries.len()
    }

    /// Ring circle nodes, for host-side styling.
    pub fn ring_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.ring)
    }

    #[cfg(test)]
    fn entry(&self, index: usize) -> (&RingEntry, NodeId, NodeId) {
        let e = &self.entries[index];
        (e, e.front_label, e.back_label)
    }
}
