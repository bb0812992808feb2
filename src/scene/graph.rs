//! Node arena with explicit resource accounting.
//!
//! Nodes form a translation-only hierarchy: a node's world position is
//! its position plus its ancestors' positions. Rotation and scale apply
//! to the node's own drawable, not to its children; every grouping
//! node in the engine is an unrotated carrier, which keeps world-space
//! queries trivial and deterministic.

use glam::{Quat, Vec3};
use std::collections::{HashMap, HashSet};

/// Identifies a live scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Handle to a geometry buffer owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

/// Handle to a texture owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

/// A single scene node.
#[derive(Debug)]
pub struct Node {
    /// Debug name, used only in log output
    pub name: String,
    /// Position relative to the parent (world position for roots)
    pub position: Vec3,
    /// Orientation of this node's drawable
    pub rotation: Quat,
    /// Scale of this node's drawable
    pub scale: Vec3,
    /// Hidden nodes (and their subtrees) are skipped by the renderer
    pub visible: bool,
    /// Geometry drawn at this node, if any
    pub geometry: Option<GeometryHandle>,
    /// Texture applied to this node's drawable, if any
    pub texture: Option<TextureHandle>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(name: String) -> Self {
        Self {
            name,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            visible: true,
            geometry: None,
            texture: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena of scene nodes plus a ledger of live GPU resources.
///
/// Resource handles are allocated here and released when their owning
/// node is disposed, so tests can assert that removing an actor (or
/// tearing the scene down) leaks nothing.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    next_node: u64,
    next_resource: u64,
    geometries: HashSet<GeometryHandle>,
    textures: HashSet<TextureHandle>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached root-level node.
    pub fn create_node(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        self.nodes.insert(id, Node::new(name.to_string()));
        id
    }

    /// Creates a node attached under `parent`.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        let id = self.create_node(name);
        self.attach(id, parent);
        id
    }

    /// Re-parents `child` under `parent`.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    /// Detaches `child` from its parent, leaving it root-level.
    pub fn detach(&mut self, child: NodeId) {
        let parent = self.nodes.get(&child).and_then(|n| n.parent);
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// World position of a node (sum of positions up the chain).
    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut pos = Vec3::ZERO;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.nodes.get(&current) {
                Some(node) => {
                    pos += node.position;
                    cursor = node.parent;
                }
                None => break,
            }
        }
        pos
    }

    /// Allocates a geometry handle tracked by this graph.
    pub fn alloc_geometry(&mut self) -> GeometryHandle {
        let handle = GeometryHandle(self.next_resource);
        self.next_resource += 1;
        self.geometries.insert(handle);
        handle
    }

    /// Allocates a texture handle tracked by this graph.
    pub fn alloc_texture(&mut self) -> TextureHandle {
        let handle = TextureHandle(self.next_resource);
        self.next_resource += 1;
        self.textures.insert(handle);
        handle
    }

    /// Releases a texture handle that is no longer attached anywhere.
    pub fn release_texture(&mut self, handle: TextureHandle) {
        self.textures.remove(&handle);
    }

    /// Removes `id` and its whole subtree, releasing attached resources.
    pub fn dispose(&mut self, id: NodeId) {
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                if let Some(g) = node.geometry {
                    self.geometries.remove(&g);
                }
                if let Some(t) = node.texture {
                    self.textures.remove(&t);
                }
                stack.extend(node.children);
            }
        }
    }

    /// Removes every node and releases every resource.
    pub fn clear(&mut self) {
        log::debug!(
            "SceneGraph: clearing {} nodes, {} geometries, {} textures",
            self.nodes.len(),
            self.geometries.len(),
            self.textures.len()
        );
        self.nodes.clear();
        self.geometries.clear();
        self.textures.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of geometry buffers currently alive.
    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Number of textures currently alive.
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_position_sums_ancestry() {
        let mut scene = SceneGraph::new();
        let group = scene.create_node("group");
        let child = scene.create_child(group, "child");
        scene.node_mut(group).unwrap().position = Vec3::new(10.0, 0.0, 5.0);
        scene.node_mut(child).unwrap().position = Vec3::new(0.0, 3.0, 0.0);
        assert_eq!(scene.world_position(child), Vec3::new(10.0, 3.0, 5.0));
    }

    #[test]
    fn test_dispose_releases_subtree_resources() {
        let mut scene = SceneGraph::new();
        let group = scene.create_node("group");
        let child = scene.create_child(group, "child");
        let geometry = scene.alloc_geometry();
        let texture = scene.alloc_texture();
        scene.node_mut(child).unwrap().geometry = Some(geometry);
        scene.node_mut(child).unwrap().texture = Some(texture);

        scene.dispose(group);

        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.live_geometries(), 0);
        assert_eq!(scene.live_textures(), 0);
    }

    #[test]
    fn test_detach_on_dispose_updates_parent() {
        let mut scene = SceneGraph::new();
        let parent = scene.create_node("parent");
        let child = scene.create_child(parent, "child");
        scene.dispose(child);
        assert!(scene.node(parent).unwrap().children().is_empty());
        assert_eq!(scene.node_count(), 1);
    }
}
