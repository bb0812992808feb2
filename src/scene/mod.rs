//! Retained scene graph and camera state.
//!
//! The engine positions nodes in this graph; the host renderer draws
//! them. Only the data the engine itself needs is modeled: transforms,
//! visibility, parent/child structure, and handles to GPU resources so
//! ownership and release stay testable.

mod camera;
mod graph;
mod picking;
mod text;

pub use camera::{Camera, OrbitController};
pub use graph::{GeometryHandle, Node, NodeId, SceneGraph, TextureHandle};
pub use picking::Ray;
pub use text::{GlyphMetricsRasterizer, LabelTexture, TextRasterizer};
