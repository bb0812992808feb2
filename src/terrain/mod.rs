//! Terrain heightfield subsystem.
//!
//! A terrain instance is fed by exactly one of two grid sources: a
//! deterministic procedural generator, or a DEM exported as raw
//! little-endian i16 samples (optionally fetched asynchronously).
//! Binding a grid deforms the ground mesh, recomputes normals, and
//! recolors vertices by elevation band.

mod field;
mod heightfield;
mod loader;
mod mesh;
mod meta;
mod noise;

pub use field::TerrainField;
pub use heightfield::{decode_heightfield, HeightfieldGrid, TerrainError, NO_DATA};
pub use loader::{HeightfieldSource, TerrainChannel};
pub use mesh::TerrainMesh;
pub use meta::{MetaGrid, MetaOffset, MetaOrigin, TerrainMeta};
pub use noise::{generate_heightfield, NoiseParams, PeakParams};
