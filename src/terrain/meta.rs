//! Terrain metadata sidecar.
//!
//! The DEM export pipeline writes a JSON sidecar next to the binary
//! grid describing its origin, extent, and no-data sentinel. Parsing
//! it tells the engine how to size the mesh and where to anchor it.

use serde::{Deserialize, Serialize};

use super::heightfield::TerrainError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaOrigin {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaGrid {
    pub size_m: f32,
    pub samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaOffset {
    pub east_m: f32,
    pub north_m: f32,
}

/// Sidecar metadata for a binary heightfield export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainMeta {
    pub origin: MetaOrigin,
    pub grid: MetaGrid,
    /// Horizontal offset of the grid center from the origin
    pub center_offset: MetaOffset,
    /// The exporter's no-data sentinel value
    pub nodata_out: i32,
    /// Valid-sample elevation range, absent when the grid is all no-data
    #[serde(default)]
    pub min: Option<i32>,
    #[serde(default)]
    pub max: Option<i32>,
}

impl TerrainMeta {
    pub fn from_json(json: &str) -> Result<Self, TerrainError> {
        Ok(serde_json::from_str(json)?)
    }
}
