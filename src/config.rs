//! Engine configuration.
//!
//! All tunables are grouped per subsystem and serde-serializable so a
//! host can persist or ship them as JSON. Defaults describe a medium
//! range air-surveillance site (300 km picture, 400 km ground square).

use serde::{Deserialize, Serialize};

/// Root configuration for a [`crate::engine::SceneEngine`].
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub track: TrackConfig,
    pub terrain: TerrainConfig,
    pub coverage: CoverageConfig,
    pub ground: GroundConfig,
    pub rings: RingConfig,
    pub labels: LabelConfig,
    pub view: ViewConfig,
}

/// Track actor construction and culling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Horizontal radius beyond which entities are not shown (meters)
    pub max_radius_m: f64,
    /// Vertical exaggeration applied to track altitudes
    pub vertical_scale: f64,
    /// Label height offset above the track body (meters)
    pub label_offset_m: f32,
    /// Size multiplier for track id labels
    pub label_size_multiplier: f32,
    /// Radius of the ground-contact ring (meters)
    pub ground_ring_radius_m: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            max_radius_m: 300_000.0,
            vertical_scale: 1.0,
            label_offset_m: 1_500.0,
            label_size_multiplier: 1.0,
            ground_ring_radius_m: 1_200.0,
        }
    }
}

/// Terrain mesh dimensions and binding parameters (grid generation
/// has its own params).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Vertices per mesh side (equals the heightfield N)
    pub samples_per_side: usize,
    /// Vertical exaggeration applied to elevation samples
    pub vertical_exaggeration: f32,
    /// Elevation substituted for no-data samples at bind time (meters)
    pub nodata_fill_m: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            samples_per_side: 129,
            vertical_exaggeration: 1.0,
            nodata_fill_m: 0.0,
        }
    }
}

/// Sensor coverage cone shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Cone half-angle (simulated beamwidth), degrees
    pub half_angle_deg: f32,
    /// Cone slant length, meters
    pub range_m: f32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            half_angle_deg: 45.0,
            range_m: 300_000.0,
        }
    }
}

/// Ground square placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Side length of the ground square (meters)
    pub size_m: f32,
    /// Meters of ground kept behind the origin along the coverage axis
    pub back_margin_m: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size_m: 400_000.0,
            back_margin_m: 50_000.0,
        }
    }
}

/// Range ring radii and labeling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingConfig {
    /// Ring radii in meters, need not be sorted
    pub radii_m: Vec<f32>,
    /// Distance label offset beyond the ring radius (meters)
    pub label_offset_m: f32,
    /// Size multiplier for ring distance labels
    pub label_size_multiplier: f32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radii_m: vec![50_000.0, 100_000.0, 200_000.0, 300_000.0],
            label_offset_m: 8_000.0,
            label_size_multiplier: 1.4,
        }
    }
}

/// Distance-adaptive label sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelConfig {
    /// World height per meter of camera distance at multiplier 1.0
    pub base_screen_factor: f32,
    /// Minimum label world height at multiplier 1.0 (meters)
    pub min_height_m: f32,
    /// Maximum label world height at multiplier 1.0 (meters)
    pub max_height_m: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            base_screen_factor: 0.02,
            min_height_m: 500.0,
            max_height_m: 8_000.0,
        }
    }
}

/// Fixed viewpoint pose parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Eye distance behind the origin along the coverage axis (meters)
    pub eye_back_m: f32,
    /// Eye height above ground (meters)
    pub eye_height_m: f32,
    /// Look-at distance ahead of the origin (meters)
    pub target_ahead_m: f32,
    /// Pick radius of the origin marker (meters)
    pub marker_radius_m: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            eye_back_m: 25_000.0,
            eye_height_m: 12_000.0,
            target_ahead_m: 50_000.0,
            marker_radius_m: 2_500.0,
        }
    }
}
