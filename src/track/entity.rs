//! Incoming tracked-entity records.

use geo_types::Coord;

/// One entity in the host-supplied track list.
///
/// Arrives every sync cycle as part of an unordered set keyed by `id`.
/// Position is optional: a track that temporarily loses its geodetic
/// fix is skipped for the cycle and picked up again once valid.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEntity {
    /// Unique track identifier (also the label text)
    pub id: String,
    /// Geographic position (x = longitude, y = latitude, degrees)
    pub position: Option<Coord<f64>>,
    /// Altitude above mean sea level, meters
    pub alt_m: f64,
    /// Course over ground, degrees clockwise from north
    pub heading_deg: Option<f64>,
}

impl TrackedEntity {
    pub fn new(id: &str, lat: f64, lon: f64) -> Self {
        Self {
            id: id.to_string(),
            position: Some(Coord { x: lon, y: lat }),
            alt_m: 0.0,
            heading_deg: None,
        }
    }

    pub fn with_altitude(mut self, alt_m: f64) -> Self {
        self.alt_m = alt_m;
        self
    }

    pub fn with_heading(mut self, heading_deg: f64) -> Self {
        self.heading_deg = Some(heading_deg);
        self
    }
}
