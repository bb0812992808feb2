//! Geodetic coordinate handling.
//!
//! Converts geographic coordinates (lat/lon/alt) into the local
//! East-North-Up scene frame centered on a chosen origin.

mod transform;

pub use transform::{local_position, GeoOrigin, EARTH_RADIUS_M};
