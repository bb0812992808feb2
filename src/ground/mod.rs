//! Ground plane placement and range-ring overlays.
//!
//! Both subsystems derive their layout from the coverage direction:
//! the ground square slides so most of it lies ahead of the origin
//! along the (horizontal) coverage axis, and ring distance labels
//! follow the same axis.

mod placement;
mod rings;

pub use placement::{horizontal_direction, ClipPlane, GroundPlacement};
pub use rings::RangeRings;
