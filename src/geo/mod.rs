//! Geospatial primitives: postal-code resolution and distance math.

pub mod distance;
pub mod resolver;

pub use distance::{distance_miles, within_radius, EARTH_RADIUS_MILES, RADIUS_BUFFER_MILES};
pub use resolver::{GeoError, ResolvedZip};

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
