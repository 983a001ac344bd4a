//! Postal-code to coordinate resolution.
//!
//! Resolution is a pure lookup with no network or database access: a static
//! table covers the postal codes seen in seeded and test data, and everything
//! else falls back to a regional anchor derived from the code's leading digit
//! (USPS assigns leading digits geographically) plus a small deterministic
//! offset computed from the trailing digits. Identical input always produces
//! bit-identical output.

use super::Coordinate;
use thiserror::Error;

/// Error types for postal-code resolution
#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Unable to resolve postal code: {0}")]
    Unresolvable(String),
}

/// A resolved postal code: its centroid plus a regional display label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedZip {
    pub coordinate: Coordinate,
    pub city: &'static str,
    pub state: &'static str,
}

/// Exact centroids for postal codes we ship data for.
/// (zip, city, state, latitude, longitude)
const KNOWN_ZIPS: &[(&str, &str, &str, f64, f64)] = &[
    ("02108", "Boston", "MA", 42.3576, -71.0638),
    ("02139", "Cambridge", "MA", 42.3647, -71.1042),
    ("10001", "New York", "NY", 40.7506, -73.9972),
    ("10013", "New York", "NY", 40.7200, -74.0027),
    ("11201", "Brooklyn", "NY", 40.6955, -73.9902),
    ("19103", "Philadelphia", "PA", 39.9526, -75.1743),
    ("20001", "Washington", "DC", 38.9109, -77.0163),
    ("20500", "Washington", "DC", 38.8977, -77.0365),
    ("30301", "Atlanta", "GA", 33.7490, -84.3880),
    ("30305", "Atlanta", "GA", 33.8340, -84.3857),
    ("33101", "Miami", "FL", 25.7743, -80.1937),
    ("33139", "Miami Beach", "FL", 25.7907, -80.1300),
    ("37201", "Nashville", "TN", 36.1659, -86.7844),
    ("43215", "Columbus", "OH", 39.9612, -83.0007),
    ("48201", "Detroit", "MI", 42.3470, -83.0606),
    ("53202", "Milwaukee", "WI", 43.0445, -87.9030),
    ("55401", "Minneapolis", "MN", 44.9861, -93.2690),
    ("60601", "Chicago", "IL", 41.8858, -87.6181),
    ("60614", "Chicago", "IL", 41.9225, -87.6533),
    ("63101", "St. Louis", "MO", 38.6313, -90.1920),
    ("64101", "Kansas City", "MO", 39.1030, -94.6008),
    ("75201", "Dallas", "TX", 32.7876, -96.7994),
    ("77001", "Houston", "TX", 29.7544, -95.3621),
    ("78701", "Austin", "TX", 30.2705, -97.7426),
    ("80202", "Denver", "CO", 39.7491, -104.9973),
    ("80302", "Boulder", "CO", 40.0195, -105.2927),
    ("85001", "Phoenix", "AZ", 33.4484, -112.0740),
    ("89101", "Las Vegas", "NV", 36.1719, -115.1400),
    ("90001", "Los Angeles", "CA", 33.9731, -118.2479),
    ("90210", "Beverly Hills", "CA", 34.0901, -118.4065),
    ("92101", "San Diego", "CA", 32.7157, -117.1611),
    ("94103", "San Francisco", "CA", 37.7726, -122.4099),
    ("94110", "San Francisco", "CA", 37.7485, -122.4184),
    ("94117", "San Francisco", "CA", 37.7692, -122.4469),
    ("95814", "Sacramento", "CA", 38.5816, -121.4944),
    ("97201", "Portland", "OR", 45.5083, -122.6869),
    ("98101", "Seattle", "WA", 47.6101, -122.3344),
    ("98109", "Seattle", "WA", 47.6344, -122.3422),
];

/// One metro anchor per USPS leading digit (0 = New England through
/// 9 = West Coast). (city, state, latitude, longitude)
const REGION_ANCHORS: [(&str, &str, f64, f64); 10] = [
    ("Boston", "MA", 42.3601, -71.0589),
    ("New York", "NY", 40.7128, -74.0060),
    ("Washington", "DC", 38.9072, -77.0369),
    ("Atlanta", "GA", 33.7490, -84.3880),
    ("Columbus", "OH", 39.9612, -82.9988),
    ("Minneapolis", "MN", 44.9778, -93.2650),
    ("Kansas City", "MO", 39.0997, -94.5786),
    ("Dallas", "TX", 32.7767, -96.7970),
    ("Denver", "CO", 39.7392, -104.9903),
    ("San Francisco", "CA", 37.7749, -122.4194),
];

/// Degrees of spread per step of the trailing-digit offset. Keeps fallback
/// points within ~0.2 degrees of their anchor, so structurally similar codes
/// land near each other but never on the same point.
const OFFSET_STEP_DEGREES: f64 = 0.004;

/// Resolve a postal code to a coordinate plus regional label.
///
/// Known codes hit the exact table; anything else maps to its leading-digit
/// region anchor shifted by an offset derived from the trailing four digits.
/// Fails only when the code has no leading digit, which validated API input
/// can never produce.
pub fn lookup(zip: &str) -> Result<ResolvedZip, GeoError> {
    if let Some(&(_, city, state, lat, lon)) = KNOWN_ZIPS.iter().find(|entry| entry.0 == zip) {
        return Ok(ResolvedZip {
            coordinate: Coordinate::new(lat, lon),
            city,
            state,
        });
    }

    let region = zip
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| GeoError::Unresolvable(zip.to_string()))? as usize;
    let (city, state, anchor_lat, anchor_lon) = REGION_ANCHORS[region];

    // Fold the trailing digits into two bounded offsets so that 99998 and
    // 99999 resolve to distinct nearby points.
    let tail: u32 = zip
        .chars()
        .skip(1)
        .filter_map(|c| c.to_digit(10))
        .take(4)
        .fold(0, |acc, digit| acc * 10 + digit);
    let lat_offset = ((tail % 100) as f64 - 50.0) * OFFSET_STEP_DEGREES;
    let lon_offset = (((tail / 100) % 100) as f64 - 50.0) * OFFSET_STEP_DEGREES;

    Ok(ResolvedZip {
        coordinate: Coordinate::new(anchor_lat + lat_offset, anchor_lon + lon_offset),
        city,
        state,
    })
}

/// Resolve a postal code to its coordinate.
pub fn resolve(zip: &str) -> Result<Coordinate, GeoError> {
    lookup(zip).map(|resolved| resolved.coordinate)
}
