use super::Coordinate;

/// Mean radius of the Earth in miles, as used by the haversine formula below.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Extra slack added to a requested search radius before filtering stores.
///
/// Store coordinates and resolved postal-code centroids are both approximate,
/// and the haversine computation itself carries floating-point error. Without
/// a buffer, a store sitting exactly on the requested boundary can flip in or
/// out of the result set between structurally similar queries. Half a mile
/// absorbs both effects while staying well under the 1-mile granularity of
/// the radius parameter.
pub const RADIUS_BUFFER_MILES: f64 = 0.5;

/// Great-circle distance between two points in miles.
///
/// Uses the haversine formula:
/// h = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
/// d = 2·R·atan2(√h, √(1−h))
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Whether `point` lies within `radius_miles` of `center` (boundary inclusive).
pub fn within_radius(center: Coordinate, point: Coordinate, radius_miles: f64) -> bool {
    distance_miles(center, point) <= radius_miles
}
