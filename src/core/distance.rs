use geo::Point;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers, rounded to two decimal places
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = lat1_rad - lat2_rad;
    let delta_lon = lon1.to_radians() - lon2.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding error can push `a` just past 1.0 for antipodal points
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();

    round_to_hundredths(EARTH_RADIUS_KM * c)
}

/// Haversine distance between two `geo` points (x = longitude, y = latitude)
#[inline]
pub fn distance_between(from: Point<f64>, to: Point<f64>) -> f64 {
    haversine_distance(from.y(), from.x(), to.y(), to.x())
}

#[inline]
fn round_to_hundredths(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
