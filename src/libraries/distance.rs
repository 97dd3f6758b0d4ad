use std::f64::consts::PI;

use crate::models::{Coordinate, InvalidCoordinate};

/// Earth radius in kilometers used by all distance calculations
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the great-circle distance between two coordinates in kilometers
/// using the Haversine formula.
///
/// Fails when either coordinate is non-finite or outside the valid
/// latitude/longitude ranges. Out-of-range input is never clamped.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<f64, InvalidCoordinate> {
    let from = Coordinate::new(lat1, lon1)?;
    let to = Coordinate::new(lat2, lon2)?;

    Ok(from.distance_km(&to))
}

/// Haversine distance for coordinates already known to be valid.
pub(crate) fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1 * PI / 180.0;
    let lat2_rad = lat2 * PI / 180.0;
    // abs() keeps the result bit-identical when the arguments are swapped
    let delta_lat = (lat2 - lat1).abs() * PI / 180.0;
    let delta_lon = (lon2 - lon1).abs() * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    // Distinct coordinates closer than f64 can resolve would underflow to 0.0
    if c == 0.0 && (lat1 != lat2 || lon1 != lon2) {
        return f64::MIN_POSITIVE;
    }

    EARTH_RADIUS_KM * c
}

/// Format a distance the way results are shown to residents ("1.8 km")
pub fn format_distance_km(distance_km: f64) -> String {
    format!("{:.1} km", distance_km)
}
