//! Great-circle distance and speed-based duration estimates.
//!
//! Used to measure provider-free paths (synthesized or straight-line)
//! and to size their durations from the profile's assumed speed.

use crate::geo::{GeoPoint, Profile};

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Sum of consecutive-pair distances. Empty and single-point paths measure 0.
pub fn path_distance(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Travel time in seconds at the profile's assumed average speed.
pub fn estimate_duration(distance_meters: f64, profile: Profile) -> f64 {
    let km = distance_meters / 1000.0;
    km / profile.speed_kmh() * 3600.0
}
