//! Great-circle distance and drive-time conversion.
//!
//! Straight-line distance ignores roads; travel time comes from a fixed
//! reference speed rather than live traffic.

use crate::model::Coordinate;
use crate::traits::DistanceProvider;

/// Reference driving speed used to turn kilometres into drive time.
pub const REFERENCE_SPEED_KMH: f64 = 30.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Inputs are not validated. Identical points yield exactly zero.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Drive time in hours for `km` at `speed_kmh`.
pub fn travel_hours(km: f64, speed_kmh: f64) -> f64 {
    km / speed_kmh
}

/// Drive time in minutes for `km` at `speed_kmh`.
pub fn travel_minutes(km: f64, speed_kmh: f64) -> f64 {
    travel_hours(km, speed_kmh) * 60.0
}

/// The default [`DistanceProvider`]: plain Haversine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceProvider for Haversine {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        haversine_km(from, to)
    }
}
