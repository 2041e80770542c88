//! Seams between the optimizer and its collaborators.

use crate::model::Coordinate;

/// Provides point-to-point travel distance in kilometres.
///
/// The optimizer only needs a metric that is zero for identical points.
/// [`crate::haversine::Haversine`] is the default; hosts with a road network
/// can plug in their own. The trait is object safe, so `&dyn DistanceProvider`
/// works wherever a provider is accepted.
pub trait DistanceProvider {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;
}
