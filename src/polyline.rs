//! Route geometry as an ordered list of coordinates.
//!
//! Map renderers consume this directly; any compact encoding happens at the
//! display boundary, not inside the optimizer.

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;
use crate::traits::DistanceProvider;

/// The path a technician drives, start point first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a polyline from points in driving order.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns its points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    /// Sum of legs between consecutive points, measured by `distance`.
    ///
    /// Pass the provider the route was built with to match its
    /// `total_distance_km`.
    pub fn length_km<D>(&self, distance: &D) -> f64
    where
        D: DistanceProvider + ?Sized,
    {
        self.points
            .windows(2)
            .map(|leg| distance.distance_km(leg[0], leg[1]))
            .sum()
    }

    /// Smallest box containing every point, as (south-west, north-east).
    pub fn bounds(&self) -> Option<(Coordinate, Coordinate)> {
        let first = *self.points.first()?;
        let (mut min, mut max) = (first, first);
        for point in &self.points[1..] {
            min.lat = min.lat.min(point.lat);
            min.lng = min.lng.min(point.lng);
            max.lat = max.lat.max(point.lat);
            max.lng = max.lng.max(point.lng);
        }
        Some((min, max))
    }
}
