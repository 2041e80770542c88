//! New York service-area locations for realistic test fixtures.
//!
//! Coordinates are approximate street addresses, good enough for
//! great-circle routing.

use dispatch_optimizer::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

// ============================================================================
// Depots (technician start locations)
// ============================================================================

pub const DEPOTS: &[Location] = &[
    Location::new("Tribeca Yard", 40.7140, -74.0080),
    Location::new("Williamsburg Shop", 40.7081, -73.9571),
    Location::new("Midtown Office", 40.7549, -73.9840),
];

// ============================================================================
// Lower Manhattan Customer Sites
// ============================================================================

pub const LOWER_MANHATTAN: &[Location] = &[
    Location::new("City Hall", 40.7128, -74.0060),
    Location::new("Chambers St", 40.7135, -74.0075),
    Location::new("Foley Square", 40.7142, -74.0033),
    Location::new("Wall St", 40.7060, -74.0088),
    Location::new("Battery Park", 40.7033, -74.0170),
    Location::new("South Street Seaport", 40.7069, -74.0033),
    Location::new("Washington Square", 40.7308, -73.9973),
    Location::new("SoHo", 40.7233, -74.0030),
    Location::new("Chinatown", 40.7158, -73.9970),
    Location::new("Lower East Side", 40.7150, -73.9843),
];

// ============================================================================
// Brooklyn Customer Sites
// ============================================================================

pub const BROOKLYN: &[Location] = &[
    Location::new("DUMBO", 40.7033, -73.9881),
    Location::new("Brooklyn Heights", 40.6960, -73.9936),
    Location::new("Downtown Brooklyn", 40.6925, -73.9904),
    Location::new("Fort Greene", 40.6892, -73.9742),
    Location::new("Park Slope", 40.6710, -73.9814),
    Location::new("Greenpoint", 40.7304, -73.9515),
];
