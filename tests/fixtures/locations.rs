//! Real named locations for test requests.
//!
//! Coordinates sourced from OpenStreetMap.

use hybrid_router::GeoPoint;

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

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Las Vegas Strip
// ============================================================================

pub const WYNN: Location = Location::new("Wynn Las Vegas", 36.1263781, -115.1658180);
pub const MGM_GRAND: Location = Location::new("MGM Grand", 36.1023654, -115.1688720);
pub const BELLAGIO: Location = Location::new("Bellagio", 36.1126, -115.1767);
pub const CAESARS: Location = Location::new("Caesars Palace", 36.1162, -115.1745);

// ============================================================================
// Regional trips
// ============================================================================

pub const RENNES: Location = Location::new("Rennes", 48.1173, -1.6778);
pub const NANTES: Location = Location::new("Nantes", 47.2184, -1.5536);
pub const JAKARTA: Location = Location::new("Jakarta", -6.2088, 106.8456);
pub const BANDUNG: Location = Location::new("Bandung", -6.9175, 107.6191);

pub const ALL: &[Location] = &[WYNN, MGM_GRAND, BELLAGIO, CAESARS, RENNES, NANTES, JAKARTA, BANDUNG];
