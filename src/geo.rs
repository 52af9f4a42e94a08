//! Geographic value types shared by every routing component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point, rejecting NaN, infinities and out-of-range values.
    pub fn validated(lat: f64, lng: f64) -> Result<Self, RoutingError> {
        let point = Self::new(lat, lng);
        point.validate()?;
        Ok(point)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(RoutingError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Builds a point from a GeoJSON `[lng, lat]` pair.
    pub fn from_lng_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Planar distance in degrees. Only meaningful for sizing, not for metres.
    pub fn degree_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = other.lat - self.lat;
        let dlng = other.lng - self.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }

    /// Linear interpolation toward `other`; `t = 0` is `self`.
    pub fn lerp(&self, other: &GeoPoint, t: f64) -> GeoPoint {
        GeoPoint::new(
            self.lat + (other.lat - self.lat) * t,
            self.lng + (other.lng - self.lng) * t,
        )
    }

    /// Clamps latitude to the poles and wraps longitude into [-180, 180].
    /// Non-finite values pass through unchanged.
    pub fn normalized(&self) -> GeoPoint {
        let lng = if (-180.0..=180.0).contains(&self.lng) || !self.lng.is_finite() {
            self.lng
        } else {
            (self.lng + 180.0).rem_euclid(360.0) - 180.0
        };
        GeoPoint::new(self.lat.clamp(-90.0, 90.0), lng)
    }

    /// `other` shifted by a whole turn of longitude when that brings it
    /// within 180° of `self`, so interpolation takes the short way across
    /// the antimeridian. The result may lie outside [-180, 180].
    pub fn unwrapped_toward(&self, other: &GeoPoint) -> GeoPoint {
        let dlng = other.lng - self.lng;
        let lng = if dlng > 180.0 {
            other.lng - 360.0
        } else if dlng < -180.0 {
            other.lng + 360.0
        } else {
            other.lng
        };
        GeoPoint::new(other.lat, lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

impl FromStr for GeoPoint {
    type Err = RoutingError;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RoutingError::Config(format!("expected LAT,LNG but got {s:?}"));
        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
        GeoPoint::validated(lat, lng)
    }
}

/// Travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Drive,
    Bicycle,
    Walk,
}

impl Profile {
    /// Assumed average speed, used when no provider supplies a duration.
    pub fn speed_kmh(self) -> f64 {
        match self {
            Profile::Drive => 55.0,
            Profile::Bicycle => 18.0,
            Profile::Walk => 5.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Drive => "drive",
            Profile::Bicycle => "bicycle",
            Profile::Walk => "walk",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" | "driving" | "car" => Ok(Profile::Drive),
            "bicycle" | "cycling" | "bike" => Ok(Profile::Bicycle),
            "walk" | "walking" | "foot" => Ok(Profile::Walk),
            other => Err(RoutingError::Config(format!("unknown profile: {other}"))),
        }
    }
}
