//! Route requests and results exchanged with callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::geo::{GeoPoint, Profile};
use crate::polyline::{self, PRECISION_5};

/// A single route to compute. `id` is only used to correlate batch results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub id: String,
    pub start: GeoPoint,
    pub end: GeoPoint,
    #[serde(default)]
    pub profile: Profile,
}

impl RouteRequest {
    pub fn new(id: impl Into<String>, start: GeoPoint, end: GeoPoint, profile: Profile) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            profile,
        }
    }
}

/// How a route was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteMethod {
    Osrm,
    Mapbox,
    #[serde(rename = "openrouteservice")]
    OpenRouteService,
    /// Synthesized locally; a plausible shape, not a real road path.
    Local,
    /// Total failure: start and end joined directly.
    StraightLine,
}

impl RouteMethod {
    /// True for results that did not come from a routing provider.
    pub fn is_degraded(self) -> bool {
        matches!(self, RouteMethod::Local | RouteMethod::StraightLine)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Osrm => "osrm",
            RouteMethod::Mapbox => "mapbox",
            RouteMethod::OpenRouteService => "openrouteservice",
            RouteMethod::Local => "local",
            RouteMethod::StraightLine => "straight_line",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed path. `coordinates` always holds at least two points and
/// begins and ends exactly at the requested start and end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub coordinates: Vec<GeoPoint>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub method: RouteMethod,
    pub source: String,
}

impl RouteResult {
    pub fn start(&self) -> Option<GeoPoint> {
        self.coordinates.first().copied()
    }

    pub fn end(&self) -> Option<GeoPoint> {
        self.coordinates.last().copied()
    }

    /// The path as a precision-5 encoded polyline.
    pub fn polyline(&self) -> String {
        polyline::encode(&self.coordinates, PRECISION_5)
    }
}

/// One entry of a batch computation, tagged with the caller's id.
#[derive(Debug)]
pub struct BatchRoute {
    pub id: String,
    pub result: Result<RouteResult, RoutingError>,
}

impl BatchRoute {
    pub fn path(&self) -> &[GeoPoint] {
        match &self.result {
            Ok(route) => &route.coordinates,
            Err(_) => &[],
        }
    }

    pub fn method(&self) -> Option<RouteMethod> {
        self.result.as_ref().ok().map(|route| route.method)
    }
}

/// Serializable view of a [`BatchRoute`], as handed back to UI callers.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRouteView<'a> {
    pub id: &'a str,
    pub path: &'a [GeoPoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<RouteMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> From<&'a BatchRoute> for BatchRouteView<'a> {
    fn from(batch: &'a BatchRoute) -> Self {
        Self {
            id: &batch.id,
            path: batch.path(),
            method: batch.method(),
            source: batch.result.as_ref().ok().map(|route| route.source.as_str()),
            error: batch.result.as_ref().err().map(|err| err.to_string()),
        }
    }
}
