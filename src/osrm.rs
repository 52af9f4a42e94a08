//! OSRM HTTP adapter for point-to-point routes.

use serde::Deserialize;

use crate::error::AdapterError;
use crate::geo::{GeoPoint, Profile};
use crate::http::{self, HttpRouteAdapter, ParsedRoute, ProviderApi, ProviderRequest};
use crate::polyline::{self, PRECISION_5};
use crate::provider::ProviderDescriptor;
use crate::route::RouteMethod;

pub type OsrmAdapter = HttpRouteAdapter<OsrmApi>;

#[derive(Debug, Clone, Copy, Default)]
pub struct OsrmApi;

impl OsrmApi {
    pub fn adapter(descriptor: ProviderDescriptor) -> Result<OsrmAdapter, reqwest::Error> {
        HttpRouteAdapter::new(OsrmApi, descriptor)
    }
}

impl ProviderApi for OsrmApi {
    fn method(&self) -> RouteMethod {
        RouteMethod::Osrm
    }

    fn profile_name(&self, profile: Profile) -> &'static str {
        match profile {
            Profile::Drive => "driving",
            Profile::Bicycle => "cycling",
            Profile::Walk => "walking",
        }
    }

    fn build_request(
        &self,
        descriptor: &ProviderDescriptor,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
    ) -> Result<ProviderRequest, AdapterError> {
        let url = format!(
            "{}/{}/{};{}?geometries=geojson&overview=full",
            descriptor.base(),
            self.profile_name(profile),
            http::lng_lat(start),
            http::lng_lat(end)
        );
        Ok(ProviderRequest::get(url))
    }

    fn parse_response(&self, body: &str) -> Result<ParsedRoute, AdapterError> {
        let response: OsrmRouteResponse = serde_json::from_str(body)?;

        if let Some(code) = response.code.as_deref() {
            if code != "Ok" {
                return match code {
                    "NoRoute" | "NoSegment" => Err(AdapterError::NoRouteFound),
                    _ => Err(AdapterError::Parse(format!(
                        "OSRM returned code {}: {}",
                        code,
                        response.message.unwrap_or_default()
                    ))),
                };
            }
        }

        let route = response
            .routes
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(AdapterError::NoRouteFound)?;

        let coordinates = match route.geometry {
            OsrmGeometry::Encoded(encoded) => polyline::decode(&encoded, PRECISION_5)?,
            OsrmGeometry::LineString { coordinates } => http::from_positions(&coordinates),
            OsrmGeometry::Positions(positions) => http::from_positions(&positions),
        };

        Ok(ParsedRoute {
            coordinates,
            distance: route.distance,
            duration: route.duration,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: Option<String>,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

/// OSRM answers with GeoJSON when asked, but some deployments ignore the
/// `geometries` parameter and send their default encoded polyline.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OsrmGeometry {
    Encoded(String),
    LineString { coordinates: Vec<[f64; 2]> },
    Positions(Vec<[f64; 2]>),
}
