//! Mapbox Directions adapter.

use serde::Deserialize;

use crate::error::AdapterError;
use crate::geo::{GeoPoint, Profile};
use crate::http::{self, HttpRouteAdapter, ParsedRoute, ProviderApi, ProviderRequest};
use crate::provider::ProviderDescriptor;
use crate::route::RouteMethod;

pub type MapboxAdapter = HttpRouteAdapter<MapboxApi>;

#[derive(Debug, Clone, Copy, Default)]
pub struct MapboxApi;

impl MapboxApi {
    pub fn adapter(descriptor: ProviderDescriptor) -> Result<MapboxAdapter, reqwest::Error> {
        HttpRouteAdapter::new(MapboxApi, descriptor)
    }
}

impl ProviderApi for MapboxApi {
    fn method(&self) -> RouteMethod {
        RouteMethod::Mapbox
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
        let token = descriptor.api_key().ok_or(AdapterError::MissingKey)?;
        let url = format!(
            "{}/{}/{};{}?geometries=geojson&access_token={}",
            descriptor.base(),
            self.profile_name(profile),
            http::lng_lat(start),
            http::lng_lat(end),
            token
        );
        Ok(ProviderRequest::get(url))
    }

    fn parse_response(&self, body: &str) -> Result<ParsedRoute, AdapterError> {
        let response: MapboxResponse = serde_json::from_str(body)?;

        if response.code.as_deref() == Some("NoRoute") {
            return Err(AdapterError::NoRouteFound);
        }

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(AdapterError::NoRouteFound)?;

        Ok(ParsedRoute {
            coordinates: http::from_positions(&route.geometry.coordinates),
            distance: route.distance,
            duration: route.duration,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MapboxResponse {
    code: Option<String>,
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    geometry: MapboxGeometry,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>,
}
