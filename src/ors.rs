//! OpenRouteService directions adapter.

use serde::Deserialize;
use serde_json::json;

use crate::error::AdapterError;
use crate::geo::{GeoPoint, Profile};
use crate::http::{self, HttpRouteAdapter, ParsedRoute, ProviderApi, ProviderRequest};
use crate::provider::ProviderDescriptor;
use crate::route::RouteMethod;

pub type OrsAdapter = HttpRouteAdapter<OrsApi>;

#[derive(Debug, Clone, Copy, Default)]
pub struct OrsApi;

impl OrsApi {
    pub fn adapter(descriptor: ProviderDescriptor) -> Result<OrsAdapter, reqwest::Error> {
        HttpRouteAdapter::new(OrsApi, descriptor)
    }
}

impl ProviderApi for OrsApi {
    fn method(&self) -> RouteMethod {
        RouteMethod::OpenRouteService
    }

    fn profile_name(&self, profile: Profile) -> &'static str {
        match profile {
            Profile::Drive => "driving-car",
            Profile::Bicycle => "cycling-regular",
            Profile::Walk => "foot-walking",
        }
    }

    fn build_request(
        &self,
        descriptor: &ProviderDescriptor,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
    ) -> Result<ProviderRequest, AdapterError> {
        let key = descriptor.api_key().ok_or(AdapterError::MissingKey)?;
        let url = format!("{}/{}", descriptor.base(), self.profile_name(profile));
        let body = json!({
            "coordinates": [
                [http::round6(start.lng), http::round6(start.lat)],
                [http::round6(end.lng), http::round6(end.lat)]
            ],
            "format": "geojson"
        });
        Ok(ProviderRequest::post(url, body).header("Authorization", key))
    }

    fn parse_response(&self, body: &str) -> Result<ParsedRoute, AdapterError> {
        let collection: FeatureCollection = serde_json::from_str(body)?;
        let feature = collection
            .features
            .into_iter()
            .next()
            .ok_or(AdapterError::NoRouteFound)?;

        // ORS leaves distance/duration out of the summary for zero-length routes
        let summary = feature.properties.summary;
        Ok(ParsedRoute {
            coordinates: http::from_positions(&feature.geometry.coordinates),
            distance: summary.distance.unwrap_or(0.0),
            duration: summary.duration.unwrap_or(0.0),
        })
    }

    fn classify_error(&self, status: u16, body: String) -> AdapterError {
        match serde_json::from_str::<OrsErrorPayload>(&body) {
            Ok(payload) if UNROUTABLE_CODES.contains(&payload.error.code) => {
                tracing::debug!(
                    "ORS error {}: {}",
                    payload.error.code,
                    payload.error.message
                );
                AdapterError::NoRouteFound
            }
            _ => AdapterError::Http { status, body },
        }
    }
}

/// ORS internal codes for "route not found" (2009) and "point not routable" (2010).
const UNROUTABLE_CODES: [u32; 2] = [2009, 2010];

#[derive(Debug, Deserialize)]
struct OrsErrorPayload {
    error: OrsErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OrsErrorDetail {
    code: u32,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: LineString,
    #[serde(default)]
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    summary: Summary,
}

#[derive(Debug, Default, Deserialize)]
struct Summary {
    distance: Option<f64>,
    duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn test_build_post_request() {
        let descriptor = ProviderDescriptor::openrouteservice(Some("ors-key".to_string()));
        let request = OrsApi
            .build_request(
                &descriptor,
                GeoPoint::new(48.1173, -1.6778),
                GeoPoint::new(47.2184, -1.5536),
                Profile::Drive,
            )
            .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url,
            "https://api.openrouteservice.org/v2/directions/driving-car"
        );
        assert_eq!(request.headers, vec![("Authorization", "ors-key".to_string())]);
        assert_eq!(
            request.body,
            Some(json!({
                "coordinates": [[-1.6778, 48.1173], [-1.5536, 47.2184]],
                "format": "geojson"
            }))
        );
    }

    #[test]
    fn test_body_coordinates_use_six_decimals() {
        let descriptor = ProviderDescriptor::openrouteservice(Some("ors-key".to_string()));
        let request = OrsApi
            .build_request(
                &descriptor,
                GeoPoint::new(48.117_312_9, -1.677_800_4),
                GeoPoint::new(47.218_4, -1.553_6),
                Profile::Drive,
            )
            .unwrap();
        assert_eq!(
            request.body.unwrap()["coordinates"],
            json!([[-1.6778, 48.117313], [-1.5536, 47.2184]])
        );
    }

    #[test]
    fn test_profiles() {
        assert_eq!(OrsApi.profile_name(Profile::Bicycle), "cycling-regular");
        assert_eq!(OrsApi.profile_name(Profile::Walk), "foot-walking");
    }

    #[test]
    fn test_parse_feature_collection() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {"type": "LineString", "coordinates": [[-1.6778, 48.1173], [-1.6, 47.7], [-1.5536, 47.2184]]},
                "properties": {"summary": {"distance": 107234.5, "duration": 4380.1}}
            }]
        }"#;
        let parsed = OrsApi.parse_response(body).unwrap();
        assert_eq!(parsed.coordinates.len(), 3);
        assert_eq!(parsed.coordinates[2], GeoPoint::new(47.2184, -1.5536));
        assert_eq!(parsed.distance, 107234.5);
        assert_eq!(parsed.duration, 4380.1);
    }

    #[test]
    fn test_parse_zero_length_summary() {
        let body = r#"{"features": [{"geometry": {"coordinates": [[1.0, 1.0], [1.0, 1.0]]}, "properties": {"summary": {}}}]}"#;
        let parsed = OrsApi.parse_response(body).unwrap();
        assert_eq!(parsed.distance, 0.0);
        assert_eq!(parsed.duration, 0.0);
    }

    #[test]
    fn test_no_features() {
        let body = r#"{"type": "FeatureCollection", "features": []}"#;
        assert!(matches!(OrsApi.parse_response(body), Err(AdapterError::NoRouteFound)));
    }

    #[test]
    fn test_unroutable_error_maps_to_no_route() {
        let body = r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#;
        assert!(matches!(
            OrsApi.classify_error(404, body.to_string()),
            AdapterError::NoRouteFound
        ));
        assert!(matches!(
            OrsApi.classify_error(500, "oops".to_string()),
            AdapterError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_error_payload_is_parse_error() {
        let body = r#"{"error": {"code": 2010, "message": "Could not find routable point"}}"#;
        assert!(matches!(OrsApi.parse_response(body), Err(AdapterError::Parse(_))));
    }
}
