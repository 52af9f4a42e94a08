//! Shared HTTP plumbing for provider adapters.
//!
//! Each provider only describes how to build its request and how to read
//! its response ([`ProviderApi`]). [`HttpRouteAdapter`] owns the client,
//! enforces the per-call deadline, classifies failures and normalizes the
//! geometry so every provider yields the same [`RouteResult`] shape.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::AdapterError;
use crate::geo::{GeoPoint, Profile};
use crate::provider::ProviderDescriptor;
use crate::route::{RouteMethod, RouteResult};
use crate::traits::RouteAdapter;

/// Upper bound on how much of an error body is kept for diagnostics.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully built provider call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl ProviderRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: String, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }
}

/// The first route of a provider response, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRoute {
    pub coordinates: Vec<GeoPoint>,
    pub distance: f64,
    pub duration: f64,
}

/// Request/response dialect of one external provider.
pub trait ProviderApi: Send + Sync {
    fn method(&self) -> RouteMethod;

    /// Provider vocabulary for a travel profile.
    fn profile_name(&self, profile: Profile) -> &'static str;

    fn build_request(
        &self,
        descriptor: &ProviderDescriptor,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
    ) -> Result<ProviderRequest, AdapterError>;

    /// Reads the first route out of a successful response body.
    /// Zero candidate routes must yield [`AdapterError::NoRouteFound`].
    fn parse_response(&self, body: &str) -> Result<ParsedRoute, AdapterError>;

    /// Maps a non-2xx response to an adapter error.
    fn classify_error(&self, status: u16, body: String) -> AdapterError {
        AdapterError::Http { status, body }
    }
}

/// Formats a coordinate pair the way routing URLs expect it (`lng,lat`).
pub(crate) fn lng_lat(point: GeoPoint) -> String {
    format!("{:.6},{:.6}", point.lng, point.lat)
}

/// Rounds a coordinate to the 6 decimals used on the wire.
pub(crate) fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// Converts GeoJSON `[lng, lat]` positions into points.
pub(crate) fn from_positions(positions: &[[f64; 2]]) -> Vec<GeoPoint> {
    positions.iter().copied().map(GeoPoint::from_lng_lat).collect()
}

/// Rejects geometries with points outside the WGS84 domain.
fn check_coordinates(coordinates: &[GeoPoint]) -> Result<(), AdapterError> {
    match coordinates.iter().find(|point| !point.is_valid()) {
        Some(point) => Err(AdapterError::Parse(format!(
            "geometry point ({}, {}) is outside the coordinate domain",
            point.lat, point.lng
        ))),
        None => Ok(()),
    }
}

/// Snaps the path onto the exact request endpoints.
///
/// Providers approximate endpoints to the nearest road; callers rely on the
/// path touching the points they asked for.
pub fn snap_endpoints(mut coordinates: Vec<GeoPoint>, start: GeoPoint, end: GeoPoint) -> Vec<GeoPoint> {
    if coordinates.len() < 2 {
        return vec![start, end];
    }
    coordinates[0] = start;
    let last = coordinates.len() - 1;
    coordinates[last] = end;
    coordinates
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}

/// Wraps a [`ProviderApi`] into a [`RouteAdapter`] over a blocking client.
pub struct HttpRouteAdapter<A> {
    api: A,
    descriptor: ProviderDescriptor,
    client: Client,
}

impl<A: ProviderApi> HttpRouteAdapter<A> {
    pub fn new(api: A, descriptor: ProviderDescriptor) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            api,
            descriptor,
            client,
        })
    }

    fn execute(&self, request: &ProviderRequest, timeout: Duration) -> Result<String, AdapterError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        builder = builder.timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|err| AdapterError::from_request(err, timeout))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|err| AdapterError::from_request(err, timeout))?;

        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(self.api.classify_error(status.as_u16(), body));
        }

        Ok(text)
    }
}

impl<A: ProviderApi> RouteAdapter for HttpRouteAdapter<A> {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn priority(&self) -> i32 {
        self.descriptor.priority
    }

    fn timeout(&self) -> Duration {
        self.descriptor.timeout()
    }

    fn fetch_route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
        timeout: Duration,
    ) -> Result<RouteResult, AdapterError> {
        if !self.descriptor.is_usable() {
            return Err(AdapterError::MissingKey);
        }

        let request = self.api.build_request(&self.descriptor, start, end, profile)?;
        tracing::debug!(
            provider = %self.descriptor.name,
            url = %redact(&request.url),
            "requesting route {} -> {} ({})",
            start,
            end,
            profile
        );

        let body = self.execute(&request, timeout)?;
        let parsed = self.api.parse_response(&body).map_err(|err| {
            if let AdapterError::Parse(message) = &err {
                tracing::debug!(
                    provider = %self.descriptor.name,
                    "unparseable response: {}. Body: {}",
                    message,
                    body
                );
            }
            err
        })?;
        check_coordinates(&parsed.coordinates)?;

        Ok(RouteResult {
            coordinates: snap_endpoints(parsed.coordinates, start, end),
            distance_meters: non_negative(parsed.distance),
            duration_seconds: non_negative(parsed.duration),
            method: self.api.method(),
            source: self.descriptor.name.clone(),
        })
    }
}

/// Hides query-string credentials from logs.
fn redact(url: &str) -> String {
    match url.find("access_token=") {
        Some(idx) => {
            let tail = &url[idx..];
            let rest = tail.find('&').map(|amp| &tail[amp..]).unwrap_or("");
            format!("{}access_token=***{}", &url[..idx], rest)
        }
        None => url.to_string(),
    }
}
