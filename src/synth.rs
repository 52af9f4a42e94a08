//! Local path synthesizer.
//!
//! Produces a road-like line between two points without any network call.
//! Intermediate waypoints are pulled toward nearby population hubs (where
//! real roads tend to go), perturbed a little to emulate detours, and then
//! smoothed with cubic Bezier segments.
//!
//! The output is a visual placeholder. Its distance is the length of the
//! drawn curve, not of any real road.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::bezier;
use crate::error::SynthesisError;
use crate::geo::{GeoPoint, Profile};
use crate::haversine::{estimate_duration, path_distance};
use crate::route::{RouteMethod, RouteResult};
use crate::traits::PathSynthesizer;

pub const LOCAL_SOURCE: &str = "local-synthesizer";

const MIN_WAYPOINTS: usize = 3;
const MAX_WAYPOINTS: usize = 7;

/// A reference population center that attracts synthesized waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub name: String,
    pub location: GeoPoint,
}

impl Hub {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            location: GeoPoint::new(lat, lng),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    pub hubs: Vec<Hub>,
    /// Hubs further than this (planar degrees) have no influence.
    pub hub_radius_deg: f64,
    /// Fraction of the way a waypoint sitting on a hub moves toward it.
    pub hub_pull: f64,
    /// Waypoint perturbation as a fraction of the overall span.
    pub detour_ratio: f64,
    /// Control-point jitter as a fraction of each segment's length.
    pub control_jitter_ratio: f64,
    pub samples_per_segment: usize,
    /// Span covered by one waypoint before clamping to 3..=7.
    pub waypoint_spacing_deg: f64,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            hubs: default_hubs(),
            hub_radius_deg: 0.75,
            hub_pull: 0.35,
            detour_ratio: 0.04,
            control_jitter_ratio: 0.08,
            samples_per_segment: 8,
            waypoint_spacing_deg: 0.1,
        }
    }
}

pub fn default_hubs() -> Vec<Hub> {
    vec![
        Hub::new("New York", 40.7128, -74.0060),
        Hub::new("Los Angeles", 34.0522, -118.2437),
        Hub::new("Chicago", 41.8781, -87.6298),
        Hub::new("Mexico City", 19.4326, -99.1332),
        Hub::new("Sao Paulo", -23.5505, -46.6333),
        Hub::new("London", 51.5074, -0.1278),
        Hub::new("Paris", 48.8566, 2.3522),
        Hub::new("Berlin", 52.5200, 13.4050),
        Hub::new("Lagos", 6.5244, 3.3792),
        Hub::new("Cairo", 30.0444, 31.2357),
        Hub::new("Mumbai", 19.0760, 72.8777),
        Hub::new("Delhi", 28.7041, 77.1025),
        Hub::new("Jakarta", -6.2088, 106.8456),
        Hub::new("Surabaya", -7.2575, 112.7521),
        Hub::new("Shanghai", 31.2304, 121.4737),
        Hub::new("Tokyo", 35.6762, 139.6503),
        Hub::new("Sydney", -33.8688, 151.2093),
    ]
}

/// Bezier-smoothed synthesizer with hub gravitation.
#[derive(Debug, Clone, Default)]
pub struct LocalSynthesizer {
    config: SynthesizerConfig,
}

impl LocalSynthesizer {
    pub fn new(config: SynthesizerConfig) -> Self {
        Self { config }
    }

    /// Number of intermediate waypoints for a planar span.
    pub fn waypoint_count(&self, span_deg: f64) -> usize {
        let spacing = if self.config.waypoint_spacing_deg > 0.0 {
            self.config.waypoint_spacing_deg
        } else {
            SynthesizerConfig::default().waypoint_spacing_deg
        };
        let raw = (span_deg / spacing).round();
        if raw.is_finite() {
            (raw as usize).clamp(MIN_WAYPOINTS, MAX_WAYPOINTS)
        } else {
            MAX_WAYPOINTS
        }
    }

    /// Moves `point` toward the nearest hub within the influence radius.
    pub fn gravitate(&self, point: GeoPoint) -> GeoPoint {
        let radius = self.config.hub_radius_deg;
        let nearest = self
            .config
            .hubs
            .iter()
            .map(|hub| (hub, point.degree_distance(&hub.location)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match nearest {
            Some((hub, dist)) if radius > 0.0 && dist < radius => {
                let weight = self.config.hub_pull / (1.0 + dist / radius);
                point.lerp(&hub.location, weight)
            }
            _ => point,
        }
    }

    fn waypoints(&self, start: GeoPoint, end: GeoPoint, span: f64, rng: &mut StdRng) -> Vec<GeoPoint> {
        let count = self.waypoint_count(span);
        let detour = span * self.config.detour_ratio;

        (1..=count)
            .map(|i| {
                let t = i as f64 / (count + 1) as f64;
                let pulled = self.gravitate(start.lerp(&end, t));
                GeoPoint::new(
                    pulled.lat + jitter(rng, detour),
                    pulled.lng + jitter(rng, detour),
                )
            })
            .collect()
    }

    fn smooth(&self, chain: &[GeoPoint], rng: &mut StdRng) -> Vec<GeoPoint> {
        let samples = self.config.samples_per_segment.max(1);
        let mut path = Vec::with_capacity((chain.len() - 1) * samples + 1);

        for pair in chain.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let amount = a.degree_distance(&b) * self.config.control_jitter_ratio;
            let c1 = a.lerp(&b, 0.25);
            let c2 = a.lerp(&b, 0.75);
            let c1 = GeoPoint::new(c1.lat + jitter(rng, amount), c1.lng + jitter(rng, amount));
            let c2 = GeoPoint::new(c2.lat + jitter(rng, amount), c2.lng + jitter(rng, amount));
            path.extend(bezier::sample_segment(a, c1, c2, b, samples));
        }

        if let Some(&last) = chain.last() {
            path.push(last);
        }
        path
    }
}

fn jitter(rng: &mut StdRng, amount: f64) -> f64 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}

impl PathSynthesizer for LocalSynthesizer {
    fn synthesize(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
        rng: &mut StdRng,
    ) -> Result<RouteResult, SynthesisError> {
        // interpolate in unwrapped longitude, then fold back into the domain
        let target = start.unwrapped_toward(&end);
        let span = start.degree_distance(&target);
        if !span.is_finite() {
            return Err(SynthesisError::NonFinite);
        }

        let mut coordinates = if span == 0.0 {
            vec![start, end]
        } else {
            let mut chain = Vec::with_capacity(MAX_WAYPOINTS + 2);
            chain.push(start);
            chain.extend(self.waypoints(start, target, span, rng));
            chain.push(target);
            self.smooth(&chain, rng)
        };

        for point in &mut coordinates {
            if !point.lat.is_finite() || !point.lng.is_finite() {
                return Err(SynthesisError::NonFinite);
            }
            *point = point.normalized();
        }

        let last = coordinates.len() - 1;
        coordinates[0] = start;
        coordinates[last] = end;

        let distance_meters = path_distance(&coordinates);
        Ok(RouteResult {
            duration_seconds: estimate_duration(distance_meters, profile),
            distance_meters,
            coordinates,
            method: RouteMethod::Local,
            source: LOCAL_SOURCE.to_string(),
        })
    }
}
