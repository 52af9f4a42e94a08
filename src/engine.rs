//! Route orchestration: cache, provider chain, local synthesis, straight line.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::cache::{DEFAULT_CAPACITY, Lookup, RouteCache, RouteKey};
use crate::config::EngineConfig;
use crate::error::{Result, RoutingError};
use crate::geo::{GeoPoint, Profile};
use crate::haversine::{estimate_duration, haversine_distance};
use crate::mapbox::MapboxApi;
use crate::osrm::OsrmApi;
use crate::ors::OrsApi;
use crate::provider::{ProviderDescriptor, ProviderKind};
use crate::route::{BatchRoute, RouteMethod, RouteRequest, RouteResult};
use crate::stats::{StatsRegistry, StatsSnapshot};
use crate::synth::LocalSynthesizer;
use crate::traits::{PathSynthesizer, RouteAdapter};

pub const STRAIGHT_LINE_SOURCE: &str = "straight-line";

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub cache_capacity: usize,
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            seed: None,
        }
    }
}

/// Hybrid route computation with caching and graceful degradation.
///
/// Construct once and share by reference (or `Arc`); all methods take
/// `&self` and are safe to call from many threads.
pub struct RoutingEngine {
    adapters: Vec<Box<dyn RouteAdapter>>,
    synthesizer: Box<dyn PathSynthesizer>,
    cache: Mutex<RouteCache>,
    stats: StatsRegistry,
    seed: Option<u64>,
}

impl RoutingEngine {
    /// Adapters are sorted by ascending priority; ties keep their given order.
    pub fn new(
        mut adapters: Vec<Box<dyn RouteAdapter>>,
        synthesizer: Box<dyn PathSynthesizer>,
        options: EngineOptions,
    ) -> Self {
        adapters.sort_by_key(|adapter| adapter.priority());
        let stats = StatsRegistry::new(adapters.iter().map(|adapter| adapter.name()));
        Self {
            adapters,
            synthesizer,
            cache: Mutex::new(RouteCache::new(options.cache_capacity)),
            stats,
            seed: options.seed,
        }
    }

    /// Builds HTTP adapters for every usable provider descriptor.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut adapters: Vec<Box<dyn RouteAdapter>> = Vec::new();
        for descriptor in &config.providers {
            if !descriptor.is_usable() {
                tracing::warn!(
                    provider = %descriptor.name,
                    "skipping provider: an API key is required but none is configured"
                );
                continue;
            }
            adapters.push(build_adapter(descriptor.clone())?);
        }
        tracing::info!(
            providers = adapters.len(),
            cache_capacity = config.cache_capacity,
            "routing engine ready"
        );

        Ok(Self::new(
            adapters,
            Box::new(LocalSynthesizer::new(config.synthesizer.clone())),
            EngineOptions {
                cache_capacity: config.cache_capacity,
                seed: config.seed,
            },
        ))
    }

    /// Provider names in the order they are tried.
    pub fn provider_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|adapter| adapter.name()).collect()
    }

    /// Computes one route. The only error is an invalid coordinate; every
    /// provider or synthesis failure degrades to a lower-quality path instead.
    pub fn compute_route(&self, start: GeoPoint, end: GeoPoint, profile: Profile) -> Result<RouteResult> {
        start.validate()?;
        end.validate()?;

        let key = RouteKey::new(start, end, profile);
        let cell = match self.lock_cache().lookup(&key) {
            Lookup::Hit(route) => {
                tracing::trace!("cache hit {} -> {} ({})", start, end, profile);
                self.stats.record_cache_hit();
                return Ok(route);
            }
            Lookup::Pending(cell) => cell,
        };

        let mut computed = None;
        let route = cell
            .get_or_init(|| {
                self.stats.record_cache_miss();
                let (route, cacheable) = self.compute_uncached(&key, start, end, profile);
                computed = Some(cacheable);
                route
            })
            .clone();

        // only the caller that ran the computation retires the pending entry
        if let Some(cacheable) = computed {
            let stored = cacheable.then(|| route.clone());
            self.lock_cache().complete(key, &cell, stored);
        }

        Ok(route)
    }

    pub fn compute_request(&self, request: &RouteRequest) -> Result<RouteResult> {
        self.compute_route(request.start, request.end, request.profile)
    }

    /// Computes many routes in parallel. Results keep the input order and
    /// carry their request id; one failing request never affects another.
    pub fn compute_routes(&self, requests: &[RouteRequest]) -> Vec<BatchRoute> {
        requests
            .par_iter()
            .map(|request| BatchRoute {
                id: request.id.clone(),
                result: self.compute_request(request),
            })
            .collect()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    pub fn stats(&self) -> StatsSnapshot {
        let cached = self.lock_cache().len();
        self.stats.snapshot(cached)
    }

    /// Returns the route and whether it may be cached.
    fn compute_uncached(
        &self,
        key: &RouteKey,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
    ) -> (RouteResult, bool) {
        let exhausted = match self.try_providers(start, end, profile) {
            Ok(route) => return (route, true),
            Err(err) => err,
        };
        tracing::info!("{}; synthesizing {} -> {} locally", exhausted, start, end);

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ key.fingerprint()),
            None => StdRng::from_os_rng(),
        };
        match self.synthesizer.synthesize(start, end, profile, &mut rng) {
            Ok(route) => {
                self.stats.record_local_fallback();
                (route, true)
            }
            Err(err) => {
                let err = RoutingError::from(err);
                tracing::error!("{}; returning straight line {} -> {}", err, start, end);
                self.stats.record_straight_line();
                (straight_line(start, end, profile), false)
            }
        }
    }

    fn try_providers(&self, start: GeoPoint, end: GeoPoint, profile: Profile) -> Result<RouteResult> {
        for adapter in &self.adapters {
            match adapter.fetch_route(start, end, profile, adapter.timeout()) {
                Ok(route) => {
                    tracing::debug!(
                        provider = adapter.name(),
                        points = route.coordinates.len(),
                        "route found"
                    );
                    self.stats.record_success(adapter.name());
                    return Ok(route);
                }
                Err(err) => {
                    tracing::warn!(provider = adapter.name(), "route request failed: {}", err);
                    self.stats.record_failure(adapter.name());
                }
            }
        }
        Err(RoutingError::AllProvidersExhausted {
            attempted: self.adapters.len(),
        })
    }

    fn lock_cache(&self) -> MutexGuard<'_, RouteCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RoutingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingEngine")
            .field("providers", &self.provider_names())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// Last-resort path joining the endpoints directly.
pub fn straight_line(start: GeoPoint, end: GeoPoint, profile: Profile) -> RouteResult {
    let distance_meters = haversine_distance(start, end);
    RouteResult {
        coordinates: vec![start, end],
        distance_meters,
        duration_seconds: estimate_duration(distance_meters, profile),
        method: RouteMethod::StraightLine,
        source: STRAIGHT_LINE_SOURCE.to_string(),
    }
}

fn build_adapter(descriptor: ProviderDescriptor) -> Result<Box<dyn RouteAdapter>> {
    let adapter: Box<dyn RouteAdapter> = match descriptor.kind {
        ProviderKind::Osrm => Box::new(OsrmApi::adapter(descriptor)?),
        ProviderKind::Mapbox => Box::new(MapboxApi::adapter(descriptor)?),
        ProviderKind::OpenRouteService => Box::new(OrsApi::adapter(descriptor)?),
    };
    Ok(adapter)
}
