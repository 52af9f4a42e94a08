//! Process-lifetime counters for diagnostics.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProviderStats {
    pub success_count: u64,
    pub failure_count: u64,
}

/// Read-only copy of every counter at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub providers: BTreeMap<String, ProviderStats>,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cached_routes: usize,
    pub local_fallbacks: u64,
    pub straight_line_fallbacks: u64,
}

#[derive(Debug, Default)]
struct Counters {
    success: AtomicU64,
    failure: AtomicU64,
}

/// Monotonic counters. Provider names are fixed at construction so the map
/// itself is never mutated after that.
#[derive(Debug, Default)]
pub struct StatsRegistry {
    providers: BTreeMap<String, Counters>,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    local_fallbacks: AtomicU64,
    straight_line_fallbacks: AtomicU64,
}

impl StatsRegistry {
    pub fn new<'a>(provider_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            providers: provider_names
                .into_iter()
                .map(|name| (name.to_string(), Counters::default()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn record_success(&self, provider: &str) {
        if let Some(counters) = self.providers.get(provider) {
            counters.success.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_failure(&self, provider: &str) {
        if let Some(counters) = self.providers.get(provider) {
            counters.failure.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_local_fallback(&self) {
        self.local_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_straight_line(&self) {
        self.straight_line_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, cached_routes: usize) -> StatsSnapshot {
        StatsSnapshot {
            providers: self
                .providers
                .iter()
                .map(|(name, counters)| {
                    (
                        name.clone(),
                        ProviderStats {
                            success_count: counters.success.load(Ordering::Relaxed),
                            failure_count: counters.failure.load(Ordering::Relaxed),
                        },
                    )
                })
                .collect(),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cached_routes,
            local_fallbacks: self.local_fallbacks.load(Ordering::Relaxed),
            straight_line_fallbacks: self.straight_line_fallbacks.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_per_provider() {
        let stats = StatsRegistry::new(["osrm", "ors"]);
        stats.record_success("osrm");
        stats.record_failure("osrm");
        stats.record_failure("ors");
        stats.record_failure("ors");

        let snapshot = stats.snapshot(0);
        assert_eq!(
            snapshot.providers["osrm"],
            ProviderStats {
                success_count: 1,
                failure_count: 1
            }
        );
        assert_eq!(snapshot.providers["ors"].failure_count, 2);
    }

    #[test]
    fn test_unknown_provider_is_ignored() {
        let stats = StatsRegistry::new(["osrm"]);
        stats.record_success("nope");
        let snapshot = stats.snapshot(0);
        assert_eq!(snapshot.providers.len(), 1);
        assert_eq!(snapshot.providers["osrm"], ProviderStats::default());
    }

    #[test]
    fn test_engine_counters() {
        let stats = StatsRegistry::new(Vec::<&str>::new());
        stats.record_cache_hit();
        stats.record_cache_miss();
        stats.record_cache_miss();
        stats.record_local_fallback();
        stats.record_straight_line();
        let snapshot = stats.snapshot(4);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.cache_misses, 2);
        assert_eq!(snapshot.cached_routes, 4);
        assert_eq!(snapshot.local_fallbacks, 1);
        assert_eq!(snapshot.straight_line_fallbacks, 1);
    }
}
