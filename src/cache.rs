//! Route memoization and in-flight deduplication.
//!
//! Both live behind the engine's single mutex so that "check the cache,
//! else join the pending computation" and "store the result, then retire
//! the pending entry" are each atomic.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use once_cell::sync::OnceCell;

use crate::geo::{GeoPoint, Profile};
use crate::route::RouteResult;

pub const DEFAULT_CAPACITY: usize = 10_000;

/// Cache key. Coordinates compare by bit pattern, with no rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteKey {
    start: (u64, u64),
    end: (u64, u64),
    profile: Profile,
}

impl RouteKey {
    pub fn new(start: GeoPoint, end: GeoPoint, profile: Profile) -> Self {
        Self {
            start: (coordinate_bits(start.lat), coordinate_bits(start.lng)),
            end: (coordinate_bits(end.lat), coordinate_bits(end.lng)),
            profile,
        }
    }

    /// Stable 64-bit mix of the key, used to derive per-route RNG seeds.
    pub fn fingerprint(&self) -> u64 {
        let profile = match self.profile {
            Profile::Drive => 1u64,
            Profile::Bicycle => 2,
            Profile::Walk => 3,
        };
        [self.start.0, self.start.1, self.end.0, self.end.1, profile]
            .iter()
            .fold(0xcbf2_9ce4_8422_2325u64, |acc, word| {
                (acc ^ word).wrapping_mul(0x0100_0000_01b3).rotate_left(17)
            })
    }
}

/// Bit pattern of a coordinate, with `-0.0` folded into `0.0`.
fn coordinate_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

pub type PendingRoute = Arc<OnceCell<RouteResult>>;

pub enum Lookup {
    Hit(RouteResult),
    /// Not cached yet; initialize or wait on the shared cell.
    Pending(PendingRoute),
}

pub struct RouteCache {
    entries: LruCache<RouteKey, RouteResult>,
    in_flight: HashMap<RouteKey, PendingRoute>,
}

impl RouteCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            in_flight: HashMap::new(),
        }
    }

    pub fn lookup(&mut self, key: &RouteKey) -> Lookup {
        if let Some(route) = self.entries.get(key) {
            return Lookup::Hit(route.clone());
        }
        let cell = self.in_flight.entry(*key).or_default();
        Lookup::Pending(Arc::clone(cell))
    }

    /// Finishes a computation: caches `result` when given and retires the
    /// pending entry if it still belongs to `cell`.
    pub fn complete(&mut self, key: RouteKey, cell: &PendingRoute, result: Option<RouteResult>) {
        if let Some(route) = result {
            self.entries.put(key, route);
        }
        if self
            .in_flight
            .get(&key)
            .is_some_and(|pending| Arc::ptr_eq(pending, cell))
        {
            self.in_flight.remove(&key);
        }
    }

    #[cfg(test)]
    fn get(&mut self, key: &RouteKey) -> Option<&RouteResult> {
        self.entries.get(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn pending(&self) -> usize {
        self.in_flight.len()
    }
}
