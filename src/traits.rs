//! Seams between the orchestrator and the things it orchestrates.
//!
//! The engine only knows these traits; HTTP providers, the local
//! synthesizer and test doubles all plug in behind them.

use std::time::Duration;

use rand::rngs::StdRng;

use crate::error::{AdapterError, SynthesisError};
use crate::geo::{GeoPoint, Profile};
use crate::route::RouteResult;

/// A routing source that may fail.
pub trait RouteAdapter: Send + Sync {
    /// Label used for stats and logs.
    fn name(&self) -> &str;

    /// Lower values are tried first.
    fn priority(&self) -> i32;

    /// Per-call deadline the engine passes to [`RouteAdapter::fetch_route`].
    fn timeout(&self) -> Duration;

    /// Computes one route. Implementations must return a path that starts
    /// and ends exactly at `start` and `end`, and must give up once
    /// `timeout` has elapsed.
    fn fetch_route(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
        timeout: Duration,
    ) -> Result<RouteResult, AdapterError>;
}

/// Produces a provider-free path when every adapter has failed.
pub trait PathSynthesizer: Send + Sync {
    fn synthesize(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        profile: Profile,
        rng: &mut StdRng,
    ) -> Result<RouteResult, SynthesisError>;
}
