//! hybrid-router core
//!
//! Point-to-point route computation over a prioritized chain of external
//! routing providers, with caching, a local path synthesizer when every
//! provider fails, and a straight line as the last resort.

pub mod bezier;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod http;
pub mod mapbox;
pub mod ors;
pub mod osrm;
pub mod polyline;
pub mod provider;
pub mod route;
pub mod stats;
pub mod synth;
pub mod traits;

pub use config::EngineConfig;
pub use engine::{EngineOptions, RoutingEngine};
pub use error::{AdapterError, Result, RoutingError, SynthesisError};
pub use geo::{GeoPoint, Profile};
pub use route::{BatchRoute, RouteMethod, RouteRequest, RouteResult};
pub use stats::{ProviderStats, StatsSnapshot};
