//! Error types for the engine, provider adapters, synthesis and polyline decoding.

use std::time::Duration;

use thiserror::Error;

/// Convenient result alias for the routing engine.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors surfaced by the engine, its constructors and configuration loading.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Raised before any network activity when a point is NaN or out of range.
    #[error("invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Every configured adapter failed; the engine falls back to synthesis.
    #[error("all {attempted} routing providers failed")]
    AllProvidersExhausted { attempted: usize },

    #[error("local path synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single provider call failed. Never escapes the engine.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("provider returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("no route found")]
    NoRouteFound,

    #[error("provider requires an API key but none is configured")]
    MissingKey,
}

impl AdapterError {
    /// Classifies a reqwest failure, separating deadline expiry from other transport errors.
    pub fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout { timeout }
        } else {
            AdapterError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Parse(err.to_string())
    }
}

impl From<PolylineError> for AdapterError {
    fn from(err: PolylineError) -> Self {
        AdapterError::Parse(format!("bad polyline geometry: {err}"))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SynthesisError {
    #[error("synthesized path contains non-finite values")]
    NonFinite,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid character {ch:?} at byte {index}")]
    InvalidCharacter { index: usize, ch: char },

    #[error("encoded polyline ended in the middle of a value")]
    Truncated,

    /// A value spans more than seven 5-bit groups, or the running
    /// coordinate no longer fits.
    #[error("encoded value starting at byte {index} overflows")]
    Overflow { index: usize },
}
