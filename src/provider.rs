//! Static description of an external routing provider.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Wire dialect spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Osrm,
    Mapbox,
    #[serde(alias = "ors")]
    OpenRouteService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub kind: ProviderKind,
    pub base_url: String,
    #[serde(default)]
    pub requires_key: bool,
    #[serde(default)]
    pub key: Option<String>,
    /// Lower values are tried first.
    pub priority: i32,
    pub timeout_ms: u64,
}

impl ProviderDescriptor {
    pub fn osrm_demo() -> Self {
        Self {
            name: "OSRM".to_string(),
            kind: ProviderKind::Osrm,
            base_url: "https://router.project-osrm.org/route/v1".to_string(),
            requires_key: false,
            key: None,
            priority: 1,
            timeout_ms: 5_000,
        }
    }

    pub fn mapbox(key: Option<String>) -> Self {
        Self {
            name: "Mapbox".to_string(),
            kind: ProviderKind::Mapbox,
            base_url: "https://api.mapbox.com/directions/v5/mapbox".to_string(),
            requires_key: true,
            key,
            priority: 2,
            timeout_ms: 8_000,
        }
    }

    pub fn openrouteservice(key: Option<String>) -> Self {
        Self {
            name: "OpenRouteService".to_string(),
            kind: ProviderKind::OpenRouteService,
            base_url: "https://api.openrouteservice.org/v2/directions".to_string(),
            requires_key: true,
            key,
            priority: 3,
            timeout_ms: 8_000,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured key, ignoring blank strings.
    pub fn api_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.trim().is_empty())
    }

    /// False when a key is required but missing.
    pub fn is_usable(&self) -> bool {
        !self.requires_key || self.api_key().is_some()
    }

    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
