//! Engine configuration: provider chain, cache bound, synthesizer tuning.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{Result, RoutingError};
use crate::provider::{ProviderDescriptor, ProviderKind};
use crate::synth::SynthesizerConfig;

pub const ENV_OSRM_URL: &str = "HYBRID_ROUTER_OSRM_URL";
pub const ENV_MAPBOX_TOKEN: &str = "HYBRID_ROUTER_MAPBOX_TOKEN";
pub const ENV_ORS_KEY: &str = "HYBRID_ROUTER_ORS_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub providers: Vec<ProviderDescriptor>,
    pub cache_capacity: usize,
    /// Fixed seed for synthesized paths. `None` draws from the OS.
    pub seed: Option<u64>,
    pub synthesizer: SynthesizerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderDescriptor::osrm_demo(),
                ProviderDescriptor::mapbox(None),
                ProviderDescriptor::openrouteservice(None),
            ],
            cache_capacity: DEFAULT_CAPACITY,
            seed: None,
            synthesizer: SynthesizerConfig::default(),
        }
    }
}

impl EngineConfig {
    /// No external providers; every route is synthesized locally.
    pub fn offline() -> Self {
        Self {
            providers: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| RoutingError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Applies `HYBRID_ROUTER_*` variables on top of this config.
    /// Empty variables are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        for provider in &mut self.providers {
            match provider.kind {
                ProviderKind::Osrm => {
                    if let Some(url) = var(ENV_OSRM_URL) {
                        provider.base_url = url;
                    }
                }
                ProviderKind::Mapbox => {
                    if let Some(token) = var(ENV_MAPBOX_TOKEN) {
                        provider.key = Some(token);
                    }
                }
                ProviderKind::OpenRouteService => {
                    if let Some(key) = var(ENV_ORS_KEY) {
                        provider.key = Some(key);
                    }
                }
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        for provider in &self.providers {
            if provider.name.trim().is_empty() {
                return Err(RoutingError::Config("provider name must not be empty".into()));
            }
            if provider.timeout_ms == 0 {
                return Err(RoutingError::Config(format!(
                    "provider {} has a zero timeout",
                    provider.name
                )));
            }
            if !provider.base_url.starts_with("http://") && !provider.base_url.starts_with("https://") {
                return Err(RoutingError::Config(format!(
                    "provider {} has a non-http base_url: {}",
                    provider.name, provider.base_url
                )));
            }
        }
        if self.synthesizer.samples_per_segment == 0 {
            return Err(RoutingError::Config(
                "synthesizer.samples_per_segment must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
