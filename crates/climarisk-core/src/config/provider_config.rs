use serde::{Deserialize, Serialize};

use super::defaults;

/// Where a provider gets its data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderMode {
    /// Built-in reference tables and models. No network.
    #[default]
    Reference,
    /// Remote HTTP API (requires the `live` feature of climarisk-providers).
    Live,
}

/// Settings for one provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub enabled: bool,
    pub mode: ProviderMode,
    pub base_url: String,
    pub api_token: Option<String>,
    /// Overrides `resilience.failure_threshold` for this provider.
    pub failure_threshold: Option<u32>,
    /// Overrides `resilience.recovery_timeout_secs` for this provider.
    pub recovery_timeout_secs: Option<u64>,
    /// Search radius when matching a location to a station or municipality.
    pub match_radius_km: Option<f64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: ProviderMode::default(),
            base_url: String::new(),
            api_token: None,
            failure_threshold: None,
            recovery_timeout_secs: None,
            match_radius_km: None,
        }
    }
}

impl ProviderSettings {
    fn with_url(url: &str) -> Self {
        Self {
            base_url: url.to_string(),
            ..Self::default()
        }
    }
}

/// Settings for every built-in provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub climate_projection: ProviderSettings,
    pub hydrological: ProviderSettings,
    pub occurrence_history: ProviderSettings,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            climate_projection: ProviderSettings::with_url(defaults::DEFAULT_CLIMATE_PROJECTION_URL),
            hydrological: ProviderSettings::with_url(defaults::DEFAULT_HYDROLOGICAL_URL),
            occurrence_history: ProviderSettings::with_url(defaults::DEFAULT_OCCURRENCE_HISTORY_URL),
        }
    }
}
