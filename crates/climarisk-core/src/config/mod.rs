//! Configuration system for climarisk.
//! TOML-based; every section falls back to the compiled defaults in `defaults`.

pub mod cache_config;
pub mod calculator_config;
pub mod clima_config;
pub mod defaults;
pub mod grid_config;
pub mod observability_config;
pub mod provider_config;
pub mod resilience_config;

pub use cache_config::{CacheBackendKind, CacheConfig};
pub use calculator_config::{
    BaselineConfig, Bound, CalculatorConfig, ConfidenceConfig, HorizonMultipliers,
    LatitudeGradient, NoiseConfig, NoiseMode, RegionRule, RegionTable, ScenarioMultipliers,
    SensitivityConfig,
};
pub use clima_config::ClimaConfig;
pub use grid_config::GridConfig;
pub use observability_config::ObservabilityConfig;
pub use provider_config::{ProviderMode, ProviderSettings, ProvidersConfig};
pub use resilience_config::ResilienceConfig;
