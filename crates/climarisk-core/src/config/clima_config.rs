//! Top-level climarisk configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    CacheConfig, CalculatorConfig, GridConfig, ObservabilityConfig, ProvidersConfig,
    ResilienceConfig,
};
use crate::errors::{ClimaError, ClimaResult};

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClimaConfig {
    pub cache: CacheConfig,
    pub resilience: ResilienceConfig,
    pub providers: ProvidersConfig,
    pub calculator: CalculatorConfig,
    pub grid: GridConfig,
    pub observability: ObservabilityConfig,
}

fn invalid(field: &str, message: &str) -> ClimaError {
    ClimaError::Config {
        reason: format!("{field}: {message}"),
    }
}

fn check_unit(field: &str, value: f64) -> ClimaResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0.0 and 1.0"))
    }
}

impl ClimaConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> ClimaResult<Self> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ClimaError::Config {
            reason: format!("<string>: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> ClimaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ClimaError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ClimaError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> ClimaResult<()> {
        let r = &self.resilience;
        if r.max_attempts == 0 {
            return Err(invalid("resilience.max_attempts", "must be at least 1"));
        }
        if r.exponential_base < 1.0 {
            return Err(invalid("resilience.exponential_base", "must be >= 1.0"));
        }
        if r.failure_threshold == 0 {
            return Err(invalid("resilience.failure_threshold", "must be at least 1"));
        }
        if r.call_timeout_ms == 0 {
            return Err(invalid("resilience.call_timeout_ms", "must be greater than 0"));
        }

        let c = &self.calculator;
        if c.worker_threads == 0 {
            return Err(invalid("calculator.worker_threads", "must be at least 1"));
        }
        check_unit("calculator.geographic_weight", c.geographic_weight)?;
        check_unit("calculator.confidence.cap", c.confidence.cap)?;
        check_unit("calculator.confidence.live_bonus", c.confidence.live_bonus)?;
        check_unit("calculator.confidence.degraded_penalty", c.confidence.degraded_penalty)?;
        if c.hazard_weights.values().any(|w| *w < 0.0) || c.default_hazard_weight < 0.0 {
            return Err(invalid("calculator.hazard_weights", "weights must be non-negative"));
        }
        if c.baseline.heat_stress.latitude_span == 0.0 {
            return Err(invalid("calculator.baseline.heat_stress.latitude_span", "must be non-zero"));
        }

        let g = &self.grid;
        if g.min_resolution > g.max_resolution || g.max_resolution > 15 {
            return Err(invalid("grid.min_resolution", "must be <= max_resolution <= 15"));
        }
        if !(g.min_resolution..=g.max_resolution).contains(&g.default_resolution) {
            return Err(invalid("grid.default_resolution", "must lie within min..=max"));
        }
        check_unit("grid.decay_coefficient", g.decay_coefficient)?;
        check_unit("grid.default_base_risk", g.default_base_risk)?;
        if g.edge_lengths_km.iter().any(|e| e.km <= 0.0) || g.fallback_edge_length_km <= 0.0 {
            return Err(invalid("grid.edge_lengths_km", "edge lengths must be positive"));
        }
        Ok(())
    }
}
