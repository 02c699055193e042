//! Service construction from configuration.
//!
//! Components are created in dependency order and passed explicitly into the
//! components that use them. Nothing is stored in process-wide statics, so
//! several services with different configurations can coexist (tests do).

use std::path::PathBuf;
use std::sync::Arc;

use climarisk_calculator::RiskCalculator;
use climarisk_core::config::ClimaConfig;
use climarisk_core::errors::ClimaResult;
use climarisk_core::traits::{ICacheBackend, IHazardProvider, ILocationResolver};
use climarisk_grid::GridMapper;
use climarisk_providers::MunicipalityRegistry;

use crate::service::RiskService;

/// Options for building a service.
#[derive(Debug, Default)]
pub struct ServiceOptions {
    /// TOML configuration file. Takes precedence over `config_toml`.
    pub config_path: Option<PathBuf>,
    /// TOML configuration string. If both are None, defaults are used.
    pub config_toml: Option<String>,
    /// Install the global tracing subscriber from `[observability]`.
    pub init_tracing: bool,
}

impl ServiceOptions {
    pub fn load_config(&self) -> ClimaResult<ClimaConfig> {
        match (&self.config_path, &self.config_toml) {
            (Some(path), _) => ClimaConfig::load(path),
            (None, Some(toml_str)) => ClimaConfig::from_toml(toml_str),
            (None, None) => Ok(ClimaConfig::default()),
        }
    }
}

impl RiskService {
    /// Build a service from options.
    pub fn from_options(opts: ServiceOptions) -> ClimaResult<Self> {
        let config = opts.load_config()?;
        if opts.init_tracing {
            climarisk_observability::init_tracing(&config.observability);
        }
        Self::bootstrap(config)
    }

    /// Wire every component from configuration.
    pub fn bootstrap(config: ClimaConfig) -> ClimaResult<Self> {
        config.validate()?;

        // Cache
        let cache = climarisk_cache::create_backend(&config.cache)?;

        // Location resolver
        let resolver: Arc<dyn ILocationResolver> = Arc::new(MunicipalityRegistry::builtin());

        // Providers (each wrapped with cache, retry and breaker)
        let providers = climarisk_providers::build_providers(&config, Arc::clone(&cache), Arc::clone(&resolver))?;

        Self::assemble(config, cache, resolver, providers)
    }

    /// Build a service from caller-supplied parts, e.g. scripted providers.
    pub fn from_parts(
        config: ClimaConfig,
        cache: Arc<dyn ICacheBackend>,
        resolver: Arc<dyn ILocationResolver>,
        providers: Vec<Arc<dyn IHazardProvider>>,
    ) -> ClimaResult<Self> {
        config.validate()?;
        Self::assemble(config, cache, resolver, providers)
    }

    fn assemble(
        config: ClimaConfig,
        cache: Arc<dyn ICacheBackend>,
        resolver: Arc<dyn ILocationResolver>,
        providers: Vec<Arc<dyn IHazardProvider>>,
    ) -> ClimaResult<Self> {
        let provider_count = providers.len();
        let calculator = RiskCalculator::new(&config, providers)?
            .with_cache(Arc::clone(&cache))
            .with_resolver(resolver);
        let calculator = Arc::new(calculator);
        let grid = GridMapper::new(Arc::clone(&calculator), config.grid.clone());

        tracing::info!(
            providers = provider_count,
            cache = cache.name(),
            workers = config.calculator.worker_threads,
            "risk service initialized"
        );

        Ok(Self::new(config, cache, calculator, grid))
    }
}
