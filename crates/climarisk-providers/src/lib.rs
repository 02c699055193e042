//! # climarisk-providers
//!
//! Hazard signal sources behind [`IHazardProvider`]:
//! - [`ClimateProjectionProvider`]: regional warming and precipitation trends.
//! - [`HydrologicalProvider`]: flood risk from gauge-station rainfall.
//! - [`OccurrenceHistoryProvider`]: recorded disaster frequency per municipality.
//!
//! [`build_providers`] assembles the enabled set from configuration, each one
//! wrapped in a [`ResilientProvider`].

pub mod climate_projection;
pub mod hydrological;
pub mod occurrence_history;
pub mod registry;
pub mod resilient;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use climarisk_core::config::{ClimaConfig, ProviderSettings};
use climarisk_core::errors::ClimaResult;
use climarisk_core::traits::{ICacheBackend, IHazardProvider, ILocationResolver};
use climarisk_resilience::{BreakerSettings, RetryPolicy};

pub use climate_projection::ClimateProjectionProvider;
pub use hydrological::HydrologicalProvider;
pub use occurrence_history::OccurrenceHistoryProvider;
pub use registry::{Municipality, MunicipalityRegistry, SocioProfile};
pub use resilient::{ResilientProvider, SignalCache};

/// Build every enabled provider, wrapped with retry, breaker and signal cache.
pub fn build_providers(
    config: &ClimaConfig,
    cache: Arc<dyn ICacheBackend>,
    resolver: Arc<dyn ILocationResolver>,
) -> ClimaResult<Vec<Arc<dyn IHazardProvider>>> {
    let providers = &config.providers;
    let mut raw: Vec<(Arc<dyn IHazardProvider>, &ProviderSettings)> = Vec::new();

    if providers.climate_projection.enabled {
        raw.push((
            Arc::new(ClimateProjectionProvider::from_settings(&providers.climate_projection)?),
            &providers.climate_projection,
        ));
    }
    if providers.hydrological.enabled {
        raw.push((
            Arc::new(HydrologicalProvider::from_settings(&providers.hydrological)?),
            &providers.hydrological,
        ));
    }
    if providers.occurrence_history.enabled {
        raw.push((
            Arc::new(OccurrenceHistoryProvider::from_settings(
                &providers.occurrence_history,
                resolver,
            )?),
            &providers.occurrence_history,
        ));
    }

    let policy = RetryPolicy::from_config(&config.resilience);
    let signal_cache = SignalCache {
        backend: cache,
        ttl: Duration::from_secs(config.cache.provider_ttl_secs),
        key_precision: config.cache.key_precision,
    };

    Ok(raw
        .into_iter()
        .map(|(inner, settings)| {
            tracing::info!(provider = inner.name(), mode = ?settings.mode, "hazard provider enabled");
            let wrapped = ResilientProvider::new(
                inner,
                policy.clone(),
                BreakerSettings::resolve(&config.resilience, settings),
            )
            .with_cache(signal_cache.clone());
            Arc::new(wrapped) as Arc<dyn IHazardProvider>
        })
        .collect())
}
