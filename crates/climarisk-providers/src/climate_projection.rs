//! Regional climate projection provider.
//!
//! Temperature-driven hazards (heat stress, coastal inundation) receive a
//! warming delta in °C; the rest receive a precipitation change in percent.
//! Reference mode evaluates a built-in ensemble summary; live mode queries
//! the projection API.

use climarisk_core::config::{ProviderMode, ProviderSettings};
use climarisk_core::constants::PROJECTION_REFERENCE_YEAR;
use climarisk_core::errors::ProviderError;
use climarisk_core::models::{
    HazardType, ProviderRole, ProviderSignal, RiskScenario, SignalKind, SignalQuery,
};
use climarisk_core::traits::IHazardProvider;
use climarisk_core::CallContext;

use crate::transport::http_client::number_field;
use crate::transport::{HttpClient, HttpClientConfig};

pub const PROVIDER_NAME: &str = "climate_projection";
pub const MODEL_NAME: &str = "INPE-Eta_HadGEM2-ES";

/// Warming at the reference model's unit forcing factor (°C).
const WARMING_PER_FACTOR_C: f64 = 1.5;
/// Precipitation change per unit factor, south of 10°S (%).
const SOUTH_PRECIP_PER_FACTOR_PCT: f64 = -5.0;
/// Precipitation change per unit factor, north of 10°S (%).
const NORTH_PRECIP_PER_FACTOR_PCT: f64 = -10.0;
const SOUTH_LATITUDE_BOUNDARY: f64 = -10.0;
const REFERENCE_CONFIDENCE: f64 = 0.6;

/// Forcing factors at 2030, 2050, 2070 and 2100.
const HORIZON_YEARS: [u16; 4] = [2030, 2050, 2070, 2100];

fn horizon_factors(scenario: RiskScenario) -> [f64; 4] {
    match scenario {
        RiskScenario::Low => [0.3, 0.5, 0.6, 0.7],
        RiskScenario::Moderate => [0.4, 0.7, 1.0, 1.3],
        RiskScenario::High => [0.5, 1.2, 2.0, 3.0],
    }
}

/// Forcing factor for `year`, linear between horizons and zero at the
/// reference period. Years past the last horizon hold its value.
pub fn forcing_factor(scenario: RiskScenario, year: u16) -> f64 {
    let factors = horizon_factors(scenario);
    let mut prev_year = PROJECTION_REFERENCE_YEAR;
    let mut prev_factor = 0.0;
    if year <= prev_year {
        return 0.0;
    }
    for (y, f) in HORIZON_YEARS.iter().zip(factors) {
        if year <= *y {
            let t = f64::from(year - prev_year) / f64::from(y - prev_year);
            return prev_factor + t * (f - prev_factor);
        }
        prev_year = *y;
        prev_factor = f;
    }
    prev_factor
}

/// Ensemble-summary projection for one query.
pub fn reference_projection(query: &SignalQuery) -> ProviderSignal {
    let factor = forcing_factor(query.scenario, query.year);
    let (value, kind) = if query.hazard.is_temperature_driven() {
        (WARMING_PER_FACTOR_C * factor, SignalKind::TemperatureDeltaC)
    } else {
        let per_factor = if query.latitude < SOUTH_LATITUDE_BOUNDARY {
            SOUTH_PRECIP_PER_FACTOR_PCT
        } else {
            NORTH_PRECIP_PER_FACTOR_PCT
        };
        (per_factor * factor, SignalKind::PrecipitationChangePct)
    };
    ProviderSignal {
        value,
        confidence: REFERENCE_CONFIDENCE,
        source: PROVIDER_NAME.to_string(),
        kind,
    }
}

enum Backend {
    Reference,
    Live(HttpClient),
}

pub struct ClimateProjectionProvider {
    backend: Backend,
}

impl ClimateProjectionProvider {
    pub fn reference() -> Self {
        Self {
            backend: Backend::Reference,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let backend = match settings.mode {
            ProviderMode::Reference => Backend::Reference,
            ProviderMode::Live => Backend::Live(HttpClient::new(
                PROVIDER_NAME,
                HttpClientConfig {
                    base_url: settings.base_url.clone(),
                    bearer_token: settings.api_token.clone(),
                },
            )?),
        };
        Ok(Self { backend })
    }

    fn live_signal(
        client: &HttpClient,
        query: &SignalQuery,
        ctx: &CallContext,
    ) -> Result<ProviderSignal, ProviderError> {
        let (variable, field, kind) = if query.hazard.is_temperature_driven() {
            ("tas", "temperature_increase_c", SignalKind::TemperatureDeltaC)
        } else {
            ("pr", "precipitation_change_pct", SignalKind::PrecipitationChangePct)
        };
        let body = client.get_json(
            "/projection",
            &[
                ("lat", query.latitude.to_string()),
                ("lon", query.longitude.to_string()),
                ("scenario", query.scenario.pathway().to_string()),
                ("year", query.year.to_string()),
                ("variable", variable.to_string()),
                ("model", MODEL_NAME.to_string()),
            ],
            ctx.effective_timeout(),
        )?;
        let value = number_field(PROVIDER_NAME, &body, field)?;
        let confidence = number_field(PROVIDER_NAME, &body, "confidence")
            .unwrap_or(REFERENCE_CONFIDENCE)
            .clamp(0.0, 1.0);
        Ok(ProviderSignal {
            value,
            confidence,
            source: PROVIDER_NAME.to_string(),
            kind,
        })
    }
}

impl IHazardProvider for ClimateProjectionProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn role(&self) -> ProviderRole {
        ProviderRole::Projection
    }

    fn supports(&self, _hazard: HazardType) -> bool {
        true
    }

    fn signal(&self, query: &SignalQuery, ctx: &CallContext) -> Result<ProviderSignal, ProviderError> {
        match &self.backend {
            Backend::Reference => Ok(reference_projection(query)),
            Backend::Live(client) => Self::live_signal(client, query, ctx),
        }
    }
}
