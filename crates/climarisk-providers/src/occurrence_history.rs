//! Disaster occurrence history provider.
//!
//! Resolves a location to the nearest municipality and scores its average
//! number of recorded events per year: `min(1, annual / 20)`.

use std::collections::BTreeMap;
use std::sync::Arc;

use climarisk_core::config::{defaults, ProviderMode, ProviderSettings};
use climarisk_core::errors::ProviderError;
use climarisk_core::models::{HazardType, ProviderRole, ProviderSignal, SignalKind, SignalQuery};
use climarisk_core::traits::{IHazardProvider, ILocationResolver};
use climarisk_core::CallContext;

use crate::transport::http_client::number_field;
use crate::transport::{HttpClient, HttpClientConfig};

pub const PROVIDER_NAME: &str = "occurrence_history";
const SIGNAL_CONFIDENCE: f64 = 0.75;
/// Annual event count that maps to a score of 1.0.
const SATURATION_EVENTS_PER_YEAR: f64 = 20.0;

const COVERED: [HazardType; 3] = [HazardType::Flood, HazardType::Landslide, HazardType::Drought];

/// Average recorded events per year for one municipality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualOccurrences {
    pub flood: f64,
    pub landslide: f64,
    pub drought: f64,
}

impl AnnualOccurrences {
    fn for_hazard(&self, hazard: HazardType) -> Option<f64> {
        match hazard {
            HazardType::Flood => Some(self.flood),
            HazardType::Landslide => Some(self.landslide),
            HazardType::Drought => Some(self.drought),
            _ => None,
        }
    }
}

/// Built-in history keyed by IBGE code.
pub fn builtin_history() -> BTreeMap<String, AnnualOccurrences> {
    let rows: [(&str, f64, f64, f64); 10] = [
        ("3550308", 12.0, 15.0, 2.0),
        ("3304557", 10.0, 20.0, 3.0),
        ("2927408", 8.0, 7.0, 4.0),
        ("2304400", 6.0, 2.0, 12.0),
        ("1302603", 18.0, 3.0, 1.0),
        ("4106902", 7.0, 6.0, 3.0),
        ("3106200", 9.0, 12.0, 2.0),
        ("5300108", 5.0, 1.0, 8.0),
        ("2611606", 14.0, 5.0, 6.0),
        ("4314902", 11.0, 4.0, 4.0),
    ];
    rows.into_iter()
        .map(|(code, flood, landslide, drought)| {
            (
                code.to_string(),
                AnnualOccurrences {
                    flood,
                    landslide,
                    drought,
                },
            )
        })
        .collect()
}

pub fn occurrences_to_score(annual: f64) -> f64 {
    (annual / SATURATION_EVENTS_PER_YEAR).clamp(0.0, 1.0)
}

enum Backend {
    Reference(BTreeMap<String, AnnualOccurrences>),
    Live(HttpClient),
}

pub struct OccurrenceHistoryProvider {
    resolver: Arc<dyn ILocationResolver>,
    radius_km: f64,
    backend: Backend,
}

impl OccurrenceHistoryProvider {
    pub fn reference(resolver: Arc<dyn ILocationResolver>) -> Self {
        Self {
            resolver,
            radius_km: defaults::DEFAULT_MUNICIPALITY_RADIUS_KM,
            backend: Backend::Reference(builtin_history()),
        }
    }

    pub fn from_settings(
        settings: &ProviderSettings,
        resolver: Arc<dyn ILocationResolver>,
    ) -> Result<Self, ProviderError> {
        let backend = match settings.mode {
            ProviderMode::Reference => Backend::Reference(builtin_history()),
            ProviderMode::Live => Backend::Live(HttpClient::new(
                PROVIDER_NAME,
                HttpClientConfig {
                    base_url: settings.base_url.clone(),
                    bearer_token: settings.api_token.clone(),
                },
            )?),
        };
        Ok(Self {
            resolver,
            radius_km: settings
                .match_radius_km
                .unwrap_or(defaults::DEFAULT_MUNICIPALITY_RADIUS_KM),
            backend,
        })
    }

    fn no_data() -> ProviderError {
        ProviderError::NoData {
            provider: PROVIDER_NAME.to_string(),
        }
    }

    fn annual_occurrences(
        &self,
        ibge_code: &str,
        hazard: HazardType,
        ctx: &CallContext,
    ) -> Result<f64, ProviderError> {
        match &self.backend {
            Backend::Reference(history) => history
                .get(ibge_code)
                .and_then(|h| h.for_hazard(hazard))
                .ok_or_else(Self::no_data),
            Backend::Live(client) => {
                let body = client.get_json(
                    "/occurrences",
                    &[
                        ("ibge_code", ibge_code.to_string()),
                        ("hazard", hazard.as_str().to_string()),
                    ],
                    ctx.effective_timeout(),
                )?;
                number_field(PROVIDER_NAME, &body, "annual_occurrences")
            }
        }
    }
}

impl IHazardProvider for OccurrenceHistoryProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn role(&self) -> ProviderRole {
        ProviderRole::Observation
    }

    fn supports(&self, hazard: HazardType) -> bool {
        COVERED.contains(&hazard)
    }

    fn signal(&self, query: &SignalQuery, ctx: &CallContext) -> Result<ProviderSignal, ProviderError> {
        if !self.supports(query.hazard) {
            return Err(ProviderError::Unsupported {
                provider: PROVIDER_NAME.to_string(),
                hazard: query.hazard.to_string(),
            });
        }
        let municipality = self
            .resolver
            .nearest(query.latitude, query.longitude, self.radius_km)
            .ok_or_else(Self::no_data)?;
        let annual = self.annual_occurrences(&municipality.id, query.hazard, ctx)?;
        Ok(ProviderSignal {
            value: occurrences_to_score(annual),
            confidence: SIGNAL_CONFIDENCE,
            source: PROVIDER_NAME.to_string(),
            kind: SignalKind::RiskScore,
        })
    }
}
