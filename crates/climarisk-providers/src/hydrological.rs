//! Hydrological telemetry provider (flood only).
//!
//! Maps a location to the nearest gauge station within the match radius and
//! turns its trailing 7-day rainfall into a flood risk score.

use climarisk_core::config::{defaults, ProviderMode, ProviderSettings};
use climarisk_core::errors::ProviderError;
use climarisk_core::geo::haversine_km;
use climarisk_core::models::{HazardType, ProviderRole, ProviderSignal, SignalKind, SignalQuery};
use climarisk_core::traits::IHazardProvider;
use climarisk_core::CallContext;

use crate::transport::http_client::number_field;
use crate::transport::{HttpClient, HttpClientConfig};

pub const PROVIDER_NAME: &str = "hydrological";
const SIGNAL_CONFIDENCE: f64 = 0.7;

/// A telemetry gauge station.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Representative trailing 7-day rainfall used in reference mode (mm).
    pub reference_rainfall_mm_7d: f64,
}

impl Station {
    fn new(code: &str, name: &str, lat: f64, lon: f64, rainfall: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            reference_rainfall_mm_7d: rainfall,
        }
    }
}

pub fn builtin_stations() -> Vec<Station> {
    vec![
        Station::new("58001000", "São Paulo - Tietê", -23.5505, -46.6333, 110.0),
        Station::new("60491000", "Brasília - Paranoá", -15.7801, -47.9292, 60.0),
        Station::new("62755000", "Rio de Janeiro - Guandu", -22.9068, -43.1729, 210.0),
    ]
}

/// Flood score from trailing 7-day rainfall (mm).
pub fn rainfall_to_flood_score(rainfall_mm_7d: f64) -> f64 {
    if rainfall_mm_7d < 100.0 {
        0.2
    } else if rainfall_mm_7d < 200.0 {
        0.4
    } else if rainfall_mm_7d < 300.0 {
        0.6
    } else {
        0.8
    }
}

enum Backend {
    Reference,
    Live(HttpClient),
}

pub struct HydrologicalProvider {
    stations: Vec<Station>,
    radius_km: f64,
    backend: Backend,
}

impl HydrologicalProvider {
    pub fn reference() -> Self {
        Self::with_stations(builtin_stations(), defaults::DEFAULT_STATION_RADIUS_KM)
    }

    pub fn with_stations(stations: Vec<Station>, radius_km: f64) -> Self {
        Self {
            stations,
            radius_km,
            backend: Backend::Reference,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let mut provider = Self::with_stations(
            builtin_stations(),
            settings
                .match_radius_km
                .unwrap_or(defaults::DEFAULT_STATION_RADIUS_KM),
        );
        if settings.mode == ProviderMode::Live {
            provider.backend = Backend::Live(HttpClient::new(
                PROVIDER_NAME,
                HttpClientConfig {
                    base_url: settings.base_url.clone(),
                    bearer_token: settings.api_token.clone(),
                },
            )?);
        }
        Ok(provider)
    }

    /// Nearest station within the match radius.
    pub fn nearest_station(&self, latitude: f64, longitude: f64) -> Option<&Station> {
        self.stations
            .iter()
            .map(|s| (s, haversine_km(latitude, longitude, s.latitude, s.longitude)))
            .filter(|(_, d)| *d <= self.radius_km)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s)
    }

    fn rainfall(&self, station: &Station, ctx: &CallContext) -> Result<f64, ProviderError> {
        match &self.backend {
            Backend::Reference => Ok(station.reference_rainfall_mm_7d),
            Backend::Live(client) => {
                let body = client.get_json(
                    "/telemetry/rainfall",
                    &[("station", station.code.clone()), ("days", "7".to_string())],
                    ctx.effective_timeout(),
                )?;
                number_field(PROVIDER_NAME, &body, "rainfall_mm_7d")
            }
        }
    }
}

impl IHazardProvider for HydrologicalProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn role(&self) -> ProviderRole {
        ProviderRole::Observation
    }

    fn supports(&self, hazard: HazardType) -> bool {
        hazard == HazardType::Flood
    }

    fn signal(&self, query: &SignalQuery, ctx: &CallContext) -> Result<ProviderSignal, ProviderError> {
        if !self.supports(query.hazard) {
            return Err(ProviderError::Unsupported {
                provider: PROVIDER_NAME.to_string(),
                hazard: query.hazard.to_string(),
            });
        }
        let station = self
            .nearest_station(query.latitude, query.longitude)
            .ok_or_else(|| ProviderError::NoData {
                provider: PROVIDER_NAME.to_string(),
            })?;
        let rainfall = self.rainfall(station, ctx)?;
        tracing::debug!(station = %station.code, rainfall, "station rainfall");
        Ok(ProviderSignal {
            value: rainfall_to_flood_score(rainfall),
            confidence: SIGNAL_CONFIDENCE,
            source: PROVIDER_NAME.to_string(),
            kind: SignalKind::RiskScore,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climarisk_core::models::RiskScenario;
    use std::time::Duration;

    fn query(hazard: HazardType, lat: f64, lon: f64) -> SignalQuery {
        SignalQuery {
            hazard,
            latitude: lat,
            longitude: lon,
            scenario: RiskScenario::Moderate,
            year: 2024,
        }
    }

    #[test]
    fn rainfall_thresholds() {
        assert_eq!(rainfall_to_flood_score(0.0), 0.2);
        assert_eq!(rainfall_to_flood_score(99.9), 0.2);
        assert_eq!(rainfall_to_flood_score(100.0), 0.4);
        assert_eq!(rainfall_to_flood_score(250.0), 0.6);
        assert_eq!(rainfall_to_flood_score(300.0), 0.8);
    }

    #[test]
    fn station_lookup_respects_radius() {
        let p = HydrologicalProvider::reference();
        assert_eq!(p.nearest_station(-23.6, -46.7).unwrap().code, "58001000");
        assert!(p.nearest_station(-3.1, -60.0).is_none());
    }

    #[test]
    fn signals_for_covered_and_uncovered_locations() {
        let p = HydrologicalProvider::reference();
        let ctx = CallContext::unbounded(Duration::from_secs(1));
        let rio = p.signal(&query(HazardType::Flood, -22.9, -43.2), &ctx).unwrap();
        assert_eq!(rio.value, 0.6);
        assert_eq!(rio.kind, SignalKind::RiskScore);

        let err = p.signal(&query(HazardType::Flood, -3.1, -60.0), &ctx).unwrap_err();
        assert!(matches!(err, ProviderError::NoData { .. }));

        let err = p.signal(&query(HazardType::Drought, -22.9, -43.2), &ctx).unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
    }
}
