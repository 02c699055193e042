//! Built-in municipality registry. Implements [`ILocationResolver`].

use serde::{Deserialize, Serialize};

use climarisk_core::errors::{ClimaError, ClimaResult};
use climarisk_core::geo::haversine_km;
use climarisk_core::models::{ResolvedLocation, VulnerabilityIndicator};
use climarisk_core::traits::ILocationResolver;

/// A municipality keyed by its 7-digit IBGE code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub ibge_code: String,
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<SocioProfile>,
}

/// Socio-economic figures used to derive a [`VulnerabilityIndicator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocioProfile {
    pub critical_infrastructure: u32,
    pub vulnerable_population_pct: f64,
    pub gdp_per_capita_brl: f64,
    pub green_area_m2_per_capita: f64,
}

impl SocioProfile {
    const fn new(critical_infrastructure: u32, vulnerable: f64, gdp: f64, green: f64) -> Self {
        Self {
            critical_infrastructure,
            vulnerable_population_pct: vulnerable,
            gdp_per_capita_brl: gdp,
            green_area_m2_per_capita: green,
        }
    }
}

impl Municipality {
    fn new(code: &str, name: &str, state: &str, lat: f64, lon: f64, population: u64) -> Self {
        Self {
            ibge_code: code.to_string(),
            name: name.to_string(),
            state: state.to_string(),
            latitude: lat,
            longitude: lon,
            population,
            profile: None,
        }
    }

    fn with_profile(mut self, profile: SocioProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn vulnerability(&self) -> Option<VulnerabilityIndicator> {
        self.profile.map(|p| {
            VulnerabilityIndicator::from_profile(
                self.population,
                p.vulnerable_population_pct,
                p.critical_infrastructure,
                p.gdp_per_capita_brl,
                p.green_area_m2_per_capita,
            )
        })
    }

    pub fn to_location(&self) -> ResolvedLocation {
        ResolvedLocation {
            id: self.ibge_code.clone(),
            name: self.name.clone(),
            state: Some(self.state.clone()),
            latitude: self.latitude,
            longitude: self.longitude,
            vulnerability: self.vulnerability(),
        }
    }
}

/// In-process municipality lookup.
#[derive(Debug, Clone)]
pub struct MunicipalityRegistry {
    municipalities: Vec<Municipality>,
}

impl Default for MunicipalityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MunicipalityRegistry {
    pub fn new(municipalities: Vec<Municipality>) -> Self {
        Self { municipalities }
    }

    /// Major Brazilian municipalities (2022 census population).
    pub fn builtin() -> Self {
        Self::new(vec![
            Municipality::new("3550308", "São Paulo", "SP", -23.5505, -46.6333, 11_451_245)
                .with_profile(SocioProfile::new(450, 0.28, 52_796.0, 13.2)),
            Municipality::new("3304557", "Rio de Janeiro", "RJ", -22.9068, -43.1729, 6_211_223)
                .with_profile(SocioProfile::new(320, 0.35, 48_275.0, 54.8)),
            Municipality::new("2927408", "Salvador", "BA", -12.9714, -38.5014, 2_886_698)
                .with_profile(SocioProfile::new(180, 0.32, 22_891.0, 18.5)),
            Municipality::new("2304400", "Fortaleza", "CE", -3.7172, -38.5433, 2_428_678)
                .with_profile(SocioProfile::new(150, 0.38, 21_065.0, 12.1)),
            Municipality::new("5300108", "Brasília", "DF", -15.7939, -47.8828, 2_817_068)
                .with_profile(SocioProfile::new(220, 0.18, 79_977.0, 95.3)),
            Municipality::new("4106902", "Curitiba", "PR", -25.4284, -49.2733, 1_773_718)
                .with_profile(SocioProfile::new(200, 0.15, 45_327.0, 64.5)),
            Municipality::new("1302603", "Manaus", "AM", -3.1190, -60.0217, 2_063_547)
                .with_profile(SocioProfile::new(140, 0.42, 29_341.0, 312.7)),
            Municipality::new("2611606", "Recife", "PE", -8.0476, -34.8770, 1_488_920)
                .with_profile(SocioProfile::new(160, 0.44, 28_237.0, 9.8)),
            Municipality::new("4314902", "Porto Alegre", "RS", -30.0346, -51.2177, 1_332_570)
                .with_profile(SocioProfile::new(180, 0.22, 48_149.0, 23.4)),
            Municipality::new("1501402", "Belém", "PA", -1.4558, -48.5039, 1_303_389)
                .with_profile(SocioProfile::new(120, 0.48, 20_608.0, 15.2)),
            // No socio-economic profile on record.
            Municipality::new("3106200", "Belo Horizonte", "MG", -19.9167, -43.9345, 2_315_560),
        ])
    }

    pub fn get(&self, ibge_code: &str) -> Option<&Municipality> {
        self.municipalities.iter().find(|m| m.ibge_code == ibge_code)
    }

    pub fn all(&self) -> &[Municipality] {
        &self.municipalities
    }

    /// Case-insensitive substring match on the name.
    pub fn search_by_name(&self, query: &str) -> Vec<&Municipality> {
        let query = query.to_lowercase();
        self.municipalities
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn by_state(&self, state: &str) -> Vec<&Municipality> {
        self.municipalities
            .iter()
            .filter(|m| m.state.eq_ignore_ascii_case(state))
            .collect()
    }

    /// Closest municipality within `max_km`, with its distance.
    pub fn nearest_municipality(
        &self,
        latitude: f64,
        longitude: f64,
        max_km: f64,
    ) -> Option<(&Municipality, f64)> {
        self.municipalities
            .iter()
            .map(|m| (m, haversine_km(latitude, longitude, m.latitude, m.longitude)))
            .filter(|(_, d)| *d <= max_km)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

impl ILocationResolver for MunicipalityRegistry {
    fn resolve(&self, location_id: &str) -> ClimaResult<ResolvedLocation> {
        self.get(location_id.trim())
            .map(Municipality::to_location)
            .ok_or_else(|| ClimaError::LocationNotFound {
                id: location_id.to_string(),
            })
    }

    fn nearest(&self, latitude: f64, longitude: f64, max_km: f64) -> Option<ResolvedLocation> {
        self.nearest_municipality(latitude, longitude, max_km)
            .map(|(m, _)| m.to_location())
    }
}
