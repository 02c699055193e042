use serde::{Deserialize, Serialize};

/// Socio-economic exposure of a location. Reported alongside the hazard
/// scores; it does not feed `overall_risk_score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityIndicator {
    pub population_exposed: u64,
    pub critical_infrastructure_count: u32,
    /// Share of the population in vulnerable conditions, 0..=1.
    pub vulnerable_population_pct: f64,
    /// Mean of normalized GDP per capita, green area and infrastructure, 0..=1.
    pub adaptive_capacity_score: f64,
}

const GDP_PER_CAPITA_REFERENCE: f64 = 80_000.0;
const GREEN_AREA_REFERENCE_M2: f64 = 100.0;
const INFRASTRUCTURE_REFERENCE: f64 = 500.0;

impl VulnerabilityIndicator {
    /// Derive the indicator from census-style municipality figures.
    pub fn from_profile(
        population: u64,
        vulnerable_population_pct: f64,
        critical_infrastructure_count: u32,
        gdp_per_capita: f64,
        green_area_m2_per_capita: f64,
    ) -> Self {
        let pct = vulnerable_population_pct.clamp(0.0, 1.0);
        let gdp = (gdp_per_capita / GDP_PER_CAPITA_REFERENCE).clamp(0.0, 1.0);
        let green = (green_area_m2_per_capita / GREEN_AREA_REFERENCE_M2).clamp(0.0, 1.0);
        let infra = (f64::from(critical_infrastructure_count) / INFRASTRUCTURE_REFERENCE).clamp(0.0, 1.0);
        let capacity = (gdp + green + infra) / 3.0;
        Self {
            population_exposed: (population as f64 * pct) as u64,
            critical_infrastructure_count,
            vulnerable_population_pct: pct,
            adaptive_capacity_score: (capacity * 100.0).round() / 100.0,
        }
    }
}
