use serde::{Deserialize, Serialize};

use super::{HazardResult, HazardType, RiskScenario, VulnerabilityIndicator};

/// Aggregated risk for a location: one result per hazard plus a weighted overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRisk {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub scenario: RiskScenario,
    pub hazards: Vec<HazardResult>,
    /// Hazard-weighted average of `projected_2030`.
    pub overall_risk_score: f64,
    /// True when at least one provider call failed and a fallback was used.
    #[serde(default)]
    pub degraded: bool,
    /// Exposure profile, present for registered municipalities that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability: Option<VulnerabilityIndicator>,
}

impl LocationRisk {
    pub fn hazard(&self, hazard_type: HazardType) -> Option<&HazardResult> {
        self.hazards.iter().find(|h| h.hazard_type == hazard_type)
    }

    /// Mean of `projected_2030` across hazards, or `None` when empty.
    pub fn mean_projected_2030(&self) -> Option<f64> {
        if self.hazards.is_empty() {
            return None;
        }
        let sum: f64 = self.hazards.iter().map(|h| h.projected_2030).sum();
        Some(sum / self.hazards.len() as f64)
    }
}
