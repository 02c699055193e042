use serde::{Deserialize, Serialize};

use super::HazardType;

/// Risk assessment for a single hazard at a single location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardResult {
    pub hazard_type: HazardType,
    /// Present-day risk in [0, 1].
    pub current_risk: f64,
    pub projected_2030: f64,
    pub projected_2050: f64,
    pub confidence: f64,
    /// `+`-joined tags naming every source that shaped the values.
    pub data_source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl HazardResult {
    /// Whether the given source tag contributed to this result.
    pub fn has_source(&self, tag: &str) -> bool {
        self.data_source.split('+').any(|s| s == tag)
    }
}
