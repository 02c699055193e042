use serde::{Deserialize, Serialize};

use super::defaults;

/// Approximate hexagon edge length at one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLength {
    pub resolution: u8,
    pub km: f64,
}

/// Geospatial grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min_resolution: u8,
    pub max_resolution: u8,
    pub default_resolution: u8,
    /// Maximum share of risk removed at the radius boundary.
    pub decay_coefficient: f64,
    /// Base risk when no hazard data is supplied.
    pub default_base_risk: f64,
    /// Edge lengths used to size ring counts from a radius.
    pub edge_lengths_km: Vec<EdgeLength>,
    /// Edge length for resolutions missing from the table.
    pub fallback_edge_length_km: f64,
    pub high_risk_threshold: f64,
    pub medium_risk_threshold: f64,
    /// Decimal places for decay-variant scores.
    pub score_precision: u32,
    /// Requests that would generate more cells than this are rejected.
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_resolution: defaults::DEFAULT_MIN_RESOLUTION,
            max_resolution: defaults::DEFAULT_MAX_RESOLUTION,
            default_resolution: defaults::DEFAULT_GRID_RESOLUTION,
            decay_coefficient: defaults::DEFAULT_DECAY_COEFFICIENT,
            default_base_risk: defaults::DEFAULT_BASE_RISK,
            edge_lengths_km: defaults::DEFAULT_EDGE_LENGTHS_KM
                .iter()
                .map(|(resolution, km)| EdgeLength {
                    resolution: *resolution,
                    km: *km,
                })
                .collect(),
            fallback_edge_length_km: defaults::DEFAULT_EDGE_LENGTH_KM,
            high_risk_threshold: defaults::DEFAULT_HIGH_RISK_THRESHOLD,
            medium_risk_threshold: defaults::DEFAULT_MEDIUM_RISK_THRESHOLD,
            score_precision: defaults::DEFAULT_SCORE_PRECISION,
            max_cells: defaults::DEFAULT_MAX_GRID_CELLS,
        }
    }
}

impl GridConfig {
    pub fn edge_length_km(&self, resolution: u8) -> f64 {
        self.edge_lengths_km
            .iter()
            .find(|e| e.resolution == resolution)
            .map(|e| e.km)
            .unwrap_or(self.fallback_edge_length_km)
    }
}
