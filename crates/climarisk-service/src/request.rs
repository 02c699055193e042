//! Grid query and export shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use climarisk_core::models::{HazardType, RiskScenario};
use climarisk_grid::FeatureCollection;

/// How cell scores are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Full risk calculation at every cell centroid.
    #[default]
    Full,
    /// Center risk decayed with distance.
    Decay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum GridFormat {
    #[default]
    GeoJson,
    /// Cell index to score. `hazard = None` exports the overall score.
    Heatmap { hazard: Option<HazardType> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRequest {
    pub center_lat: f64,
    pub center_lng: f64,
    pub radius_km: f64,
    /// Falls back to the configured default resolution.
    #[serde(default)]
    pub resolution: Option<u8>,
    #[serde(default)]
    pub scenario: RiskScenario,
    #[serde(default)]
    pub mode: GridMode,
    #[serde(default)]
    pub format: GridFormat,
}

impl GridRequest {
    pub fn new(center_lat: f64, center_lng: f64, radius_km: f64) -> Self {
        Self {
            center_lat,
            center_lng,
            radius_km,
            resolution: None,
            scenario: RiskScenario::default(),
            mode: GridMode::default(),
            format: GridFormat::default(),
        }
    }

    pub fn resolution(mut self, resolution: u8) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn scenario(mut self, scenario: RiskScenario) -> Self {
        self.scenario = scenario;
        self
    }

    pub fn mode(mut self, mode: GridMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn format(mut self, format: GridFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GridExport {
    GeoJson(FeatureCollection),
    Heatmap(BTreeMap<String, f64>),
}

impl GridExport {
    /// Number of exported cells.
    pub fn len(&self) -> usize {
        match self {
            Self::GeoJson(fc) => fc.features.len(),
            Self::Heatmap(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
