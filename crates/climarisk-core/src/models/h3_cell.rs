use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::HazardType;

/// One hexagonal grid cell with its computed risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct H3Cell {
    /// 15-character hexadecimal cell index.
    pub cell_index: String,
    pub resolution: u8,
    pub center_lat: f64,
    pub center_lng: f64,
    pub risk_score: f64,
    pub hazard_breakdown: BTreeMap<HazardType, f64>,
    pub area_km2: f64,
}
