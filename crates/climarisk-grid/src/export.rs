//! GeoJSON and heatmap export, plus summary statistics over a set of cells.

use std::collections::BTreeMap;
use std::str::FromStr;

use h3o::CellIndex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use climarisk_core::config::GridConfig;
use climarisk_core::errors::{ClimaError, ClimaResult};
use climarisk_core::models::{H3Cell, HazardType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
}

/// A GeoJSON Polygon. Rings are closed and in `[lng, lat]` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

fn parse_cell(index: &str) -> ClimaResult<CellIndex> {
    CellIndex::from_str(index).map_err(|e| ClimaError::Grid {
        reason: format!("invalid cell index '{index}': {e}"),
    })
}

fn polygon(cell: CellIndex) -> Geometry {
    let mut ring: Vec<[f64; 2]> = cell.boundary().iter().map(|ll| [ll.lng(), ll.lat()]).collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    Geometry {
        kind: "Polygon".to_string(),
        coordinates: vec![ring],
    }
}

/// Cells as a FeatureCollection with `h3_index`, `resolution`, `risk_score`,
/// `area_km2` and one property per hazard in the breakdown.
pub fn get_geojson_features(cells: &[H3Cell]) -> ClimaResult<FeatureCollection> {
    let features = cells
        .iter()
        .map(|c| {
            let cell = parse_cell(&c.cell_index)?;
            let mut properties = Map::new();
            properties.insert("h3_index".into(), Value::from(c.cell_index.clone()));
            properties.insert("resolution".into(), Value::from(c.resolution));
            properties.insert("risk_score".into(), Value::from(c.risk_score));
            properties.insert("area_km2".into(), Value::from(c.area_km2));
            for (hazard, score) in &c.hazard_breakdown {
                properties.insert(hazard.as_str().into(), Value::from(*score));
            }
            Ok(Feature {
                kind: "Feature".to_string(),
                geometry: polygon(cell),
                properties,
            })
        })
        .collect::<ClimaResult<Vec<_>>>()?;
    Ok(FeatureCollection {
        kind: "FeatureCollection".to_string(),
        features,
    })
}

/// Cell index to score. With a hazard, cells without that hazard are omitted.
pub fn get_risk_heatmap_data(cells: &[H3Cell], hazard: Option<HazardType>) -> BTreeMap<String, f64> {
    cells
        .iter()
        .filter_map(|c| {
            let score = match hazard {
                Some(h) => *c.hazard_breakdown.get(&h)?,
                None => c.risk_score,
            };
            Some((c.cell_index.clone(), score))
        })
        .collect()
}

/// Summary of a grid's scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub cell_count: usize,
    pub min_risk: f64,
    pub max_risk: f64,
    pub avg_risk: f64,
    pub high_risk_cells: usize,
    pub medium_risk_cells: usize,
    pub low_risk_cells: usize,
}

/// Score summary. High is `>= high_risk_threshold`, medium is
/// `>= medium_risk_threshold`, everything else is low.
pub fn grid_stats(cells: &[H3Cell], config: &GridConfig) -> GridStats {
    if cells.is_empty() {
        return GridStats {
            cell_count: 0,
            min_risk: 0.0,
            max_risk: 0.0,
            avg_risk: 0.0,
            high_risk_cells: 0,
            medium_risk_cells: 0,
            low_risk_cells: 0,
        };
    }
    let scores = cells.iter().map(|c| c.risk_score);
    let min = scores.clone().fold(f64::INFINITY, f64::min);
    let max = scores.clone().fold(f64::NEG_INFINITY, f64::max);
    let avg = scores.sum::<f64>() / cells.len() as f64;
    let high = cells
        .iter()
        .filter(|c| c.risk_score >= config.high_risk_threshold)
        .count();
    let medium = cells
        .iter()
        .filter(|c| c.risk_score >= config.medium_risk_threshold && c.risk_score < config.high_risk_threshold)
        .count();
    GridStats {
        cell_count: cells.len(),
        min_risk: min,
        max_risk: max,
        avg_risk: avg,
        high_risk_cells: high,
        medium_risk_cells: medium,
        low_risk_cells: cells.len() - high - medium,
    }
}

/// Cells at or above `threshold`, highest first.
pub fn cells_by_risk_level(cells: &[H3Cell], threshold: f64) -> Vec<&H3Cell> {
    let mut selected: Vec<&H3Cell> = cells.iter().filter(|c| c.risk_score >= threshold).collect();
    selected.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
    selected
}
