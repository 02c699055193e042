//! Grid generation over the calculator's worker pool.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use climarisk_calculator::RiskCalculator;
use climarisk_core::config::GridConfig;
use climarisk_core::context::Deadline;
use climarisk_core::errors::{ClimaError, ClimaResult};
use climarisk_core::geo::validate_coordinates;
use climarisk_core::models::{H3Cell, HazardType, LocationRisk, RiskScenario};
use climarisk_observability::tracing_setup::events;

use crate::decay::decayed_risk_rounded;
use crate::hex::{self, GridCell};

pub struct GridMapper {
    calculator: Arc<RiskCalculator>,
    config: GridConfig,
}

impl GridMapper {
    pub fn new(calculator: Arc<RiskCalculator>, config: GridConfig) -> Self {
        Self { calculator, config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Full risk for every cell within `rings` of the center cell.
    pub fn create_risk_grid(
        &self,
        center_lat: f64,
        center_lng: f64,
        rings: u32,
        resolution: u8,
        scenario: RiskScenario,
    ) -> ClimaResult<Vec<H3Cell>> {
        let _span = climarisk_observability::grid_span!("rings", resolution).entered();
        let res = hex::resolution(resolution, &self.config)?;
        hex::check_disk_size(rings, &self.config)?;
        let center = hex::center_cell(center_lat, center_lng, res)?;
        let deadline = self.calculator.request_deadline();
        let cells = self.evaluate(&hex::disk(center, rings, (center_lat, center_lng)), scenario, deadline)?;
        events::grid_generated("rings", resolution, cells.len());
        Ok(cells)
    }

    /// Full risk for every cell whose centroid lies within `radius_km`.
    pub fn create_radius_grid(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
        resolution: u8,
        scenario: RiskScenario,
    ) -> ClimaResult<Vec<H3Cell>> {
        let deadline = self.calculator.request_deadline();
        self.create_radius_grid_with_deadline(center_lat, center_lng, radius_km, resolution, scenario, deadline)
    }

    /// As [`Self::create_radius_grid`], every cell bounded by one shared deadline.
    pub fn create_radius_grid_with_deadline(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
        resolution: u8,
        scenario: RiskScenario,
        deadline: Deadline,
    ) -> ClimaResult<Vec<H3Cell>> {
        let _span = climarisk_observability::grid_span!("radius", resolution).entered();
        let res = hex::resolution(resolution, &self.config)?;
        let selected = hex::cells_within_radius(center_lat, center_lng, radius_km, res, &self.config)?;
        let cells = self.evaluate(&selected, scenario, deadline)?;
        events::grid_generated("radius", resolution, cells.len());
        Ok(cells)
    }

    /// Full risk for every cell whose centroid lies inside the box.
    pub fn create_bounding_box_grid(
        &self,
        min_lat: f64,
        min_lng: f64,
        max_lat: f64,
        max_lng: f64,
        resolution: u8,
        scenario: RiskScenario,
    ) -> ClimaResult<Vec<H3Cell>> {
        let _span = climarisk_observability::grid_span!("bbox", resolution).entered();
        validate_coordinates(min_lat, min_lng)?;
        validate_coordinates(max_lat, max_lng)?;
        if min_lat > max_lat || min_lng > max_lng {
            return Err(ClimaError::invalid_parameter("bbox", "min corner must not exceed max corner"));
        }
        let res = hex::resolution(resolution, &self.config)?;
        let (mid_lat, mid_lng) = ((min_lat + max_lat) / 2.0, (min_lng + max_lng) / 2.0);
        let half_diagonal = climarisk_core::geo::haversine_km(mid_lat, mid_lng, max_lat, max_lng);
        // One extra ring so cells straddling the box edge are considered.
        let rings = hex::rings_for_radius(half_diagonal, self.config.edge_length_km(resolution)).saturating_add(1);
        hex::check_disk_size(rings, &self.config)?;
        let center = hex::center_cell(mid_lat, mid_lng, res)?;
        let selected: Vec<GridCell> = hex::disk(center, rings, (mid_lat, mid_lng))
            .into_iter()
            .filter(|c| {
                (min_lat..=max_lat).contains(&c.center_lat) && (min_lng..=max_lng).contains(&c.center_lng)
            })
            .collect();
        let cells = self.evaluate(&selected, scenario, self.calculator.request_deadline())?;
        events::grid_generated("bbox", resolution, cells.len());
        Ok(cells)
    }

    /// Decay variant: one base risk (mean of the supplied hazard scores, or
    /// the configured default) decayed by distance from the center.
    pub fn generate_grid_from_hazard_data(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
        resolution: u8,
        hazard_scores: &BTreeMap<HazardType, f64>,
    ) -> ClimaResult<BTreeMap<String, f64>> {
        let base = if hazard_scores.is_empty() {
            self.config.default_base_risk
        } else {
            hazard_scores.values().sum::<f64>() / hazard_scores.len() as f64
        };
        self.generate_municipality_grid(center_lat, center_lng, radius_km, resolution, base)
    }

    /// Decay variant from an explicit base risk.
    pub fn generate_municipality_grid(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
        resolution: u8,
        base_risk: f64,
    ) -> ClimaResult<BTreeMap<String, f64>> {
        let cells = self.create_decay_grid(center_lat, center_lng, radius_km, resolution, base_risk, &BTreeMap::new())?;
        Ok(cells
            .into_iter()
            .map(|c| (c.cell_index, c.risk_score))
            .collect())
    }

    /// Decay variant returning full cells, each hazard score decayed alongside
    /// the base risk.
    pub fn create_decay_grid(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
        resolution: u8,
        base_risk: f64,
        hazard_scores: &BTreeMap<HazardType, f64>,
    ) -> ClimaResult<Vec<H3Cell>> {
        let _span = climarisk_observability::grid_span!("decay", resolution).entered();
        let res = hex::resolution(resolution, &self.config)?;
        let selected = hex::cells_within_radius(center_lat, center_lng, radius_km, res, &self.config)?;
        let c = &self.config;
        let decay = |value: f64, distance: f64| {
            decayed_risk_rounded(value, distance, radius_km, c.decay_coefficient, c.score_precision)
        };
        let cells: Vec<H3Cell> = selected
            .iter()
            .map(|g| H3Cell {
                cell_index: g.cell.to_string(),
                resolution,
                center_lat: g.center_lat,
                center_lng: g.center_lng,
                risk_score: decay(base_risk, g.distance_km),
                hazard_breakdown: hazard_scores
                    .iter()
                    .map(|(h, v)| (*h, decay(*v, g.distance_km)))
                    .collect(),
                area_km2: g.cell.area_km2(),
            })
            .collect();
        events::grid_generated("decay", resolution, cells.len());
        Ok(cells)
    }

    /// Full calculation at each centroid, fanned out on the calculator's pool.
    /// One deadline bounds the whole grid.
    fn evaluate(&self, selected: &[GridCell], scenario: RiskScenario, deadline: Deadline) -> ClimaResult<Vec<H3Cell>> {
        let calculator = &self.calculator;
        calculator.pool().install(|| {
            selected
                .par_iter()
                .map(|g| {
                    let risk =
                        calculator.calculate_with_deadline(g.center_lat, g.center_lng, scenario, None, None, deadline)?;
                    Ok(to_cell(g, &risk))
                })
                .collect()
        })
    }
}

fn to_cell(g: &GridCell, risk: &LocationRisk) -> H3Cell {
    H3Cell {
        cell_index: g.cell.to_string(),
        resolution: u8::from(g.cell.resolution()),
        center_lat: g.center_lat,
        center_lng: g.center_lng,
        risk_score: risk.overall_risk_score,
        hazard_breakdown: risk
            .hazards
            .iter()
            .map(|h| (h.hazard_type, h.projected_2030))
            .collect(),
        area_km2: g.cell.area_km2(),
    }
}
