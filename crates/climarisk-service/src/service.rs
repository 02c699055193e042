//! Consumer-facing operations.

use std::collections::BTreeMap;
use std::sync::Arc;

use climarisk_calculator::RiskCalculator;
use climarisk_core::config::ClimaConfig;
use climarisk_core::errors::ClimaResult;
use climarisk_core::models::{H3Cell, HealthReport, LocationRisk, RiskScenario};
use climarisk_core::traits::ICacheBackend;
use climarisk_grid::{get_geojson_features, get_risk_heatmap_data, GridMapper};
use climarisk_observability::tracing_setup::events;

use crate::request::{GridExport, GridFormat, GridMode, GridRequest};

/// Recent degradation events included in a health report.
pub const HEALTH_RECENT_DEGRADATIONS: usize = 20;

/// Window for per-provider failure counts in a health report.
pub const HEALTH_FAILURE_WINDOW_SECS: i64 = 300;

/// Owns the calculator, grid mapper and cache for one configuration.
pub struct RiskService {
    config: ClimaConfig,
    cache: Arc<dyn ICacheBackend>,
    calculator: Arc<RiskCalculator>,
    grid: GridMapper,
}

impl RiskService {
    pub(crate) fn new(
        config: ClimaConfig,
        cache: Arc<dyn ICacheBackend>,
        calculator: Arc<RiskCalculator>,
        grid: GridMapper,
    ) -> Self {
        Self {
            config,
            cache,
            calculator,
            grid,
        }
    }

    pub fn config(&self) -> &ClimaConfig {
        &self.config
    }

    pub fn calculator(&self) -> &RiskCalculator {
        &self.calculator
    }

    pub fn grid(&self) -> &GridMapper {
        &self.grid
    }

    pub fn cache(&self) -> &Arc<dyn ICacheBackend> {
        &self.cache
    }

    /// Risk for a coordinate pair.
    pub fn get_location_risk(&self, latitude: f64, longitude: f64, scenario: RiskScenario) -> ClimaResult<LocationRisk> {
        self.calculator
            .calculate_location_risk(latitude, longitude, scenario, None, None)
    }

    /// Risk for a registered municipality. Unknown ids fail with `LocationNotFound`.
    pub fn get_municipal_risk(&self, location_id: &str, scenario: RiskScenario) -> ClimaResult<LocationRisk> {
        self.calculator.calculate_municipality_risk(location_id, scenario)
    }

    /// Risk grid around a center, exported as GeoJSON or a heatmap map.
    pub fn get_risk_grid(&self, request: &GridRequest) -> ClimaResult<GridExport> {
        let cells = self.grid_cells(request)?;
        Ok(match request.format {
            GridFormat::GeoJson => GridExport::GeoJson(get_geojson_features(&cells)?),
            GridFormat::Heatmap { hazard } => GridExport::Heatmap(get_risk_heatmap_data(&cells, hazard)),
        })
    }

    /// The cells behind [`get_risk_grid`](Self::get_risk_grid), before export.
    pub fn grid_cells(&self, request: &GridRequest) -> ClimaResult<Vec<H3Cell>> {
        let resolution = request.resolution.unwrap_or(self.config.grid.default_resolution);
        match request.mode {
            GridMode::Full => self.grid.create_radius_grid(
                request.center_lat,
                request.center_lng,
                request.radius_km,
                resolution,
                request.scenario,
            ),
            GridMode::Decay => {
                let center = self.get_location_risk(request.center_lat, request.center_lng, request.scenario)?;
                let hazard_scores: BTreeMap<_, _> = center
                    .hazards
                    .iter()
                    .map(|h| (h.hazard_type, h.projected_2030))
                    .collect();
                self.grid.create_decay_grid(
                    request.center_lat,
                    request.center_lng,
                    request.radius_km,
                    resolution,
                    center.overall_risk_score,
                    &hazard_scores,
                )
            }
        }
    }

    /// Provider circuits, cache counters and degradations.
    pub fn health(&self) -> ClimaResult<HealthReport> {
        Ok(HealthReport {
            providers: self.calculator.provider_health(),
            cache: self.cache.stats()?,
            active_degradations: self.calculator.active_degradations(),
            degraded_components: self.calculator.degraded_components(HEALTH_FAILURE_WINDOW_SECS),
            recent_degradations: self.calculator.recent_degradations(HEALTH_RECENT_DEGRADATIONS),
        })
    }

    /// Sweep expired cache entries. Returns the number removed.
    pub fn sweep_cache(&self) -> ClimaResult<usize> {
        let removed = self.cache.cleanup_expired()?;
        events::cache_swept(self.cache.name(), removed);
        Ok(removed)
    }
}
