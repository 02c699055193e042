use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{HazardType, RiskScenario};

/// Risk calculator configuration. Every number here is an overridable
/// placeholder, not a validated climate model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Hazards evaluated for every location.
    pub hazards: Vec<HazardType>,
    /// Size of the worker pool used for hazard and grid-cell fan-out.
    pub worker_threads: usize,
    pub baseline_year: u16,
    /// Share of the geographic baseline in the historical blend.
    pub geographic_weight: f64,
    /// Weights for the overall score, keyed by hazard name.
    pub hazard_weights: BTreeMap<String, f64>,
    /// Weight for any hazard missing from `hazard_weights`.
    pub default_hazard_weight: f64,
    pub scenario_multipliers: ScenarioMultipliers,
    pub sensitivity: SensitivityConfig,
    pub confidence: ConfidenceConfig,
    pub baseline: BaselineConfig,
    pub noise: NoiseConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            hazards: HazardType::ALL.to_vec(),
            worker_threads: defaults::DEFAULT_WORKER_THREADS,
            baseline_year: defaults::DEFAULT_BASELINE_YEAR,
            geographic_weight: defaults::DEFAULT_GEOGRAPHIC_WEIGHT,
            hazard_weights: defaults::DEFAULT_HAZARD_WEIGHTS
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            default_hazard_weight: defaults::DEFAULT_HAZARD_WEIGHT,
            scenario_multipliers: ScenarioMultipliers::default(),
            sensitivity: SensitivityConfig::default(),
            confidence: ConfidenceConfig::default(),
            baseline: BaselineConfig::default(),
            noise: NoiseConfig::default(),
        }
    }
}

impl CalculatorConfig {
    pub fn weight_for(&self, hazard: HazardType) -> f64 {
        self.hazard_weights
            .get(hazard.as_str())
            .copied()
            .unwrap_or(self.default_hazard_weight)
    }
}

/// Multipliers applied to the baseline at each horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonMultipliers {
    pub horizon_2030: f64,
    pub horizon_2050: f64,
}

impl From<(f64, f64)> for HorizonMultipliers {
    fn from((horizon_2030, horizon_2050): (f64, f64)) -> Self {
        Self {
            horizon_2030,
            horizon_2050,
        }
    }
}

/// Fallback multiplier table, used when no projection provider answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioMultipliers {
    pub low: HorizonMultipliers,
    pub moderate: HorizonMultipliers,
    pub high: HorizonMultipliers,
}

impl Default for ScenarioMultipliers {
    fn default() -> Self {
        Self {
            low: defaults::DEFAULT_MULTIPLIERS_LOW.into(),
            moderate: defaults::DEFAULT_MULTIPLIERS_MODERATE.into(),
            high: defaults::DEFAULT_MULTIPLIERS_HIGH.into(),
        }
    }
}

impl ScenarioMultipliers {
    pub fn for_scenario(&self, scenario: RiskScenario) -> HorizonMultipliers {
        match scenario {
            RiskScenario::Low => self.low,
            RiskScenario::Moderate => self.moderate,
            RiskScenario::High => self.high,
        }
    }
}

/// Hazard-specific response to projected climate deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Heat stress factor per °C of warming.
    pub heat_per_degree: f64,
    /// Coastal inundation factor per °C (sea-level-rise proxy).
    pub coastal_per_degree: f64,
    /// Drought factor per % of precipitation loss.
    pub drought_per_pct: f64,
    /// Flood and landslide factor per % of precipitation gain. Losses are ignored.
    pub wet_hazard_per_pct: f64,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            heat_per_degree: defaults::DEFAULT_HEAT_PER_DEGREE,
            coastal_per_degree: defaults::DEFAULT_COASTAL_PER_DEGREE,
            drought_per_pct: defaults::DEFAULT_DROUGHT_PER_PCT,
            wet_hazard_per_pct: defaults::DEFAULT_WET_HAZARD_PER_PCT,
        }
    }
}

/// Confidence assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Heuristic-only confidence, keyed by hazard name.
    pub base: BTreeMap<String, f64>,
    /// Base confidence for hazards missing from `base`.
    pub default_base: f64,
    /// Added when provider data contributed.
    pub live_bonus: f64,
    /// Upper bound after the bonus.
    pub cap: f64,
    /// Subtracted when a provider call failed and a fallback was used.
    pub degraded_penalty: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: defaults::DEFAULT_BASE_CONFIDENCES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            default_base: defaults::DEFAULT_BASE_CONFIDENCE,
            live_bonus: defaults::DEFAULT_LIVE_CONFIDENCE_BONUS,
            cap: defaults::DEFAULT_CONFIDENCE_CAP,
            degraded_penalty: defaults::DEFAULT_DEGRADED_CONFIDENCE_PENALTY,
        }
    }
}

impl ConfidenceConfig {
    pub fn base_for(&self, hazard: HazardType) -> f64 {
        self.base
            .get(hazard.as_str())
            .copied()
            .unwrap_or(self.default_base)
    }
}

/// Baseline noise behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseMode {
    /// No noise. Baselines are the table values exactly.
    #[default]
    Off,
    /// Deterministic noise seeded from the hazard and rounded coordinates.
    LocationSeeded,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub mode: NoiseMode,
}

/// Half-open numeric interval. `min` may be inclusive or exclusive; `max` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bound {
    pub min: Option<f64>,
    pub min_exclusive: bool,
    pub max: Option<f64>,
}

impl Bound {
    pub fn contains(&self, v: f64) -> bool {
        let above = match self.min {
            Some(min) if self.min_exclusive => v > min,
            Some(min) => v >= min,
            None => true,
        };
        let below = self.max.map_or(true, |max| v < max);
        above && below
    }

    fn above(min: f64) -> Self {
        Self {
            min: Some(min),
            min_exclusive: true,
            max: None,
        }
    }

    fn below(max: f64) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }

    fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            min_exclusive: false,
            max: Some(max),
        }
    }
}

/// `|lon - center| < half_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub center: f64,
    pub half_width: f64,
}

/// A named geographic region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRule {
    pub name: String,
    #[serde(default)]
    pub latitude: Bound,
    #[serde(default)]
    pub longitude: Bound,
    #[serde(default)]
    pub longitude_band: Option<Band>,
}

impl RegionRule {
    pub fn matches(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude.contains(latitude)
            && self.longitude.contains(longitude)
            && self
                .longitude_band
                .map_or(true, |b| (longitude - b.center).abs() < b.half_width)
    }
}

/// Base risk and noise amplitude for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBase {
    pub region: String,
    pub base: f64,
    #[serde(default)]
    pub noise: f64,
}

/// Ordered region lookup for one hazard. First matching region wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    pub entries: Vec<RegionBase>,
    pub default_base: f64,
    #[serde(default)]
    pub default_noise: f64,
}

impl RegionTable {
    fn new(entries: &[(&str, f64, f64)], default_base: f64, default_noise: f64) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(region, base, noise)| RegionBase {
                    region: region.to_string(),
                    base: *base,
                    noise: *noise,
                })
                .collect(),
            default_base,
            default_noise,
        }
    }
}

/// `base + ((offset + lat) / span) * gradient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatitudeGradient {
    pub base: f64,
    pub latitude_offset: f64,
    pub latitude_span: f64,
    pub gradient: f64,
    pub noise: f64,
}

impl Default for LatitudeGradient {
    fn default() -> Self {
        Self {
            base: defaults::DEFAULT_HEAT_BASE,
            latitude_offset: defaults::DEFAULT_HEAT_LATITUDE_OFFSET,
            latitude_span: defaults::DEFAULT_HEAT_LATITUDE_SPAN,
            gradient: defaults::DEFAULT_HEAT_GRADIENT,
            noise: defaults::DEFAULT_HEAT_NOISE,
        }
    }
}

/// Geographic baseline: region definitions plus one table per hazard.
/// Heat stress follows a latitude gradient instead of a region table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    pub regions: Vec<RegionRule>,
    pub flood: RegionTable,
    pub drought: RegionTable,
    pub landslide: RegionTable,
    pub coastal_inundation: RegionTable,
    pub heat_stress: LatitudeGradient,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        let rule = |name: &str, latitude: Bound, longitude: Bound, band: Option<Band>| RegionRule {
            name: name.to_string(),
            latitude,
            longitude,
            longitude_band: band,
        };
        Self {
            regions: vec![
                rule("north", Bound::above(-10.0), Bound::default(), None),
                rule("northeast", Bound::between(-10.0, -5.0), Bound::above(-44.0), None),
                rule("southeast", Bound::between(-25.0, -14.0), Bound::between(-50.0, -39.0), None),
                rule("south", Bound::below(-25.0), Bound::default(), None),
                rule(
                    "coastal",
                    Bound::default(),
                    Bound::default(),
                    Some(Band {
                        center: -40.0,
                        half_width: 5.0,
                    }),
                ),
            ],
            flood: RegionTable::new(
                &[("north", 0.45, 0.15), ("northeast", 0.25, 0.10), ("southeast", 0.35, 0.15)],
                0.30,
                0.10,
            ),
            drought: RegionTable::new(
                &[("northeast", 0.65, 0.15), ("north", 0.25, 0.10), ("south", 0.35, 0.10)],
                0.40,
                0.12,
            ),
            landslide: RegionTable::new(
                &[("southeast", 0.40, 0.15), ("south", 0.30, 0.10)],
                0.15,
                0.08,
            ),
            coastal_inundation: RegionTable::new(&[("coastal", 0.50, 0.20)], 0.05, 0.03),
            heat_stress: LatitudeGradient::default(),
        }
    }
}

impl BaselineConfig {
    /// Names of every region containing the point.
    pub fn regions_for(&self, latitude: f64, longitude: f64) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.matches(latitude, longitude))
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn table_for(&self, hazard: HazardType) -> Option<&RegionTable> {
        match hazard {
            HazardType::Flood => Some(&self.flood),
            HazardType::Drought => Some(&self.drought),
            HazardType::Landslide => Some(&self.landslide),
            HazardType::CoastalInundation => Some(&self.coastal_inundation),
            HazardType::HeatStress => None,
        }
    }
}
