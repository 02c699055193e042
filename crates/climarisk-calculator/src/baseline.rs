//! Geographic baseline: present-day risk from coarse region classification.
//!
//! Region rules and per-hazard tables come from [`BaselineConfig`]. Heat
//! stress follows a latitude gradient. Optional noise is seeded from the
//! hazard and the rounded coordinates, so identical inputs always agree.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use climarisk_core::config::{BaselineConfig, NoiseMode};
use climarisk_core::geo::{clamp_unit, round_to};
use climarisk_core::models::HazardType;

/// Decimal places coordinates are rounded to before seeding noise.
const NOISE_SEED_PRECISION: u32 = 4;

#[derive(Debug, Clone)]
pub struct GeographicBaseline {
    config: BaselineConfig,
    noise: NoiseMode,
}

impl GeographicBaseline {
    pub fn new(config: BaselineConfig, noise: NoiseMode) -> Self {
        Self { config, noise }
    }

    pub fn regions_for(&self, latitude: f64, longitude: f64) -> Vec<&str> {
        self.config.regions_for(latitude, longitude)
    }

    /// Base value and noise amplitude before noise is applied.
    pub fn table_value(&self, hazard: HazardType, latitude: f64, longitude: f64) -> (f64, f64) {
        let Some(table) = self.config.table_for(hazard) else {
            let g = &self.config.heat_stress;
            let base = g.base + ((g.latitude_offset + latitude) / g.latitude_span) * g.gradient;
            return (base, g.noise);
        };
        let regions = self.regions_for(latitude, longitude);
        table
            .entries
            .iter()
            .find(|e| regions.contains(&e.region.as_str()))
            .map(|e| (e.base, e.noise))
            .unwrap_or((table.default_base, table.default_noise))
    }

    /// Present-day risk in [0, 1].
    pub fn current_risk(&self, hazard: HazardType, latitude: f64, longitude: f64) -> f64 {
        let (base, amplitude) = self.table_value(hazard, latitude, longitude);
        let noise = match self.noise {
            NoiseMode::Off => 0.0,
            NoiseMode::LocationSeeded => seeded_noise(hazard, latitude, longitude, amplitude),
        };
        clamp_unit(base + noise)
    }
}

/// Uniform noise in `[-amplitude, amplitude]`, seeded from the hazard and
/// the rounded coordinates.
pub fn seeded_noise(hazard: HazardType, latitude: f64, longitude: f64, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 0.0;
    }
    let seed_input = format!(
        "{}|{:.4}|{:.4}",
        hazard.as_str(),
        round_to(latitude, NOISE_SEED_PRECISION) + 0.0,
        round_to(longitude, NOISE_SEED_PRECISION) + 0.0,
    );
    let digest = blake3::hash(seed_input.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(digest.as_bytes());
    let mut rng = StdRng::from_seed(seed);
    rng.gen_range(-amplitude..=amplitude)
}
