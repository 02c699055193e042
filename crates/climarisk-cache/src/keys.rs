//! Deterministic cache key derivation.
//!
//! A key is a namespace plus a blake3 digest of its canonical parts.
//! Coordinates are rounded to a fixed precision so nearby requests share
//! entries, and nothing time-dependent ever takes part in identity.

use climarisk_core::geo::round_to;
use climarisk_core::models::{HazardType, RiskScenario};

/// Builder for a namespaced, hashed cache key.
#[derive(Debug, Clone)]
pub struct CacheKey {
    namespace: &'static str,
    parts: Vec<String>,
}

impl CacheKey {
    pub fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            parts: Vec::new(),
        }
    }

    pub fn part(mut self, part: impl ToString) -> Self {
        self.parts.push(part.to_string());
        self
    }

    /// Append a coordinate rounded to `precision` decimals.
    pub fn coordinate(mut self, value: f64, precision: u32) -> Self {
        let mut rounded = round_to(value, precision);
        if rounded == 0.0 {
            // Fold -0.0 into 0.0.
            rounded = 0.0;
        }
        self.parts
            .push(format!("{rounded:.prec$}", prec = precision as usize));
        self
    }

    /// Human-readable canonical form (pre-hash).
    pub fn canonical(&self) -> String {
        self.parts.join("|")
    }

    pub fn build(&self) -> String {
        let digest = blake3::hash(self.canonical().as_bytes());
        format!("{}:{}", self.namespace, digest.to_hex())
    }

    /// Key for one provider signal.
    pub fn provider_signal(
        provider: &str,
        hazard: HazardType,
        latitude: f64,
        longitude: f64,
        scenario: RiskScenario,
        year: u16,
        precision: u32,
    ) -> String {
        Self::new("signal")
            .part(provider)
            .part(hazard)
            .coordinate(latitude, precision)
            .coordinate(longitude, precision)
            .part(scenario)
            .part(year)
            .build()
    }

    /// Key for a full `LocationRisk` result over the given hazard set.
    pub fn location_risk(
        latitude: f64,
        longitude: f64,
        scenario: RiskScenario,
        hazards: &[HazardType],
        precision: u32,
    ) -> String {
        let hazards = hazards
            .iter()
            .map(|h| h.as_str())
            .collect::<Vec<_>>()
            .join(",");
        Self::new("risk")
            .coordinate(latitude, precision)
            .coordinate(longitude, precision)
            .part(scenario)
            .part(hazards)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let a = CacheKey::provider_signal("climate", HazardType::Flood, -23.5505, -46.6333, RiskScenario::Moderate, 2030, 4);
        let b = CacheKey::provider_signal("climate", HazardType::Flood, -23.5505, -46.6333, RiskScenario::Moderate, 2030, 4);
        assert_eq!(a, b);
        assert!(a.starts_with("signal:"));
    }

    #[test]
    fn every_part_changes_identity() {
        let base = CacheKey::provider_signal("climate", HazardType::Flood, -23.5, -46.6, RiskScenario::Moderate, 2030, 4);
        let variants = [
            CacheKey::provider_signal("hydro", HazardType::Flood, -23.5, -46.6, RiskScenario::Moderate, 2030, 4),
            CacheKey::provider_signal("climate", HazardType::Drought, -23.5, -46.6, RiskScenario::Moderate, 2030, 4),
            CacheKey::provider_signal("climate", HazardType::Flood, -23.6, -46.6, RiskScenario::Moderate, 2030, 4),
            CacheKey::provider_signal("climate", HazardType::Flood, -23.5, -46.7, RiskScenario::Moderate, 2030, 4),
            CacheKey::provider_signal("climate", HazardType::Flood, -23.5, -46.6, RiskScenario::High, 2030, 4),
            CacheKey::provider_signal("climate", HazardType::Flood, -23.5, -46.6, RiskScenario::Moderate, 2050, 4),
        ];
        for v in variants {
            assert_ne!(base, v);
        }
    }

    #[test]
    fn rounding_merges_nearby_points() {
        let a = CacheKey::new("t").coordinate(-23.55051, 4).canonical();
        let b = CacheKey::new("t").coordinate(-23.55049, 4).canonical();
        assert_eq!(a, b);
        assert_eq!(a, "-23.5505");
    }

    #[test]
    fn negative_zero_is_normalized() {
        let a = CacheKey::new("t").coordinate(-0.00001, 4).canonical();
        assert_eq!(a, "0.0000");
    }
}
