//! Forward projection of present-day risk to the 2030 and 2050 horizons.

use climarisk_core::config::{HorizonMultipliers, SensitivityConfig};
use climarisk_core::geo::clamp_unit;
use climarisk_core::models::{HazardType, ProviderSignal, SignalKind};

/// Multiplicative factor a climate delta applies to `hazard`.
///
/// Temperature deltas drive heat stress and coastal inundation; precipitation
/// deltas drive drought (inversely) and flood/landslide (gains only). A delta
/// of the wrong kind for the hazard leaves it unchanged.
pub fn sensitivity_factor(hazard: HazardType, kind: SignalKind, delta: f64, s: &SensitivityConfig) -> f64 {
    match (hazard, kind) {
        (HazardType::HeatStress, SignalKind::TemperatureDeltaC) => 1.0 + s.heat_per_degree * delta,
        (HazardType::CoastalInundation, SignalKind::TemperatureDeltaC) => {
            1.0 + s.coastal_per_degree * delta
        }
        (HazardType::Drought, SignalKind::PrecipitationChangePct) => 1.0 - s.drought_per_pct * delta,
        (HazardType::Flood | HazardType::Landslide, SignalKind::PrecipitationChangePct) => {
            1.0 + (s.wet_hazard_per_pct * delta).max(0.0)
        }
        _ => 1.0,
    }
}

/// Project `current` with one provider signal. Risk-score signals are taken
/// as the projected value directly.
pub fn project_with_signal(
    hazard: HazardType,
    current: f64,
    signal: &ProviderSignal,
    sensitivity: &SensitivityConfig,
) -> f64 {
    match signal.kind {
        SignalKind::RiskScore => clamp_unit(signal.value),
        kind => clamp_unit(current * sensitivity_factor(hazard, kind, signal.value, sensitivity)),
    }
}

/// Static scenario multipliers, used when no projection is available.
pub fn project_with_multipliers(current: f64, multipliers: HorizonMultipliers) -> (f64, f64) {
    (
        clamp_unit(current * multipliers.horizon_2030),
        clamp_unit(current * multipliers.horizon_2050),
    )
}
