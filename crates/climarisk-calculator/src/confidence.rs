use climarisk_core::config::ConfidenceConfig;
use climarisk_core::geo::clamp_unit;
use climarisk_core::models::HazardType;

/// Base confidence, plus the capped bonus when provider data contributed,
/// minus the penalty when any provider call failed.
pub fn assign_confidence(config: &ConfidenceConfig, hazard: HazardType, contributed: bool, degraded: bool) -> f64 {
    let mut confidence = config.base_for(hazard);
    if contributed {
        confidence = (confidence + config.live_bonus).min(config.cap);
    }
    if degraded {
        confidence -= config.degraded_penalty;
    }
    clamp_unit(confidence)
}
