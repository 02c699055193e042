use climarisk_core::config::CalculatorConfig;
use climarisk_core::geo::clamp_unit;
use climarisk_core::models::HazardResult;

/// Hazard-weighted average of `projected_2030`. Weights are not
/// renormalized to the full table: the divisor is the sum actually used.
pub fn overall_risk_score(hazards: &[HazardResult], config: &CalculatorConfig) -> f64 {
    let (weighted, total_weight) = hazards.iter().fold((0.0, 0.0), |(sum, total), h| {
        let w = config.weight_for(h.hazard_type);
        (sum + w * h.projected_2030, total + w)
    });
    if total_weight > 0.0 {
        clamp_unit(weighted / total_weight)
    } else {
        0.0
    }
}
