use climarisk_core::geo::{clamp_unit, round_to};

/// Distance-decayed risk.
///
/// `risk = base * (1 - coefficient * (1 - (1 - distance / radius)))`, so the
/// center keeps `base` and the radius boundary keeps `base * (1 - coefficient)`.
pub fn decayed_risk(base_risk: f64, distance_km: f64, radius_km: f64, coefficient: f64) -> f64 {
    if radius_km <= 0.0 {
        return clamp_unit(base_risk);
    }
    let distance_factor = (1.0 - distance_km / radius_km).clamp(0.0, 1.0);
    clamp_unit(base_risk * (1.0 - coefficient * (1.0 - distance_factor)))
}

/// [`decayed_risk`] rounded to `precision` decimals.
pub fn decayed_risk_rounded(
    base_risk: f64,
    distance_km: f64,
    radius_km: f64,
    coefficient: f64,
    precision: u32,
) -> f64 {
    round_to(decayed_risk(base_risk, distance_km, radius_km, coefficient), precision)
}
