//! Historical blend: fold observation signals into the geographic baseline.

use climarisk_core::geo::clamp_unit;
use climarisk_core::models::ProviderSignal;

/// Confidence-weighted mean of observation scores. Falls back to the plain
/// mean when every confidence is zero. `None` for no signals.
pub fn historical_score(signals: &[ProviderSignal]) -> Option<f64> {
    if signals.is_empty() {
        return None;
    }
    let total_confidence: f64 = signals.iter().map(|s| s.confidence.max(0.0)).sum();
    let score = if total_confidence > 0.0 {
        signals
            .iter()
            .map(|s| clamp_unit(s.value) * s.confidence.max(0.0))
            .sum::<f64>()
            / total_confidence
    } else {
        signals.iter().map(|s| clamp_unit(s.value)).sum::<f64>() / signals.len() as f64
    };
    Some(score)
}

/// `geographic_weight * baseline + (1 - geographic_weight) * historical`.
pub fn blend(baseline: f64, historical: f64, geographic_weight: f64) -> f64 {
    let w = geographic_weight.clamp(0.0, 1.0);
    clamp_unit(w * baseline + (1.0 - w) * historical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use climarisk_core::models::SignalKind;

    fn sig(value: f64, confidence: f64) -> ProviderSignal {
        ProviderSignal {
            value,
            confidence,
            source: "t".into(),
            kind: SignalKind::RiskScore,
        }
    }

    #[test]
    fn sixty_forty_blend() {
        assert!((blend(0.35, 0.75, 0.6) - 0.51).abs() < 1e-12);
        assert_eq!(blend(0.2, 0.8, 1.0), 0.2);
    }

    #[test]
    fn weighted_by_confidence() {
        let h = historical_score(&[sig(0.4, 0.7), sig(0.6, 0.3)]).unwrap();
        assert!((h - 0.46).abs() < 1e-12);
    }

    #[test]
    fn zero_confidence_falls_back_to_mean() {
        let h = historical_score(&[sig(0.2, 0.0), sig(0.6, 0.0)]).unwrap();
        assert!((h - 0.4).abs() < 1e-12);
        assert_eq!(historical_score(&[]), None);
    }
}
