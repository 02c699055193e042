use std::time::Duration;

use climarisk_core::errors::ProviderError;
use climarisk_core::models::CircuitState;
use climarisk_resilience::{BreakerSettings, CircuitBreaker, RetryPolicy};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn policy(initial_ms: u64, base: f64, max_ms: u64) -> RetryPolicy {
    RetryPolicy {
        max_attempts: 10,
        initial_delay: Duration::from_millis(initial_ms),
        exponential_base: base,
        max_delay: Duration::from_millis(max_ms),
        jitter: true,
        jitter_fraction: 0.25,
    }
}

// ── Backoff bounds ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn base_delay_never_exceeds_max(initial in 0u64..5_000, base in 1.0f64..4.0, max in 0u64..120_000, attempt in 0u32..40) {
        let p = policy(initial, base, max);
        prop_assert!(p.base_delay(attempt) <= Duration::from_millis(max));
    }

    #[test]
    fn base_delay_is_non_decreasing(initial in 1u64..5_000, base in 1.0f64..4.0, attempt in 0u32..30) {
        let p = policy(initial, base, 60_000);
        prop_assert!(p.base_delay(attempt) <= p.base_delay(attempt + 1));
    }

    #[test]
    fn jitter_within_quarter(seed in any::<u64>(), attempt in 0u32..8) {
        let p = policy(1_000, 2.0, 60_000);
        let mut rng = StdRng::seed_from_u64(seed);
        let base = p.base_delay(attempt).as_secs_f64();
        let d = p.delay_with(attempt, &mut rng).as_secs_f64();
        prop_assert!(d >= base * 0.75 - 1e-9);
        prop_assert!(d <= base * 1.25 + 1e-9);
    }
}

// ── Breaker threshold ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn opens_exactly_at_threshold(threshold in 1u32..10) {
        let b = CircuitBreaker::new("p", BreakerSettings {
            failure_threshold: threshold,
            recovery_timeout: Duration::from_secs(3600),
        });
        for i in 0..threshold {
            prop_assert_eq!(b.state(), CircuitState::Closed, "opened early at {}", i);
            let _ = b.call(|| -> Result<(), _> {
                Err(ProviderError::Transient { provider: "p".into(), reason: "x".into() })
            });
        }
        prop_assert_eq!(b.state(), CircuitState::Open);
    }
}
