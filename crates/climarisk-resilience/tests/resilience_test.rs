use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

use climarisk_core::errors::ProviderError;
use climarisk_core::models::CircuitState;
use climarisk_core::CallContext;
use climarisk_resilience::{retry, BreakerSettings, CircuitBreaker, RetryPolicy};

fn transient() -> ProviderError {
    ProviderError::Transient {
        provider: "climate".into(),
        reason: "connection reset".into(),
    }
}

fn settings(threshold: u32, recovery_ms: u64) -> BreakerSettings {
    BreakerSettings {
        failure_threshold: threshold,
        recovery_timeout: Duration::from_millis(recovery_ms),
    }
}

// ── Breaker lifecycle ─────────────────────────────────────────────────────

#[test]
fn full_lifecycle_closed_open_half_open_closed() {
    let breaker = CircuitBreaker::new("climate", settings(3, 50));
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let _ = breaker.call(|| -> Result<(), _> {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(transient())
        });
    }
    assert_eq!(breaker.state(), CircuitState::Open);

    // Next call must not reach the wrapped function.
    let err = breaker
        .call(|| -> Result<(), ProviderError> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap_err();
    assert!(matches!(err, ProviderError::CircuitOpen { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    std::thread::sleep(Duration::from_millis(80));
    assert_eq!(breaker.state(), CircuitState::HalfOpen);

    breaker.call(|| Ok::<_, ProviderError>(())).unwrap();
    assert_eq!(breaker.state(), CircuitState::Closed);
    assert_eq!(breaker.consecutive_failures(), 0);
    assert_eq!(breaker.health().consecutive_failures, 0);
}

#[test]
fn half_open_admits_a_single_trial() {
    let breaker = Arc::new(CircuitBreaker::new("hydro", settings(1, 10)));
    let _ = breaker.call(|| -> Result<(), _> { Err(transient()) });
    std::thread::sleep(Duration::from_millis(30));

    let invoked = Arc::new(AtomicUsize::new(0));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let breaker = Arc::clone(&breaker);
            let invoked = Arc::clone(&invoked);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                breaker.call(|| {
                    invoked.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(100));
                    Ok::<_, ProviderError>(())
                })
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(breaker.state(), CircuitState::Closed);
}

#[test]
fn breakers_are_independent_per_provider() {
    let a = CircuitBreaker::new("a", settings(1, 60_000));
    let b = CircuitBreaker::new("b", settings(1, 60_000));
    let _ = a.call(|| -> Result<(), _> { Err(transient()) });
    assert_eq!(a.state(), CircuitState::Open);
    assert_eq!(b.state(), CircuitState::Closed);
}

#[test]
fn panicking_trial_does_not_wedge_half_open() {
    let breaker = Arc::new(CircuitBreaker::new("panicky", settings(1, 10)));
    let _ = breaker.call(|| -> Result<(), _> { Err(transient()) });
    std::thread::sleep(Duration::from_millis(30));

    let b = Arc::clone(&breaker);
    let joined = std::thread::spawn(move || {
        let _ = b.call(|| -> Result<(), ProviderError> { panic!("trial blew up") });
    })
    .join();
    assert!(joined.is_err());

    // A fresh trial is admitted.
    assert!(breaker.call(|| Ok::<_, ProviderError>(())).is_ok());
}

// ── Retry around breaker ─────────────────────────────────────────────────

#[test]
fn retry_stops_when_breaker_opens() {
    let breaker = CircuitBreaker::new("climate", settings(2, 60_000));
    let invoked = AtomicUsize::new(0);
    let ctx = CallContext::unbounded(Duration::from_secs(1));

    let out: Result<(), _> = retry(&RetryPolicy::immediate(5), &ctx, "climate", |_| {
        breaker.call(|| {
            invoked.fetch_add(1, Ordering::SeqCst);
            Err(transient())
        })
    });

    // Two real failures open the breaker; the third attempt is rejected and not retried.
    assert!(matches!(out, Err(ProviderError::CircuitOpen { .. })));
    assert_eq!(invoked.load(Ordering::SeqCst), 2);
}

#[test]
fn retry_sleeps_between_attempts() {
    let policy = RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(20),
        exponential_base: 2.0,
        max_delay: Duration::from_secs(1),
        jitter: false,
        jitter_fraction: 0.0,
    };
    let ctx = CallContext::unbounded(Duration::from_secs(1));
    let started = std::time::Instant::now();
    let out: Result<(), _> = retry(&policy, &ctx, "p", |_| Err(transient()));
    assert!(out.is_err());
    // 20ms + 40ms of backoff.
    assert!(started.elapsed() >= Duration::from_millis(60));
}
