//! Shared test doubles and fixture loading for climarisk test suites.
//!
//! - [`ScriptedProvider`]: answers every supported hazard with a fixed signal
//!   or a fixed error, and counts calls.
//! - [`fast_resilience`] / [`test_config`]: configurations with zero backoff.
//! - [`load_fixture`]: typed loading of JSON files under `data/`.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use climarisk_core::config::{ClimaConfig, ResilienceConfig};
use climarisk_core::errors::ProviderError;
use climarisk_core::models::{HazardType, ProviderRole, ProviderSignal, SignalKind, SignalQuery};
use climarisk_core::traits::IHazardProvider;
use climarisk_core::CallContext;
use serde::de::DeserializeOwned;

/// What a [`ScriptedProvider`] answers with.
#[derive(Debug, Clone)]
pub enum Script {
    Signal { value: f64, confidence: f64, kind: SignalKind },
    Fail(ProviderError),
}

/// Provider double with a fixed answer and a call counter.
pub struct ScriptedProvider {
    name: String,
    role: ProviderRole,
    hazards: BTreeSet<HazardType>,
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(name: &str, role: ProviderRole, hazards: &[HazardType], script: Script) -> Self {
        Self {
            name: name.to_string(),
            role,
            hazards: hazards.iter().copied().collect(),
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Observation provider returning a fixed risk score.
    pub fn observation(name: &str, hazards: &[HazardType], value: f64, confidence: f64) -> Self {
        Self::new(
            name,
            ProviderRole::Observation,
            hazards,
            Script::Signal {
                value,
                confidence,
                kind: SignalKind::RiskScore,
            },
        )
    }

    /// Projection provider returning a fixed warming delta for every hazard.
    pub fn warming(name: &str, delta_c: f64) -> Self {
        Self::new(
            name,
            ProviderRole::Projection,
            &HazardType::ALL,
            Script::Signal {
                value: delta_c,
                confidence: 0.6,
                kind: SignalKind::TemperatureDeltaC,
            },
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IHazardProvider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> ProviderRole {
        self.role
    }

    fn supports(&self, hazard: HazardType) -> bool {
        self.hazards.contains(&hazard)
    }

    fn signal(&self, _query: &SignalQuery, _ctx: &CallContext) -> Result<ProviderSignal, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Signal {
                value,
                confidence,
                kind,
            } => Ok(ProviderSignal {
                value: *value,
                confidence: *confidence,
                source: self.name.clone(),
                kind: *kind,
            }),
            Script::Fail(err) => Err(err.clone()),
        }
    }
}

/// Provider that fails every call with a transient error.
pub fn failing_provider(name: &str, role: ProviderRole) -> ScriptedProvider {
    ScriptedProvider::new(
        name,
        role,
        &HazardType::ALL,
        Script::Fail(ProviderError::Transient {
            provider: name.to_string(),
            reason: "connection refused".to_string(),
        }),
    )
}

/// One failing provider per role, covering every hazard.
pub fn all_failing_provider_set() -> Vec<Arc<ScriptedProvider>> {
    vec![
        Arc::new(failing_provider("climate_projection", ProviderRole::Projection)),
        Arc::new(failing_provider("hydrological", ProviderRole::Observation)),
        Arc::new(failing_provider("occurrence_history", ProviderRole::Observation)),
    ]
}

/// Erase the concrete type for injection.
pub fn as_dyn(providers: &[Arc<ScriptedProvider>]) -> Vec<Arc<dyn IHazardProvider>> {
    providers
        .iter()
        .map(|p| p.clone() as Arc<dyn IHazardProvider>)
        .collect()
}

/// Two attempts, no backoff, breaker threshold 3.
pub fn fast_resilience() -> ResilienceConfig {
    ResilienceConfig {
        max_attempts: 2,
        initial_delay_ms: 0,
        max_delay_ms: 0,
        jitter: false,
        call_timeout_ms: 1_000,
        ..ResilienceConfig::default()
    }
}

/// Default configuration with fast resilience and an in-memory cache.
pub fn test_config() -> ClimaConfig {
    ClimaConfig {
        resilience: fast_resilience(),
        ..ClimaConfig::default()
    }
}

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture from `data/`.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// One entry of `data/golden_baselines.json`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoldenLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub regions: Vec<String>,
    pub baseline: std::collections::BTreeMap<HazardType, f64>,
    #[serde(default)]
    pub overall_all_failing_moderate: Option<f64>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GoldenBaselines {
    pub description: String,
    pub locations: Vec<GoldenLocation>,
}

pub fn golden_baselines() -> GoldenBaselines {
    load_fixture("golden_baselines.json")
}
