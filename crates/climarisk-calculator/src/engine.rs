//! The risk calculator: baseline, historical blend, projection, confidence
//! and weighted scoring, fanned out across hazards on a bounded pool.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rayon::prelude::*;

use climarisk_cache::{get_typed, set_typed, CacheKey};
use climarisk_core::config::{CacheConfig, CalculatorConfig, ClimaConfig};
use climarisk_core::constants::{HORIZON_MID, HORIZON_NEAR, SOURCE_GEOGRAPHIC, SOURCE_SCENARIO_MULTIPLIER};
use climarisk_core::errors::{ClimaError, ClimaResult, ProviderError};
use climarisk_core::geo::validate_coordinates;
use climarisk_core::models::{
    ComponentDegradation, DegradationEvent, HazardResult, HazardType, LocationRisk, ProviderHealth, ProviderRole,
    ProviderSignal, RiskScenario, SignalQuery,
};
use climarisk_core::traits::{ICacheBackend, IHazardProvider, ILocationResolver};
use climarisk_core::{CallContext, Deadline};
use climarisk_observability::tracing_setup::events;
use climarisk_observability::{DegradationTracker, TrackedDegradation};

use crate::baseline::GeographicBaseline;
use crate::blend::{blend, historical_score};
use crate::confidence::assign_confidence;
use crate::projection::{project_with_multipliers, project_with_signal};
use crate::scoring::overall_risk_score;

/// A provider failure observed while evaluating one hazard.
#[derive(Debug, Clone)]
struct ProviderFailure {
    error: ProviderError,
    fallback: &'static str,
}

/// Per-hazard evaluation result before it is folded into a `LocationRisk`.
#[derive(Debug)]
struct HazardOutcome {
    result: HazardResult,
    failures: Vec<ProviderFailure>,
    answered: Vec<String>,
}

pub struct RiskCalculator {
    config: CalculatorConfig,
    cache_config: CacheConfig,
    call_timeout: Duration,
    request_timeout: Option<Duration>,
    baseline: GeographicBaseline,
    providers: Vec<Arc<dyn IHazardProvider>>,
    cache: Option<Arc<dyn ICacheBackend>>,
    resolver: Option<Arc<dyn ILocationResolver>>,
    pool: rayon::ThreadPool,
    degradation: Mutex<DegradationTracker>,
}

impl RiskCalculator {
    /// Build a calculator over the given providers. Cache and resolver are optional.
    pub fn new(config: &ClimaConfig, providers: Vec<Arc<dyn IHazardProvider>>) -> ClimaResult<Self> {
        let calc = &config.calculator;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(calc.worker_threads.max(1))
            .thread_name(|i| format!("climarisk-worker-{i}"))
            .build()
            .map_err(|e| ClimaError::Config {
                reason: format!("failed to build worker pool: {e}"),
            })?;
        Ok(Self {
            config: calc.clone(),
            cache_config: config.cache.clone(),
            call_timeout: config.resilience.call_timeout(),
            request_timeout: config.resilience.request_timeout(),
            baseline: GeographicBaseline::new(calc.baseline.clone(), calc.noise.mode),
            providers,
            cache: None,
            resolver: None,
            pool,
            degradation: Mutex::new(DegradationTracker::new()),
        })
    }

    pub fn with_cache(mut self, cache: Arc<dyn ICacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ILocationResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn baseline(&self) -> &GeographicBaseline {
        &self.baseline
    }

    /// Worker pool shared with grid generation.
    pub fn pool(&self) -> &rayon::ThreadPool {
        &self.pool
    }

    pub fn providers(&self) -> &[Arc<dyn IHazardProvider>] {
        &self.providers
    }

    /// Deadline for a new request, from `resilience.request_timeout_ms`.
    pub fn request_deadline(&self) -> Deadline {
        self.request_timeout.map(Deadline::after).unwrap_or_default()
    }

    /// Risk for a coordinate. Provider failures never surface; only invalid
    /// coordinates fail.
    pub fn calculate_location_risk(
        &self,
        latitude: f64,
        longitude: f64,
        scenario: RiskScenario,
        location_id: Option<&str>,
        location_name: Option<&str>,
    ) -> ClimaResult<LocationRisk> {
        self.calculate_with_deadline(
            latitude,
            longitude,
            scenario,
            location_id,
            location_name,
            self.request_deadline(),
        )
    }

    /// As [`Self::calculate_location_risk`], bounded by an explicit deadline.
    pub fn calculate_with_deadline(
        &self,
        latitude: f64,
        longitude: f64,
        scenario: RiskScenario,
        location_id: Option<&str>,
        location_name: Option<&str>,
        deadline: Deadline,
    ) -> ClimaResult<LocationRisk> {
        validate_coordinates(latitude, longitude)?;
        let _span = climarisk_observability::risk_span!(latitude, longitude, scenario).entered();

        let hazards = self.hazards();
        let key = CacheKey::location_risk(latitude, longitude, scenario, &hazards, self.cache_config.key_precision);
        if let Some(cache) = &self.cache {
            if let Some(mut hit) = get_typed::<LocationRisk>(cache.as_ref(), &key) {
                tracing::debug!("location risk served from cache");
                hit.latitude = latitude;
                hit.longitude = longitude;
                hit.location_id = location_id.map(str::to_string);
                hit.location_name = location_name.map(str::to_string);
                hit.vulnerability = None;
                return Ok(hit);
            }
        }

        let ctx = CallContext::new(deadline, self.call_timeout);
        let outcomes: Vec<HazardOutcome> = self.pool.install(|| {
            hazards
                .par_iter()
                .map(|h| self.evaluate_hazard(*h, latitude, longitude, scenario, &ctx))
                .collect()
        });

        let degraded = outcomes.iter().any(|o| !o.failures.is_empty());
        self.track_degradation(&outcomes);

        let results: Vec<HazardResult> = outcomes.into_iter().map(|o| o.result).collect();
        let overall = overall_risk_score(&results, &self.config);
        let risk = LocationRisk {
            latitude,
            longitude,
            location_id: location_id.map(str::to_string),
            location_name: location_name.map(str::to_string),
            scenario,
            hazards: results,
            overall_risk_score: overall,
            degraded,
            vulnerability: None,
        };
        events::risk_calculated(latitude, longitude, scenario.as_str(), overall, degraded);

        if !degraded {
            if let Some(cache) = &self.cache {
                let ttl = Duration::from_secs(self.cache_config.result_ttl_secs);
                set_typed(cache.as_ref(), &key, &risk, Some(ttl), "risk_calculator");
            }
        }
        Ok(risk)
    }

    /// Risk for a registered location identifier.
    pub fn calculate_municipality_risk(&self, location_id: &str, scenario: RiskScenario) -> ClimaResult<LocationRisk> {
        let resolver = self.resolver.as_ref().ok_or_else(|| ClimaError::Config {
            reason: "no location resolver configured".to_string(),
        })?;
        let location = resolver.resolve(location_id)?;
        let mut risk = self.calculate_location_risk(
            location.latitude,
            location.longitude,
            scenario,
            Some(&location.id),
            Some(&location.name),
        )?;
        risk.vulnerability = location.vulnerability;
        Ok(risk)
    }

    pub fn provider_health(&self) -> Vec<ProviderHealth> {
        self.providers.iter().map(|p| p.health()).collect()
    }

    pub fn active_degradations(&self) -> usize {
        self.tracker().active_degradations().len()
    }

    /// Providers currently degraded, with how long and how often they failed
    /// within the last `window_secs`.
    pub fn degraded_components(&self, window_secs: i64) -> Vec<ComponentDegradation> {
        let tracker = self.tracker();
        self.providers
            .iter()
            .map(|p| p.name())
            .filter(|name| tracker.is_degraded(name))
            .map(|name| ComponentDegradation {
                component: name.to_string(),
                degraded_for_secs: tracker.degraded_duration(name).map_or(0, |d| d.num_seconds()),
                recent_failures: tracker.count_recent(name, window_secs),
            })
            .collect()
    }

    /// The `limit` most recent degradation events, newest first.
    pub fn recent_degradations(&self, limit: usize) -> Vec<DegradationEvent> {
        self.tracker().recent(limit)
    }

    /// Remove and return every tracked degradation.
    pub fn drain_degradation_events(&self) -> Vec<TrackedDegradation> {
        self.tracker().drain()
    }

    fn tracker(&self) -> MutexGuard<'_, DegradationTracker> {
        self.degradation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Configured hazards, duplicates removed, order kept.
    fn hazards(&self) -> Vec<HazardType> {
        let mut seen = Vec::with_capacity(self.config.hazards.len());
        for h in &self.config.hazards {
            if !seen.contains(h) {
                seen.push(*h);
            }
        }
        seen
    }

    fn track_degradation(&self, outcomes: &[HazardOutcome]) {
        let mut tracker = self.tracker();
        for name in outcomes.iter().flat_map(|o| &o.answered) {
            tracker.mark_recovered(name);
        }
        for outcome in outcomes {
            for failure in &outcome.failures {
                tracker.record(DegradationEvent {
                    component: failure.error.provider().to_string(),
                    failure: failure.error.to_string(),
                    fallback_used: failure.fallback.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }
    }

    fn providers_for(&self, role: ProviderRole, hazard: HazardType) -> impl Iterator<Item = &Arc<dyn IHazardProvider>> {
        self.providers
            .iter()
            .filter(move |p| p.role() == role && p.supports(hazard))
    }

    fn evaluate_hazard(
        &self,
        hazard: HazardType,
        latitude: f64,
        longitude: f64,
        scenario: RiskScenario,
        ctx: &CallContext,
    ) -> HazardOutcome {
        let query = |year| SignalQuery {
            hazard,
            latitude,
            longitude,
            scenario,
            year,
        };
        let mut sources = vec![SOURCE_GEOGRAPHIC.to_string()];
        let mut failures = Vec::new();
        let mut answered = Vec::new();
        let mut note = |provider: &dyn IHazardProvider, err: ProviderError, fallback: &'static str| {
            if err.is_failure() {
                failures.push(ProviderFailure { error: err, fallback });
            } else {
                tracing::debug!(provider = provider.name(), %hazard, reason = err.kind(), "provider had nothing to add");
            }
        };

        // Present day: baseline blended with observations.
        let baseline = self.baseline.current_risk(hazard, latitude, longitude);
        let mut observations: Vec<ProviderSignal> = Vec::new();
        for provider in self.providers_for(ProviderRole::Observation, hazard) {
            match provider.signal(&query(self.config.baseline_year), ctx) {
                Ok(signal) => {
                    answered.push(provider.name().to_string());
                    observations.push(signal);
                }
                Err(e) => note(provider.as_ref(), e, SOURCE_GEOGRAPHIC),
            }
        }
        let current = match historical_score(&observations) {
            Some(historical) => {
                sources.extend(observations.iter().map(|s| s.source.clone()));
                blend(baseline, historical, self.config.geographic_weight)
            }
            None => baseline,
        };

        // Horizons: first projection provider that answers both, else multipliers.
        let mut projected = None;
        for provider in self.providers_for(ProviderRole::Projection, hazard) {
            let both = provider
                .signal(&query(HORIZON_NEAR), ctx)
                .and_then(|near| provider.signal(&query(HORIZON_MID), ctx).map(|mid| (near, mid)));
            match both {
                Ok((near, mid)) => {
                    answered.push(provider.name().to_string());
                    sources.push(near.source.clone());
                    let s = &self.config.sensitivity;
                    projected = Some((
                        project_with_signal(hazard, current, &near, s),
                        project_with_signal(hazard, current, &mid, s),
                        Some((near.value, near.kind.unit().to_string())),
                    ));
                    break;
                }
                Err(e) => note(provider.as_ref(), e, SOURCE_SCENARIO_MULTIPLIER),
            }
        }
        let (projected_2030, projected_2050, raw) = projected.unwrap_or_else(|| {
            sources.push(SOURCE_SCENARIO_MULTIPLIER.to_string());
            let m = self.config.scenario_multipliers.for_scenario(scenario);
            let (near, mid) = project_with_multipliers(current, m);
            (near, mid, None)
        });

        let contributed = !answered.is_empty();
        let degraded = !failures.is_empty();
        let (raw_value, unit) = raw.unzip();
        HazardOutcome {
            result: HazardResult {
                hazard_type: hazard,
                current_risk: current,
                projected_2030,
                projected_2050,
                confidence: assign_confidence(&self.config.confidence, hazard, contributed, degraded),
                data_source: sources.join("+"),
                raw_value,
                unit,
            },
            failures,
            answered,
        }
    }
}
