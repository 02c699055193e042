pub mod cache_stats;
pub mod circuit;
pub mod degradation_event;
pub mod h3_cell;
pub mod hazard;
pub mod hazard_result;
pub mod health_report;
pub mod location;
pub mod location_risk;
pub mod signal;
pub mod vulnerability;

pub use cache_stats::CacheStats;
pub use circuit::{CircuitState, ProviderHealth};
pub use degradation_event::DegradationEvent;
pub use h3_cell::H3Cell;
pub use hazard::{HazardType, RiskScenario};
pub use hazard_result::HazardResult;
pub use health_report::{ComponentDegradation, HealthReport};
pub use location::ResolvedLocation;
pub use location_risk::LocationRisk;
pub use signal::{ProviderRole, ProviderSignal, SignalKind, SignalQuery};
pub use vulnerability::VulnerabilityIndicator;
