//! # climarisk-core
//!
//! Foundation crate for the climarisk hazard aggregation system.
//! Defines the data model, provider/cache/resolver traits, errors, config,
//! constants and geodesy helpers. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod geo;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ClimaConfig;
pub use context::{CallContext, Deadline};
pub use errors::{CacheError, ClimaError, ClimaResult, ProviderError};
pub use models::{HazardResult, HazardType, LocationRisk, RiskScenario};
