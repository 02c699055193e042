//! # climarisk-calculator
//!
//! Combines a geographic baseline, historical observations and climate
//! projections into a [`LocationRisk`](climarisk_core::LocationRisk) per
//! location. Provider failures degrade confidence and source tags; they are
//! never returned to the caller.

pub mod baseline;
pub mod blend;
pub mod confidence;
pub mod engine;
pub mod projection;
pub mod scoring;

pub use baseline::GeographicBaseline;
pub use engine::RiskCalculator;
