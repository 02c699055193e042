use serde::{Deserialize, Serialize};

use super::{HazardType, RiskScenario};

/// Input to a hazard provider call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalQuery {
    pub hazard: HazardType,
    pub latitude: f64,
    pub longitude: f64,
    pub scenario: RiskScenario,
    pub year: u16,
}

/// What a provider's `value` measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    /// A risk score in [0, 1].
    RiskScore,
    /// Warming relative to the reference period (°C).
    TemperatureDeltaC,
    /// Precipitation change relative to the reference period (%).
    PrecipitationChangePct,
}

impl SignalKind {
    pub fn unit(&self) -> &'static str {
        match self {
            Self::RiskScore => "score",
            Self::TemperatureDeltaC => "degC",
            Self::PrecipitationChangePct => "pct",
        }
    }
}

/// A provider's answer for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSignal {
    pub value: f64,
    pub confidence: f64,
    pub source: String,
    pub kind: SignalKind,
}

/// How the calculator consumes a provider's signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderRole {
    /// Historical/observed frequency, blended into the current baseline.
    Observation,
    /// Forward-looking climate trend, applied to the 2030/2050 horizons.
    Projection,
}
