use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClimaError;

/// Physical climate hazard categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardType {
    Flood,
    Drought,
    HeatStress,
    Landslide,
    CoastalInundation,
}

impl HazardType {
    pub const ALL: [HazardType; 5] = [
        HazardType::Flood,
        HazardType::Drought,
        HazardType::HeatStress,
        HazardType::Landslide,
        HazardType::CoastalInundation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Drought => "drought",
            Self::HeatStress => "heat_stress",
            Self::Landslide => "landslide",
            Self::CoastalInundation => "coastal_inundation",
        }
    }

    /// Whether the hazard is driven by temperature (as opposed to precipitation).
    pub fn is_temperature_driven(&self) -> bool {
        matches!(self, Self::HeatStress | Self::CoastalInundation)
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardType {
    type Err = ClimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flood" => Ok(Self::Flood),
            "drought" => Ok(Self::Drought),
            "heat_stress" | "heat-stress" | "heat" => Ok(Self::HeatStress),
            "landslide" => Ok(Self::Landslide),
            "coastal_inundation" | "coastal-inundation" | "coastal" => Ok(Self::CoastalInundation),
            _ => Err(ClimaError::InvalidHazard {
                value: s.to_string(),
            }),
        }
    }
}

/// Emissions pathway, ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskScenario {
    /// SSP1-2.6 / RCP2.6 equivalent.
    Low,
    /// SSP2-4.5 / RCP4.5 equivalent.
    #[default]
    Moderate,
    /// SSP5-8.5 / RCP8.5 equivalent.
    High,
}

impl RiskScenario {
    pub const ALL: [RiskScenario; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    /// Representative concentration pathway label.
    pub fn pathway(&self) -> &'static str {
        match self {
            Self::Low => "RCP2.6",
            Self::Moderate => "RCP4.5",
            Self::High => "RCP8.5",
        }
    }
}

impl fmt::Display for RiskScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskScenario {
    type Err = ClimaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "rcp2.6" | "rcp26" | "ssp1-2.6" | "ssp126" => Ok(Self::Low),
            "moderate" | "rcp4.5" | "rcp45" | "ssp2-4.5" | "ssp245" => Ok(Self::Moderate),
            "high" | "rcp8.5" | "rcp85" | "ssp5-8.5" | "ssp585" => Ok(Self::High),
            _ => Err(ClimaError::InvalidScenario {
                value: s.to_string(),
            }),
        }
    }
}
