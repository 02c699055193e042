use super::{CacheError, ProviderError};

/// Top-level error type for the climarisk system.
#[derive(Debug, thiserror::Error)]
pub enum ClimaError {
    #[error("invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("invalid scenario: {value}")]
    InvalidScenario { value: String },

    #[error("invalid hazard type: {value}")]
    InvalidHazard { value: String },

    #[error("invalid resolution {resolution}: must be between {min} and {max}")]
    InvalidResolution { resolution: u8, min: u8, max: u8 },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("location not found: {id}")]
    LocationNotFound { id: String },

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("configuration error: {reason}")]
    Config { reason: String },

    #[error("grid error: {reason}")]
    Grid { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClimaError {
    /// Caller supplied structurally invalid input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinates { .. }
                | Self::InvalidScenario { .. }
                | Self::InvalidHazard { .. }
                | Self::InvalidResolution { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// Caller referenced a location identifier nobody knows.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::LocationNotFound { .. })
    }

    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type ClimaResult<T> = Result<T, ClimaError>;
