pub mod cache_error;
pub mod clima_error;
pub mod provider_error;

pub use cache_error::CacheError;
pub use clima_error::{ClimaError, ClimaResult};
pub use provider_error::ProviderError;
