pub mod cache_backend;
pub mod hazard_provider;
pub mod location_resolver;

pub use cache_backend::ICacheBackend;
pub use hazard_provider::IHazardProvider;
pub use location_resolver::ILocationResolver;
