//! # climarisk-service
//!
//! The entry point consumers call. [`RiskService::bootstrap`] wires every
//! component from a [`ClimaConfig`](climarisk_core::config::ClimaConfig):
//! cache backend, municipality registry, resilient providers, calculator and
//! grid mapper. [`RiskService::from_parts`] accepts pre-built parts for tests
//! and embedding.

pub mod request;
pub mod runtime;
pub mod service;

pub use request::{GridExport, GridFormat, GridMode, GridRequest};
pub use runtime::ServiceOptions;
pub use service::RiskService;
