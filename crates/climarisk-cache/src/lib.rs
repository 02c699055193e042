//! # climarisk-cache
//!
//! TTL key-value caching for provider signals and computed results.
//!
//! Two interchangeable backends sit behind [`ICacheBackend`]:
//! - [`InMemoryCache`]: process-local, lock-sharded map.
//! - [`SqliteCache`]: a SQLite file shared by every instance pointed at it.
//!
//! Both expire lazily on `get` and sweep on `cleanup_expired`.

pub mod entry;
pub mod keys;
pub mod memory;
pub mod sqlite;
pub mod typed;

use std::sync::Arc;

use climarisk_core::config::{CacheBackendKind, CacheConfig};
use climarisk_core::errors::{CacheError, ClimaError, ClimaResult};
use climarisk_core::traits::ICacheBackend;

pub use entry::CacheEntry;
pub use keys::CacheKey;
pub use memory::InMemoryCache;
pub use sqlite::SqliteCache;
pub use typed::{get_typed, set_typed};

/// Build the backend selected by configuration.
pub fn create_backend(config: &CacheConfig) -> ClimaResult<Arc<dyn ICacheBackend>> {
    let backend: Arc<dyn ICacheBackend> = match config.backend {
        CacheBackendKind::Memory => Arc::new(InMemoryCache::new(config.default_ttl_secs)),
        CacheBackendKind::Sqlite => Arc::new(SqliteCache::open(
            std::path::Path::new(&config.sqlite_path),
            config.default_ttl_secs,
        )?),
    };
    tracing::info!(backend = backend.name(), "cache backend initialized");
    Ok(backend)
}

pub(crate) fn backend_err(backend: &str, message: impl ToString) -> ClimaError {
    CacheError::Backend {
        backend: backend.to_string(),
        message: message.to_string(),
    }
    .into()
}
