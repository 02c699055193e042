//! Typed helpers over the JSON-valued backend contract.
//!
//! Cache failures never fail a calculation: errors are logged and treated
//! as a miss (reads) or a skipped write.

use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use climarisk_core::traits::ICacheBackend;

/// Read and deserialize a cached value. Backend or decode errors read as a miss.
pub fn get_typed<T: DeserializeOwned>(cache: &dyn ICacheBackend, key: &str) -> Option<T> {
    match cache.get(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, backend = cache.name(), error = %e, "cached value has unexpected shape, ignoring");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!(key, backend = cache.name(), error = %e, "cache read failed, treating as miss");
            None
        }
    }
}

/// Serialize and store a value. Returns whether the write happened.
pub fn set_typed<T: Serialize>(
    cache: &dyn ICacheBackend,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
    source: &str,
) -> bool {
    let value = match serde_json::to_value(value) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "value not serializable, skipping cache write");
            return false;
        }
    };
    match cache.set(key, value, ttl, source) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, backend = cache.name(), error = %e, "cache write failed");
            false
        }
    }
}
