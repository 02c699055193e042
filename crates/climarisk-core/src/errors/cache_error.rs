/// Cache backend errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend error ({backend}): {message}")]
    Backend { backend: String, message: String },

    #[error("cache value for key {key} could not be (de)serialized: {reason}")]
    Serialization { key: String, reason: String },

    #[error("cache lock poisoned: {backend}")]
    LockPoisoned { backend: String },
}
