use thiserror::Error;

/// Result type for validation and derivation of short keys.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures raised by [`KeyValueStore`](crate::KeyValueStore) implementations.
///
/// None of these mean "key absent"; absence is reported as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage is misconfigured: {0}")]
    Configuration(String),
}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("short key not found: {0}")]
    NotFound(String),
    #[error("no free short key after {attempts} attempts")]
    KeySpaceExhausted { attempts: u32 },
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidArgument(message) => Self::InvalidArgument(message),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        Self::StorageUnavailable(value.to_string())
    }
}
