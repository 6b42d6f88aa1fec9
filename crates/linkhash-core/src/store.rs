use crate::error::StorageError;
use crate::key::ShortKey;
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Outcome of [`KeyValueStore::insert_if_absent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This call created the binding.
    Inserted,
    /// The key was already bound; carries the url it is bound to.
    Occupied(String),
}

/// Key to url mapping that owns every persisted binding.
///
/// Implementations must be safe to call from many tasks at once. Each call is
/// atomic on its own; no ordering is promised between calls.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Looks up the url bound to `key`.
    /// Returns `None` if no binding exists.
    async fn load(&self, key: &ShortKey) -> Result<Option<String>>;

    /// Creates or overwrites the binding for `key`.
    async fn store(&self, key: &ShortKey, url: &str) -> Result<()>;

    /// Binds `key` to `url` only if `key` is currently unbound.
    ///
    /// Never overwrites an existing binding. When the key is taken the
    /// current url is returned in [`InsertOutcome::Occupied`].
    async fn insert_if_absent(&self, key: &ShortKey, url: &str) -> Result<InsertOutcome>;
}
