pub mod sha256;

pub use sha256::Sha256Deriver;

use linkhash_core::error::Result;
use linkhash_core::ShortKey;

/// Trait for deriving candidate short keys from content.
///
/// Implementations are pure functions of `(content, attempt)` and never touch
/// storage. The same inputs must yield the same key on every call and across
/// process restarts, and distinct attempt numbers should yield distinct
/// candidates for the same content.
pub trait KeyDeriver: Send + Sync + 'static {
    /// Length of every key this deriver produces.
    fn key_len(&self) -> usize;

    /// Derives the candidate key for `content` at `attempt`.
    fn derive(&self, content: &str, attempt: u32) -> Result<ShortKey>;
}
