use crate::key::ShortKey;
use async_trait::async_trait;
use serde::Serialize;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

/// Reported by the transports when a call created a new binding.
pub const CREATED_MESSAGE: &str = "created";
/// Reported by the transports on a replay of an already bound url.
pub const EXISTING_MESSAGE: &str = "already exists";

/// The key a url ended up bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortened {
    pub key: ShortKey,
    /// `true` when this call created the binding, `false` on a replay of a
    /// url that was already bound.
    pub created: bool,
}

impl Shortened {
    /// Human readable outcome shared by every transport.
    pub fn message(&self) -> &'static str {
        if self.created {
            CREATED_MESSAGE
        } else {
            EXISTING_MESSAGE
        }
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Binds `url` to a short key, reusing the existing key if `url` was
    /// shortened before.
    async fn shorten(&self, url: &str) -> Result<Shortened>;

    /// Returns the url bound to `key`, or `NotFound`.
    async fn resolve(&self, key: &ShortKey) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_reflects_created_flag() {
        let mut shortened = Shortened {
            key: ShortKey::new_unchecked("abc123"),
            created: true,
        };
        assert_eq!(shortened.message(), CREATED_MESSAGE);

        shortened.created = false;
        assert_eq!(shortened.message(), EXISTING_MESSAGE);
    }
}
