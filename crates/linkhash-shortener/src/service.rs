use async_trait::async_trait;
use linkhash_core::{
    InsertOutcome, KeyValueStore, ShortKey, Shortened, Shortener, ShortenerError,
};
use linkhash_deriver::KeyDeriver;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Attempt cap used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

/// A concrete implementation of the `Shortener` trait.
///
/// The service walks the attempt sequence `0, 1, 2, ...` of its
/// [`KeyDeriver`] for a url until it finds a candidate that is either free
/// (new binding) or already bound to the same url (replay). Candidates bound
/// to a different url are collisions and move the walk on to the next
/// attempt. Because derivation is a pure function of `(url, attempt)`, the
/// walk for a given url always visits the same candidates in the same order,
/// which is what makes repeated shortening idempotent.
///
/// Candidates in [`RESERVED_KEYS`](linkhash_core::key::RESERVED_KEYS) are
/// skipped like collisions but still count against the attempt cap.
///
/// The service keeps no state between calls. Claiming a free candidate goes
/// through [`KeyValueStore::insert_if_absent`], so two different urls racing
/// for one candidate cannot both win it.
#[derive(Debug)]
pub struct ShortenerService<S, D> {
    store: Arc<S>,
    deriver: Arc<D>,
    max_attempts: u32,
}

impl<S, D> Clone for ShortenerService<S, D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            deriver: Arc::clone(&self.deriver),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: KeyValueStore, D: KeyDeriver> ShortenerService<S, D> {
    /// Creates a service with the default attempt cap.
    pub fn new(store: S, deriver: D) -> Self {
        Self::with_shared_store(Arc::new(store), deriver)
    }

    /// Creates a service over a store that is also used elsewhere.
    pub fn with_shared_store(store: Arc<S>, deriver: D) -> Self {
        Self {
            store,
            deriver: Arc::new(deriver),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many candidates `shorten` tries before giving up.
    ///
    /// Fails with `InvalidArgument` for zero.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Result<Self, ShortenerError> {
        if max_attempts == 0 {
            return Err(ShortenerError::InvalidArgument(
                "max attempts must be at least 1".to_string(),
            ));
        }
        self.max_attempts = max_attempts;
        Ok(self)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn validate_url(url: &str) -> Result<(), ShortenerError> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidArgument(
                "url cannot be empty".to_string(),
            ));
        }
        // Such urls cannot be carried in a Location header.
        if url.chars().any(|c| c.is_ascii_control()) {
            return Err(ShortenerError::InvalidArgument(
                "url cannot contain control characters".to_string(),
            ));
        }
        Ok(())
    }

    /// Tries to claim a candidate that `load` reported as free.
    ///
    /// Returns `None` when a concurrent writer bound it to another url first.
    async fn claim(&self, candidate: &ShortKey, url: &str) -> Result<Option<Shortened>, ShortenerError> {
        match self.store.insert_if_absent(candidate, url).await? {
            InsertOutcome::Inserted => {
                debug!(key = %candidate, "created binding");
                Ok(Some(Shortened {
                    key: candidate.clone(),
                    created: true,
                }))
            }
            InsertOutcome::Occupied(existing) if existing == url => {
                debug!(key = %candidate, "concurrent request bound the same url");
                Ok(Some(Shortened {
                    key: candidate.clone(),
                    created: false,
                }))
            }
            InsertOutcome::Occupied(_) => {
                debug!(key = %candidate, "lost candidate to a concurrent writer");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<S: KeyValueStore, D: KeyDeriver> Shortener for ShortenerService<S, D> {
    async fn shorten(&self, url: &str) -> Result<Shortened, ShortenerError> {
        Self::validate_url(url)?;

        for attempt in 0..self.max_attempts {
            let candidate = self.deriver.derive(url, attempt)?;
            if candidate.is_reserved() {
                debug!(key = %candidate, attempt, "skipping reserved candidate");
                continue;
            }
            trace!(key = %candidate, attempt, "trying candidate");

            match self.store.load(&candidate).await? {
                None => {
                    if let Some(shortened) = self.claim(&candidate, url).await? {
                        return Ok(shortened);
                    }
                }
                Some(existing) if existing == url => {
                    debug!(key = %candidate, attempt, "url already shortened");
                    return Ok(Shortened {
                        key: candidate,
                        created: false,
                    });
                }
                Some(_) => {
                    debug!(key = %candidate, attempt, "candidate bound to another url");
                }
            }
        }

        warn!(url = %url, attempts = self.max_attempts, "no free short key");
        Err(ShortenerError::KeySpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    async fn resolve(&self, key: &ShortKey) -> Result<String, ShortenerError> {
        trace!(key = %key, "resolving short key");

        self.store
            .load(key)
            .await?
            .ok_or_else(|| ShortenerError::NotFound(key.to_string()))
    }
}
