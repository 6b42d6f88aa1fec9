use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use linkhash_core::store::{InsertOutcome, KeyValueStore, Result};
use linkhash_core::ShortKey;

/// Volatile implementation of [`KeyValueStore`] backed by a `DashMap`.
///
/// Bindings live only as long as the process. The sharded locks let
/// concurrent requests for different keys proceed without blocking each
/// other, and the entry API makes `insert_if_absent` atomic per key.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    bindings: DashMap<ShortKey, String>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Number of bindings currently held.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn load(&self, key: &ShortKey) -> Result<Option<String>> {
        Ok(self.bindings.get(key).map(|url| url.value().clone()))
    }

    async fn store(&self, key: &ShortKey, url: &str) -> Result<()> {
        self.bindings.insert(key.clone(), url.to_owned());
        Ok(())
    }

    async fn insert_if_absent(&self, key: &ShortKey, url: &str) -> Result<InsertOutcome> {
        match self.bindings.entry(key.clone()) {
            Entry::Occupied(existing) => Ok(InsertOutcome::Occupied(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(url.to_owned());
                Ok(InsertOutcome::Inserted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(s: &str) -> ShortKey {
        ShortKey::new_unchecked(s)
    }

    #[tokio::test]
    async fn store_and_load() {
        let store = InMemoryStore::new();

        store.store(&key("abc123"), "https://example.com").await.unwrap();

        let url = store.load(&key("abc123")).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn load_nonexistent() {
        let store = InMemoryStore::new();

        assert!(store.load(&key("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_overwrites() {
        let store = InMemoryStore::new();

        store.store(&key("abc123"), "https://one.example").await.unwrap();
        store.store(&key("abc123"), "https://two.example").await.unwrap();

        let url = store.load(&key("abc123")).await.unwrap();
        assert_eq!(url.as_deref(), Some("https://two.example"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn insert_if_absent_into_free_key() {
        let store = InMemoryStore::new();

        let outcome = store
            .insert_if_absent(&key("abc123"), "https://example.com")
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::Inserted);
        assert_eq!(
            store.load(&key("abc123")).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_existing_binding() {
        let store = InMemoryStore::new();
        store.store(&key("abc123"), "https://one.example").await.unwrap();

        let outcome = store
            .insert_if_absent(&key("abc123"), "https://two.example")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            InsertOutcome::Occupied("https://one.example".to_string())
        );
        assert_eq!(
            store.load(&key("abc123")).await.unwrap().as_deref(),
            Some("https://one.example")
        );
    }

    #[tokio::test]
    async fn concurrent_insert_if_absent_has_one_winner() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..16u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert_if_absent(&key("contested"), &format!("https://example{}.com", i))
                    .await
                    .unwrap()
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() == InsertOutcome::Inserted {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_access() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let k = key(&format!("code{:03}", i));
                store
                    .store(&k, &format!("https://example{}.com", i))
                    .await
                    .unwrap();
            }));
        }

        for i in 0..10u64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let k = key(&format!("code{:03}", i));
                let _ = store.load(&k).await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10u64 {
            let k = key(&format!("code{:03}", i));
            let url = store.load(&k).await.unwrap();
            assert_eq!(url, Some(format!("https://example{}.com", i)));
        }
    }
}
