//! These tests start a PostgreSQL container and need a container runtime.
//! Run them with `cargo test -p linkhash-storage -- --ignored`.

use std::sync::Arc;
use std::time::Duration;

use linkhash_core::ShortKey;
use linkhash_storage::{InsertOutcome, KeyValueStore, PostgresStore};
use linkhash_test_infra::postgres::{PostgresConfig, PostgresServer};
use sqlx::postgres::PgPoolOptions;

struct Fixture {
    _postgres: PostgresServer,
    pool: sqlx::PgPool,
}

impl Fixture {
    async fn start() -> Self {
        let postgres = PostgresServer::new(PostgresConfig::builder().build())
            .await
            .expect("start postgres");
        let url = postgres.database_url().await.expect("postgres url");
        let pool = connect_with_retry(&url).await;

        Self {
            _postgres: postgres,
            pool,
        }
    }

    fn store(&self, table: &str) -> PostgresStore {
        PostgresStore::new(self.pool.clone(), table, 10).expect("valid store config")
    }
}

async fn connect_with_retry(url: &str) -> sqlx::PgPool {
    let mut last_error = None;

    for _ in 0..20 {
        match PgPoolOptions::new().max_connections(5).connect(url).await {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect postgres: {last_error:?}");
}

fn key(value: &str) -> ShortKey {
    ShortKey::new_unchecked(value)
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn table_is_created_on_first_use() {
    let fixture = Fixture::start().await;
    let store = fixture.store("lazy_links");

    assert!(store.load(&key("abcdefghij")).await.unwrap().is_none());

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
    )
    .bind("lazy_links")
    .fetch_one(&fixture.pool)
    .await
    .unwrap();
    assert!(exists);
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn store_and_load() {
    let fixture = Fixture::start().await;
    let store = fixture.store("short_links");

    store
        .store(&key("abcdefghij"), "https://example.com")
        .await
        .unwrap();

    let url = store.load(&key("abcdefghij")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn store_overwrites_existing_binding() {
    let fixture = Fixture::start().await;
    let store = fixture.store("short_links");

    store.store(&key("abcdefghij"), "https://one.example").await.unwrap();
    store.store(&key("abcdefghij"), "https://two.example").await.unwrap();

    let url = store.load(&key("abcdefghij")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://two.example"));
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn insert_if_absent_reports_existing_url() {
    let fixture = Fixture::start().await;
    let store = fixture.store("short_links");

    let first = store
        .insert_if_absent(&key("abcdefghij"), "https://one.example")
        .await
        .unwrap();
    let second = store
        .insert_if_absent(&key("abcdefghij"), "https://two.example")
        .await
        .unwrap();

    assert_eq!(first, InsertOutcome::Inserted);
    assert_eq!(
        second,
        InsertOutcome::Occupied("https://one.example".to_string())
    );
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn bindings_survive_a_new_store_instance() {
    let fixture = Fixture::start().await;

    fixture
        .store("short_links")
        .store(&key("abcdefghij"), "https://example.com")
        .await
        .unwrap();

    let reopened = fixture.store("short_links");
    let url = reopened.load(&key("abcdefghij")).await.unwrap();
    assert_eq!(url.as_deref(), Some("https://example.com"));
}

#[tokio::test]
#[ignore = "requires a container runtime"]
async fn concurrent_insert_if_absent_has_one_winner() {
    let fixture = Fixture::start().await;
    let store = Arc::new(fixture.store("short_links"));
    let mut handles = vec![];

    for i in 0..8u32 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .insert_if_absent(&key("contested0"), &format!("https://example{i}.com"))
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
}
