use async_trait::async_trait;
use linkhash_core::error::StorageError;
use linkhash_core::key::MAX_KEY_LEN;
use linkhash_core::store::{InsertOutcome, KeyValueStore, Result};
use linkhash_core::ShortKey;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::{debug, trace};

const MAX_IDENTIFIER_LEN: usize = 63;

/// PostgreSQL implementation of the store contract.
///
/// Every binding is one row of `"<table>" (id CHAR(key_len) PRIMARY KEY,
/// url TEXT NOT NULL)`. The table is created on the first operation if it
/// does not exist yet, so a fresh database needs no migration step.
#[derive(Debug)]
pub struct PostgresStore {
    pool: PgPool,
    table: String,
    key_len: usize,
    schema: OnceCell<()>,
    queries: Queries,
}

#[derive(Debug)]
struct Queries {
    load: String,
    upsert: String,
    insert: String,
}

impl Queries {
    fn for_table(table: &str) -> Self {
        Self {
            load: format!(r#"SELECT url FROM "{table}" WHERE id = $1"#),
            upsert: format!(
                r#"INSERT INTO "{table}" (id, url) VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE SET url = EXCLUDED.url"#
            ),
            insert: format!(
                r#"INSERT INTO "{table}" (id, url) VALUES ($1, $2)
                ON CONFLICT (id) DO NOTHING"#
            ),
        }
    }
}

impl PostgresStore {
    /// Creates a store on top of an existing connection pool.
    ///
    /// `table` must be a plain SQL identifier and `key_len` the fixed key
    /// width used for the `id` column.
    pub fn new(pool: PgPool, table: impl Into<String>, key_len: usize) -> Result<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        if key_len == 0 || key_len > MAX_KEY_LEN {
            return Err(StorageError::Configuration(format!(
                "key length must be between 1 and {}, got {}",
                MAX_KEY_LEN, key_len
            )));
        }

        Ok(Self {
            pool,
            queries: Queries::for_table(&table),
            table,
            key_len,
            schema: OnceCell::new(),
        })
    }

    /// Creates a store by opening a new connection pool.
    pub async fn connect(database_url: &str, table: impl Into<String>, key_len: usize) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Self::new(pool, table, key_len)
    }

    async fn ensure_table(&self) -> Result<()> {
        self.schema
            .get_or_try_init(|| self.create_table())
            .await?;
        Ok(())
    }

    async fn create_table(&self) -> Result<()> {
        let ddl = format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (
                id CHAR({}) PRIMARY KEY,
                url TEXT NOT NULL
            )"#,
            self.table, self.key_len
        );

        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(table = %self.table, key_len = self.key_len, "short link table ready");
        Ok(())
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*` up to 63 bytes, the identifiers that can
/// be interpolated into SQL without escaping.
fn validate_table_name(table: &str) -> Result<()> {
    let mut bytes = table.bytes();
    let valid_start = bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    let valid_rest = bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if !valid_start || !valid_rest || table.len() > MAX_IDENTIFIER_LEN {
        return Err(StorageError::Configuration(format!(
            "invalid table name '{}'",
            table
        )));
    }
    Ok(())
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        sqlx::Error::Configuration(_) => StorageError::Configuration(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl KeyValueStore for PostgresStore {
    async fn load(&self, key: &ShortKey) -> Result<Option<String>> {
        self.ensure_table().await?;
        trace!(key = %key, "loading binding");

        sqlx::query_scalar::<_, String>(&self.queries.load)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn store(&self, key: &ShortKey, url: &str) -> Result<()> {
        self.ensure_table().await?;

        sqlx::query(&self.queries.upsert)
            .bind(key.as_str())
            .bind(url)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn insert_if_absent(&self, key: &ShortKey, url: &str) -> Result<InsertOutcome> {
        self.ensure_table().await?;

        let result = sqlx::query(&self.queries.insert)
            .bind(key.as_str())
            .bind(url)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() > 0 {
            return Ok(InsertOutcome::Inserted);
        }

        // Bindings are never deleted, so the conflicting row is still there.
        match self.load(key).await? {
            Some(existing) => Ok(InsertOutcome::Occupied(existing)),
            None => Err(StorageError::InvalidData(format!(
                "insert for key '{}' conflicted but no row was found",
                key
            ))),
        }
    }
}
