use crate::service::{ShortenerService, DEFAULT_MAX_ATTEMPTS};
use clap::{Args, ValueEnum};
use linkhash_core::{Shortener, ShortenerError};
use linkhash_deriver::{KeyDeriver, Sha256Deriver};
use linkhash_storage::{InMemoryStore, PostgresStore};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::info;
use typed_builder::TypedBuilder;

pub const KEY_LEN_ENV: &str = "LINKHASH_KEY_LEN";
pub const MAX_ATTEMPTS_ENV: &str = "LINKHASH_MAX_ATTEMPTS";
pub const STORAGE_BACKEND_ENV: &str = "LINKHASH_STORAGE_BACKEND";
pub const POSTGRES_DSN_ENV: &str = "LINKHASH_POSTGRES_DSN";
pub const TABLE_NAME_ENV: &str = "LINKHASH_TABLE_NAME";

pub const DEFAULT_KEY_LEN: usize = 10;
pub const DEFAULT_TABLE_NAME: &str = "short_links";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::InMemory => write!(f, "in-memory"),
            StorageBackend::Postgres => write!(f, "postgres"),
        }
    }
}

/// Command line options shared by every binary that hosts a shortener.
#[derive(Debug, Clone, Args)]
pub struct ShortenerArgs {
    /// Number of symbols in generated keys (1-32).
    #[arg(long, env = KEY_LEN_ENV, default_value_t = DEFAULT_KEY_LEN)]
    pub key_len: usize,

    /// Candidates tried per url before giving up.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackend::InMemory
    )]
    pub storage: StorageBackend,

    #[arg(long, env = POSTGRES_DSN_ENV, required_if_eq("storage", "postgres"))]
    pub postgres_dsn: Option<String>,

    #[arg(long, env = TABLE_NAME_ENV, default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,
}

impl ShortenerArgs {
    pub fn into_config(self) -> Result<ShortenerConfig, ShortenerError> {
        let storage = match self.storage {
            StorageBackend::InMemory => StorageConfig::InMemory,
            StorageBackend::Postgres => StorageConfig::Postgres {
                dsn: self.postgres_dsn.ok_or_else(|| {
                    ShortenerError::InvalidArgument(
                        "postgres dsn is required when storage backend is postgres".to_string(),
                    )
                })?,
                table: self.table_name,
            },
        };

        Ok(ShortenerConfig::builder()
            .key_len(self.key_len)
            .max_attempts(self.max_attempts)
            .storage(storage)
            .build())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    InMemory,
    Postgres { dsn: String, table: String },
}

impl StorageConfig {
    pub fn backend(&self) -> StorageBackend {
        match self {
            StorageConfig::InMemory => StorageBackend::InMemory,
            StorageConfig::Postgres { .. } => StorageBackend::Postgres,
        }
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerConfig {
    #[builder(default = DEFAULT_KEY_LEN)]
    pub key_len: usize,
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,
    #[builder(default = StorageConfig::InMemory)]
    pub storage: StorageConfig,
}

/// Builds the shortener described by `config`.
///
/// The key length is validated before any storage is opened, so a bad
/// configuration never reaches the database.
pub async fn build_shortener(config: &ShortenerConfig) -> Result<Arc<dyn Shortener>, ShortenerError> {
    let deriver = Sha256Deriver::new(config.key_len)?;

    info!(
        key_len = config.key_len,
        max_attempts = config.max_attempts,
        storage_backend = %config.storage.backend(),
        "building shortener"
    );

    match &config.storage {
        StorageConfig::InMemory => {
            let service = ShortenerService::new(InMemoryStore::new(), deriver)
                .with_max_attempts(config.max_attempts)?;
            Ok(Arc::new(service))
        }
        StorageConfig::Postgres { dsn, table } => {
            let store = PostgresStore::connect(dsn, table.as_str(), deriver.key_len()).await?;
            let service =
                ShortenerService::new(store, deriver).with_max_attempts(config.max_attempts)?;
            Ok(Arc::new(service))
        }
    }
}
