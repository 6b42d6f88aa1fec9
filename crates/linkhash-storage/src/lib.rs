pub mod memory;
pub mod postgres;

pub use linkhash_core::{InsertOutcome, KeyValueStore, StorageError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
