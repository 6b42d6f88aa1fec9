//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which turns a key deriver and a
//! key-value store into a collision-safe, idempotent shortener, together with
//! the runtime configuration shared by the binaries and the gRPC adapter.
//! Core types are re-exported from `linkhash_core`.

pub mod config;
pub mod grpc;
pub mod service;

pub use config::{build_shortener, ShortenerArgs, ShortenerConfig, StorageBackend, StorageConfig};
pub use linkhash_core::{Shortened, Shortener, ShortenerError};
pub use service::ShortenerService;
