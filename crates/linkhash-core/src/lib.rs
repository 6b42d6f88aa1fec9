//! Core types and traits for the linkhash URL shortener.
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: the validated [`ShortKey`], the error taxonomy, the
//! [`KeyValueStore`] capability that persists bindings, and the
//! [`Shortener`] trait consumed by the transport adapters.

pub mod error;
pub mod key;
pub mod shortener;
pub mod store;

pub use error::{CoreError, ShortenerError, StorageError};
pub use key::ShortKey;
pub use shortener::{Shortened, Shortener, CREATED_MESSAGE, EXISTING_MESSAGE};
pub use store::{InsertOutcome, KeyValueStore};
