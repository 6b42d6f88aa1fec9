use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// The 64 symbols a short key is drawn from.
pub const ALPHABET: &[u8; 64] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_-";

/// Longest key a [`ShortKey`] may hold.
///
/// Matches the SHA-256 digest width: derivation spends one digest byte per
/// output symbol.
pub const MAX_KEY_LEN: usize = 32;

/// Keys that name fixed routes of the HTTP gateway and so can never be
/// redirected. The shortener never binds them.
pub const RESERVED_KEYS: &[&str] = &["page", "health"];

/// A validated short key identifying one binding.
///
/// Keys are 1-32 characters long and contain only symbols from [`ALPHABET`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortKey(SmolStr);

impl ShortKey {
    /// Creates a new `ShortKey` after validating the input.
    pub fn new(key: impl AsRef<str>) -> Result<Self> {
        let key = key.as_ref();
        Self::validate(key)?;
        Ok(Self(SmolStr::new(key)))
    }

    /// Creates a `ShortKey` without validation.
    ///
    /// Use this only for keys produced by trusted internal sources, such as a
    /// key deriver that only emits alphabet symbols.
    pub fn new_unchecked(key: impl AsRef<str>) -> Self {
        Self(SmolStr::new(key))
    }

    /// Renders the public short link for this key under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols in the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the key is one of [`RESERVED_KEYS`].
    pub fn is_reserved(&self) -> bool {
        RESERVED_KEYS.contains(&self.as_str())
    }

    fn validate(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(CoreError::InvalidArgument(
                "short key cannot be empty".to_string(),
            ));
        }

        if key.len() > MAX_KEY_LEN {
            return Err(CoreError::InvalidArgument(format!(
                "short key must be at most {} characters, got {}",
                MAX_KEY_LEN,
                key.len()
            )));
        }

        if !key.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(CoreError::InvalidArgument(format!(
                "short key must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                key
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ShortKey").field(&self.0).finish()
    }
}

impl Display for ShortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ShortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for ShortKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
