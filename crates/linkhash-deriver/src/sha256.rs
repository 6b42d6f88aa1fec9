use crate::KeyDeriver;
use linkhash_core::error::{CoreError, Result};
use linkhash_core::key::{ALPHABET, MAX_KEY_LEN};
use linkhash_core::ShortKey;
use sha2::{Digest, Sha256};

/// Derives keys from the SHA-256 digest of `content` followed by the decimal
/// attempt number.
///
/// Each of the first `key_len` digest bytes selects one symbol of
/// [`ALPHABET`] by modulo reduction, so `key_len` can never exceed the 32
/// bytes of the digest.
#[derive(Debug, Clone, Copy)]
pub struct Sha256Deriver {
    key_len: usize,
}

impl Sha256Deriver {
    /// Creates a deriver producing keys of `key_len` symbols.
    ///
    /// Fails with `InvalidArgument` unless `1 <= key_len <= 32`.
    pub fn new(key_len: usize) -> Result<Self> {
        check_key_len(key_len)?;
        Ok(Self { key_len })
    }
}

impl KeyDeriver for Sha256Deriver {
    fn key_len(&self) -> usize {
        self.key_len
    }

    fn derive(&self, content: &str, attempt: u32) -> Result<ShortKey> {
        derive_key(content, attempt, self.key_len)
    }
}

/// Derives the `key_len`-symbol candidate for `content` at `attempt`.
pub fn derive_key(content: &str, attempt: u32, key_len: usize) -> Result<ShortKey> {
    check_key_len(key_len)?;

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hasher.update(attempt.to_string().as_bytes());
    let digest = hasher.finalize();

    let key: String = digest[..key_len]
        .iter()
        .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
        .collect();

    Ok(ShortKey::new_unchecked(key))
}

fn check_key_len(key_len: usize) -> Result<()> {
    if key_len == 0 || key_len > MAX_KEY_LEN {
        return Err(CoreError::InvalidArgument(format!(
            "key length must be between 1 and {}, got {}",
            MAX_KEY_LEN, key_len
        )));
    }
    Ok(())
}
