//! Hash and verify ASP.NET Identity password hashes.
//!
//! Two wire formats are supported:
//!
//! | Version | Layout | PBKDF2 parameters |
//! |---------|--------|-------------------|
//! | V2 | `0x00 \| salt(16) \| key(32)` | HMAC-SHA1, 1000 iterations |
//! | V3 | `0x01 \| prf \| iterations \| salt_len \| salt \| key` | stored in the header |
//!
//! ```no_run
//! let hash = aspnetpass::hash("Hello World").unwrap();
//! assert!(aspnetpass::verify("Hello World", &hash).unwrap());
//! assert!(!aspnetpass::verify("hello world", &hash).unwrap());
//! ```

pub mod crypto;
mod error;
pub mod format;
mod hasher;

use std::sync::LazyLock;

pub use crate::crypto::{Algorithm, HasherConfig, OsSaltGenerator, SaltGenerator};
pub use crate::error::{HashError, RandomUnavailable};
pub use crate::format::{DecodedHash, Version};
pub use crate::hasher::{Hasher, Scheme, Verification, verify};

/// V3 hasher with the default configuration, built on first use.
static DEFAULT_HASHER: LazyLock<Hasher<OsSaltGenerator>> =
    LazyLock::new(|| Hasher::with_config(HasherConfig::default(), OsSaltGenerator));

/// Returns the process-wide default hasher (V3, PBKDF2-HMAC-SHA256,
/// 10000 iterations, 16-byte salt, 32-byte key).
pub fn default_hasher() -> &'static Hasher<OsSaltGenerator> {
    &DEFAULT_HASHER
}

/// Hashes `password` with the default hasher.
///
/// # Errors
///
/// Fails only if the OS random source is unavailable.
pub fn hash(password: &str) -> Result<String, RandomUnavailable> {
    default_hasher().hash(password)
}

/// Decodes a stored hash into its version, PRF, iteration count, salt and key.
///
/// # Errors
///
/// Returns the first structural problem found; see [`HashError`].
pub fn decrypt(hash: &str) -> Result<DecodedHash, HashError> {
    format::decode(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hash_has_expected_length() {
        for password in ["", "a", "Hello World", "pässwörd", "\u{0}\u{1}"] {
            let hash = hash(password).unwrap();
            assert_eq!(hash.len(), 84);
        }
    }

    #[test]
    fn default_hash_verifies() {
        let hash = hash("correct horse").unwrap();

        assert!(verify("correct horse", &hash).unwrap());
        assert!(!verify("correct horse battery", &hash).unwrap());
    }

    #[test]
    fn default_hash_uses_default_config() {
        let decoded = decrypt(&hash("pw").unwrap()).unwrap();

        assert_eq!(decoded.version(), Version::V3);
        assert_eq!(decoded.algorithm(), Algorithm::Sha256);
        assert_eq!(decoded.iterations(), 10_000);
        assert_eq!(decoded.salt().len(), 16);
        assert_eq!(decoded.key().len(), 32);
    }

    #[test]
    fn default_hashes_are_salted() {
        assert_ne!(hash("pw").unwrap(), hash("pw").unwrap());
    }

    #[test]
    fn default_hasher_is_shared() {
        assert!(std::ptr::eq(default_hasher(), default_hasher()));
        assert_eq!(
            *default_hasher().scheme(),
            Scheme::V3(HasherConfig::default())
        );
    }

    #[test]
    fn default_hasher_is_sync() {
        fn assert_sync<T: Send + Sync>(_: &T) {}
        assert_sync(default_hasher());
    }
}
