//! Producing and checking stored password hashes.

use crate::crypto::{Algorithm, HasherConfig, SaltGenerator, derive_key};
use crate::format::{self, DecodedHash, Version, v2, v3};
use crate::HashError;

/// Which format a [`Hasher`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    V2,
    V3(HasherConfig),
}

impl Scheme {
    /// PBKDF2 parameters new hashes are derived with.
    pub fn params(&self) -> HasherConfig {
        match self {
            Scheme::V2 => HasherConfig::v2(),
            Scheme::V3(config) => *config,
        }
    }

    fn preamble(&self) -> Vec<u8> {
        match self {
            Scheme::V2 => v2::preamble().to_vec(),
            Scheme::V3(config) => {
                // validated to fit by HasherConfig
                let salt_len = u32::try_from(config.salt_len()).unwrap_or(u32::MAX);
                v3::preamble(config.algorithm(), config.iterations(), salt_len).to_vec()
            }
        }
    }
}

/// Outcome of [`Hasher::verify_with_rehash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Failed,
    Success,
    /// The password matched but the stored hash is weaker than this hasher
    /// would produce.
    SuccessRehashNeeded,
}

/// Hashes passwords in one format using an injected salt source.
#[derive(Debug, Clone)]
pub struct Hasher<G> {
    scheme: Scheme,
    generator: G,
}

impl<G: SaltGenerator> Hasher<G> {
    /// Creates a hasher writing the V2 format (PBKDF2-HMAC-SHA1, 1000
    /// iterations, 16-byte salt, 32-byte key).
    pub fn new_v2(generator: G) -> Self {
        Self {
            scheme: Scheme::V2,
            generator,
        }
    }

    /// Creates a hasher writing the V3 format.
    ///
    /// # Errors
    ///
    /// See [`HasherConfig::new`]; the first invalid parameter is reported.
    pub fn new_v3(
        iterations: u32,
        salt_len: usize,
        key_len: usize,
        algorithm: Algorithm,
        generator: G,
    ) -> Result<Self, HashError> {
        let config = HasherConfig::new(iterations, salt_len, key_len, algorithm)?;
        Ok(Self::with_config(config, generator))
    }

    pub fn with_config(config: HasherConfig, generator: G) -> Self {
        Self {
            scheme: Scheme::V3(config),
            generator,
        }
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Hashes `password` with a fresh salt.
    ///
    /// # Errors
    ///
    /// Only the salt generator can fail; its error is returned unchanged.
    pub fn hash(&self, password: &str) -> Result<String, G::Error> {
        let params = self.scheme.params();

        let mut salt = vec![0u8; params.salt_len()];
        let written = self.generator.fill(&mut salt)?;
        if written < salt.len() {
            log::warn!("salt generator filled {written} of {} bytes", salt.len());
        }

        let key = derive_key(
            password.as_bytes(),
            &salt,
            params.iterations(),
            params.key_len(),
            params.algorithm(),
        );

        log::debug!(
            "hashed password: algorithm={}, iterations={}",
            params.algorithm(),
            params.iterations()
        );

        Ok(format::encode(&self.scheme.preamble(), &salt, &key))
    }

    /// Verifies `password` against `hash` and reports whether the stored hash
    /// should be replaced with one produced by this hasher.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `hash` is malformed.
    pub fn verify_with_rehash(
        &self,
        password: &str,
        hash: &str,
    ) -> Result<Verification, HashError> {
        let decoded = format::decode(hash)?;
        if !matches_key(password, &decoded) {
            return Ok(Verification::Failed);
        }

        let rehash = match self.scheme {
            Scheme::V2 => false,
            Scheme::V3(config) => {
                decoded.version() == Version::V2
                    || decoded.iterations() < config.iterations()
                    || decoded.algorithm() != config.algorithm()
            }
        };

        if rehash {
            Ok(Verification::SuccessRehashNeeded)
        } else {
            Ok(Verification::Success)
        }
    }
}

/// Checks `password` against a stored hash.
///
/// A mismatch is `Ok(false)`; errors mean the hash itself is malformed and
/// no comparison was made.
pub fn verify(password: &str, hash: &str) -> Result<bool, HashError> {
    let decoded = format::decode(hash)?;
    Ok(matches_key(password, &decoded))
}

fn matches_key(password: &str, decoded: &DecodedHash) -> bool {
    let candidate = derive_key(
        password.as_bytes(),
        decoded.salt(),
        decoded.iterations(),
        decoded.key().len(),
        decoded.algorithm(),
    );

    candidate.as_slice() == decoded.key()
}
