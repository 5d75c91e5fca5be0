//! Cryptographic primitives for the hasher.
//!
//! Provides the PRF selection, PBKDF2 key derivation, hasher parameters and
//! salt generation.

pub mod kdf;
pub mod salt;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::HashError;

pub use kdf::{HasherConfig, derive_key};
pub use salt::{OsSaltGenerator, SaltGenerator};

/// Minimum salt length accepted by V3 (16 bytes / 128 bits).
pub const MIN_SALT_LEN: usize = 128 / 8;
/// Minimum key length accepted by V3 (32 bytes / 256 bits).
pub const MIN_KEY_LEN: usize = 256 / 8;

/// HMAC PRF used by PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Selector stored in the V3 preamble.
    pub fn selector(self) -> u32 {
        match self {
            Algorithm::Sha1 => 0,
            Algorithm::Sha256 => 1,
            Algorithm::Sha512 => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = HashError;

    fn try_from(selector: u32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Algorithm::Sha1),
            1 => Ok(Algorithm::Sha256),
            2 => Ok(Algorithm::Sha512),
            _ => Err(HashError::BadAlgorithm),
        }
    }
}

impl FromStr for Algorithm {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Algorithm::Sha1),
            "sha256" => Ok(Algorithm::Sha256),
            "sha512" => Ok(Algorithm::Sha512),
            _ => Err(HashError::BadAlgorithm),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
