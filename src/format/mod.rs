//! Wire format of stored password hashes.
//!
//! A stored hash is a standard base64 string whose first decoded byte selects
//! the layout. See [`v2`] and [`v3`] for the byte layouts.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::{Algorithm, HashError};

pub mod v2;
pub mod v3;

/// Length of the version marker.
pub const VER_LEN: usize = 1;

/// Format revision of a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Version {
    #[serde(rename = "2")]
    V2,
    #[serde(rename = "3")]
    V3,
}

impl Version {
    /// Leading byte of the blob.
    pub fn marker(self) -> u8 {
        match self {
            Version::V2 => v2::MARKER,
            Version::V3 => v3::MARKER,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V2 => f.write_str("2"),
            Version::V3 => f.write_str("3"),
        }
    }
}

/// The fields of a parsed hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHash {
    version: Version,
    algorithm: Algorithm,
    iterations: u32,
    salt: Vec<u8>,
    key: Vec<u8>,
}

impl DecodedHash {
    pub(crate) fn new(
        version: Version,
        algorithm: Algorithm,
        iterations: u32,
        salt: Vec<u8>,
        key: Vec<u8>,
    ) -> Self {
        Self {
            version,
            algorithm,
            iterations,
            salt,
            key,
        }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Returns the stored derived key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Serializes back into the wire string this hash was decoded from.
    pub fn encode(&self) -> String {
        match self.version {
            Version::V2 => encode(&v2::preamble(), &self.salt, &self.key),
            Version::V3 => {
                // salt lengths here came from a u32 field
                let salt_len = u32::try_from(self.salt.len()).unwrap_or(u32::MAX);
                let preamble = v3::preamble(self.algorithm, self.iterations, salt_len);
                encode(&preamble, &self.salt, &self.key)
            }
        }
    }
}

impl FromStr for DecodedHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl fmt::Display for DecodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Decodes a base64 hash string and parses its fields.
///
/// # Errors
///
/// Returns `InvalidEncoding` for malformed base64 and the first layout
/// violation otherwise.
pub fn decode(hash: &str) -> Result<DecodedHash, HashError> {
    let data = STANDARD.decode(hash)?;
    parse(&data)
}

/// Parses a raw blob, dispatching on its version marker.
pub fn parse(data: &[u8]) -> Result<DecodedHash, HashError> {
    let Some(&marker) = data.first() else {
        return Err(HashError::BadSize);
    };

    let decoded = match marker {
        v2::MARKER => v2::parse(data)?,
        v3::MARKER => v3::parse(data)?,
        _ => return Err(HashError::BadVersion),
    };

    log::debug!(
        "decoded v{} hash: algorithm={}, iterations={}, salt_len={}, key_len={}",
        decoded.version(),
        decoded.algorithm(),
        decoded.iterations(),
        decoded.salt().len(),
        decoded.key().len()
    );

    Ok(decoded)
}

/// Joins `preamble | salt | key` and encodes it as standard padded base64.
pub fn encode(preamble: &[u8], salt: &[u8], key: &[u8]) -> String {
    let mut buf = Vec::with_capacity(preamble.len() + salt.len() + key.len());

    buf.extend_from_slice(preamble);
    buf.extend_from_slice(salt);
    buf.extend_from_slice(key);

    STANDARD.encode(buf)
}
