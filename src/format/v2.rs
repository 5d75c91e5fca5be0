//! Format V2.
//!
//! ```text
//! MARKER 0x00 (1) | SALT (16) | KEY (32)
//! ```
//!
//! PBKDF2-HMAC-SHA1 with 1000 iterations; none of the parameters are stored.

use super::{DecodedHash, VER_LEN, Version};
use crate::HashError;
use crate::crypto::{HasherConfig, MIN_KEY_LEN, MIN_SALT_LEN};

pub const MARKER: u8 = 0x00;

const SALT_LEN: usize = MIN_SALT_LEN;
const KEY_LEN: usize = MIN_KEY_LEN;

/// Exact length of a V2 blob.
pub const BLOB_LEN: usize = VER_LEN + SALT_LEN + KEY_LEN;

pub fn preamble() -> [u8; VER_LEN] {
    [MARKER]
}

/// Parses a V2 blob.
///
/// # Errors
///
/// Returns `BadSize` unless the blob is exactly [`BLOB_LEN`] bytes.
pub fn parse(data: &[u8]) -> Result<DecodedHash, HashError> {
    if data.len() != BLOB_LEN {
        return Err(HashError::BadSize);
    }

    let params = HasherConfig::v2();
    let salt = data[VER_LEN..VER_LEN + SALT_LEN].to_vec();
    let key = data[VER_LEN + SALT_LEN..].to_vec();

    Ok(DecodedHash::new(
        Version::V2,
        params.algorithm(),
        params.iterations(),
        salt,
        key,
    ))
}
