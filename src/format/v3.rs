//! Format V3.
//!
//! ```text
//! MARKER 0x01 (1) | PRF (4) | ITERATIONS (4) | SALT_LEN (4) | SALT (SALT_LEN) | KEY (rest)
//! ```
//!
//! Integer fields are big-endian. PRF is 0 for SHA1, 1 for SHA256 and 2 for
//! SHA512.

use super::{DecodedHash, VER_LEN, Version};
use crate::crypto::{Algorithm, MIN_KEY_LEN, MIN_SALT_LEN};
use crate::HashError;

pub const MARKER: u8 = 0x01;

const PRF_LEN: usize = 4;
const ITER_LEN: usize = 4;
const SALT_LEN_LEN: usize = 4;

/// Length of the fixed header preceding the salt.
pub const PREAMBLE_LEN: usize = VER_LEN + PRF_LEN + ITER_LEN + SALT_LEN_LEN;

/// Builds the 13-byte header for the given parameters.
pub fn preamble(algorithm: Algorithm, iterations: u32, salt_len: u32) -> [u8; PREAMBLE_LEN] {
    let mut buf = [0u8; PREAMBLE_LEN];
    buf[0] = MARKER;

    let mut offset = VER_LEN;
    buf[offset..offset + PRF_LEN].copy_from_slice(&algorithm.selector().to_be_bytes());
    offset += PRF_LEN;

    buf[offset..offset + ITER_LEN].copy_from_slice(&iterations.to_be_bytes());
    offset += ITER_LEN;

    buf[offset..offset + SALT_LEN_LEN].copy_from_slice(&salt_len.to_be_bytes());

    buf
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    let mut field = [0u8; 4];
    field.copy_from_slice(&data[offset..offset + 4]);
    u32::from_be_bytes(field)
}

/// Parses a V3 blob.
///
/// # Errors
///
/// Returns, in field order, the first of:
/// - `BadSize` if the blob is shorter than the preamble
/// - `BadAlgorithm` for an unknown PRF selector
/// - `BadIteration` for a zero iteration count
/// - `BadSaltLen` for a salt under 16 bytes
/// - `BadKeyLen` if fewer than 32 bytes remain after the salt
pub fn parse(data: &[u8]) -> Result<DecodedHash, HashError> {
    if data.len() < PREAMBLE_LEN {
        return Err(HashError::BadSize);
    }

    let mut offset = VER_LEN;
    let algorithm = Algorithm::try_from(read_u32(data, offset))?;
    offset += PRF_LEN;

    let iterations = read_u32(data, offset);
    if iterations < 1 {
        return Err(HashError::BadIteration);
    }
    offset += ITER_LEN;

    let salt_len = usize::try_from(read_u32(data, offset)).map_err(|_| HashError::BadSaltLen)?;
    if salt_len < MIN_SALT_LEN {
        return Err(HashError::BadSaltLen);
    }
    offset += SALT_LEN_LEN;

    let key_len = (data.len() - offset).saturating_sub(salt_len);
    if key_len < MIN_KEY_LEN {
        return Err(HashError::BadKeyLen);
    }

    let salt = data[offset..offset + salt_len].to_vec();
    offset += salt_len;

    let key = data[offset..].to_vec();

    Ok(DecodedHash::new(
        Version::V3,
        algorithm,
        iterations,
        salt,
        key,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob(selector: u32, iterations: u32, salt_len: u32, salt: usize, key: usize) -> Vec<u8> {
        let mut data = vec![MARKER];
        data.extend_from_slice(&selector.to_be_bytes());
        data.extend_from_slice(&iterations.to_be_bytes());
        data.extend_from_slice(&salt_len.to_be_bytes());
        data.extend(std::iter::repeat_n(0xAA, salt));
        data.extend(std::iter::repeat_n(0xBB, key));
        data
    }

    #[test]
    fn preamble_layout() {
        let pre = preamble(Algorithm::Sha256, 10_000, 16);
        assert_eq!(
            pre,
            [0x01, 0, 0, 0, 1, 0, 0, 0x27, 0x10, 0, 0, 0, 0x10]
        );
    }

    #[test]
    fn parse_reads_parameters() {
        let decoded = parse(&blob(2, 5000, 24, 24, 64)).unwrap();

        assert_eq!(decoded.version(), Version::V3);
        assert_eq!(decoded.algorithm(), Algorithm::Sha512);
        assert_eq!(decoded.iterations(), 5000);
        assert_eq!(decoded.salt(), vec![0xAA; 24].as_slice());
        assert_eq!(decoded.key(), vec![0xBB; 64].as_slice());
    }

    #[test]
    fn preamble_parses_back() {
        let mut data = preamble(Algorithm::Sha1, 7, 16).to_vec();
        data.extend_from_slice(&[0u8; 16 + 32]);

        let decoded = parse(&data).unwrap();
        assert_eq!(decoded.algorithm(), Algorithm::Sha1);
        assert_eq!(decoded.iterations(), 7);
    }

    #[test]
    fn truncated_preamble_fails() {
        let data = blob(1, 1, 16, 16, 32);
        assert!(matches!(
            parse(&data[..PREAMBLE_LEN - 1]),
            Err(HashError::BadSize)
        ));
    }

    #[test]
    fn unknown_algorithm_fails() {
        assert!(matches!(
            parse(&blob(3, 1, 16, 16, 32)),
            Err(HashError::BadAlgorithm)
        ));
    }

    #[test]
    fn zero_iterations_fails() {
        assert!(matches!(
            parse(&blob(1, 0, 16, 16, 32)),
            Err(HashError::BadIteration)
        ));
    }

    #[test]
    fn salt_length_boundary() {
        assert!(matches!(
            parse(&blob(1, 1, 15, 15, 32)),
            Err(HashError::BadSaltLen)
        ));
        assert!(parse(&blob(1, 1, 16, 16, 32)).is_ok());
    }

    #[test]
    fn short_key_halts_parse() {
        assert!(matches!(
            parse(&blob(1, 1, 16, 16, 31)),
            Err(HashError::BadKeyLen)
        ));
    }

    #[test]
    fn salt_overrunning_blob_fails() {
        assert!(matches!(
            parse(&blob(1, 1, 1024, 16, 32)),
            Err(HashError::BadKeyLen)
        ));
        assert!(matches!(
            parse(&blob(1, 1, u32::MAX, 16, 32)),
            Err(HashError::BadKeyLen)
        ));
    }

    #[test]
    fn checks_run_in_field_order() {
        assert!(matches!(
            parse(&blob(9, 0, 0, 0, 0)),
            Err(HashError::BadAlgorithm)
        ));
        assert!(matches!(
            parse(&blob(0, 0, 0, 0, 0)),
            Err(HashError::BadIteration)
        ));
        assert!(matches!(
            parse(&blob(0, 1, 0, 0, 0)),
            Err(HashError::BadSaltLen)
        ));
    }
}
