use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use super::{Algorithm, MIN_KEY_LEN, MIN_SALT_LEN};
use crate::HashError;

/// PBKDF2 parameters used when producing new hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherConfig {
    iterations: u32,
    salt_len: usize,
    key_len: usize,
    algorithm: Algorithm,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            salt_len: 16,
            key_len: 32,
            algorithm: Algorithm::Sha256,
        }
    }
}

impl HasherConfig {
    /// Creates a validated V3 configuration.
    ///
    /// # Errors
    ///
    /// Checks run in order and the first failure is returned:
    /// - `BadIteration` if `iterations` is zero
    /// - `BadSaltLen` if `salt_len` is under 16 bytes or does not fit the preamble
    /// - `BadKeyLen` if `key_len` is under 32 bytes
    pub fn new(
        iterations: u32,
        salt_len: usize,
        key_len: usize,
        algorithm: Algorithm,
    ) -> Result<Self, HashError> {
        let config = Self {
            iterations,
            salt_len,
            key_len,
            algorithm,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fixed parameters of the V2 format.
    pub(crate) const fn v2() -> Self {
        Self {
            iterations: 1000,
            salt_len: MIN_SALT_LEN,
            key_len: MIN_KEY_LEN,
            algorithm: Algorithm::Sha1,
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.iterations < 1 {
            return Err(HashError::BadIteration);
        }
        if self.salt_len < MIN_SALT_LEN || u32::try_from(self.salt_len).is_err() {
            return Err(HashError::BadSaltLen);
        }
        if self.key_len < MIN_KEY_LEN {
            return Err(HashError::BadKeyLen);
        }
        Ok(())
    }
}

/// Derives `key_len` bytes from `password` with PBKDF2-HMAC over `algorithm`.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    key_len: usize,
    algorithm: Algorithm,
) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; key_len]);

    match algorithm {
        Algorithm::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, iterations, &mut key),
        Algorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut key),
        Algorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut key),
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = HasherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.iterations(), 10_000);
        assert_eq!(config.salt_len(), 16);
        assert_eq!(config.key_len(), 32);
        assert_eq!(config.algorithm(), Algorithm::Sha256);
    }

    #[test]
    fn config_rejects_zero_iterations() {
        assert!(matches!(
            HasherConfig::new(0, 16, 32, Algorithm::Sha256),
            Err(HashError::BadIteration)
        ));
    }

    #[test]
    fn config_rejects_short_salt() {
        assert!(matches!(
            HasherConfig::new(1, 15, 32, Algorithm::Sha256),
            Err(HashError::BadSaltLen)
        ));
        assert!(HasherConfig::new(1, 16, 32, Algorithm::Sha256).is_ok());
    }

    #[test]
    fn config_rejects_short_key() {
        assert!(matches!(
            HasherConfig::new(1, 16, 31, Algorithm::Sha512),
            Err(HashError::BadKeyLen)
        ));
    }

    #[test]
    fn config_checks_iterations_first() {
        assert!(matches!(
            HasherConfig::new(0, 0, 0, Algorithm::Sha1),
            Err(HashError::BadIteration)
        ));
        assert!(matches!(
            HasherConfig::new(1, 0, 0, Algorithm::Sha1),
            Err(HashError::BadSaltLen)
        ));
    }

    #[test]
    fn v2_parameters() {
        let v2 = HasherConfig::v2();
        assert_eq!(v2.iterations(), 1000);
        assert_eq!(v2.salt_len(), 16);
        assert_eq!(v2.key_len(), 32);
        assert_eq!(v2.algorithm(), Algorithm::Sha1);
    }

    #[test]
    fn kdf_is_deterministic() {
        let salt = [42u8; 16];

        let k1 = derive_key(b"password", &salt, 10, 32, Algorithm::Sha256);
        let k2 = derive_key(b"password", &salt, 10, 32, Algorithm::Sha256);

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), 32);
    }

    #[test]
    fn kdf_algorithm_affects_output() {
        let salt = [7u8; 16];

        let k1 = derive_key(b"pw", &salt, 10, 32, Algorithm::Sha1);
        let k2 = derive_key(b"pw", &salt, 10, 32, Algorithm::Sha256);
        let k3 = derive_key(b"pw", &salt, 10, 32, Algorithm::Sha512);

        assert_ne!(k1, k2);
        assert_ne!(k2, k3);
    }

    // RFC 6070, test case 1
    #[test]
    fn kdf_sha1_known_vector() {
        let key = derive_key(b"password", b"salt", 1, 20, Algorithm::Sha1);
        assert_eq!(
            key.as_slice(),
            [
                0x0c, 0x60, 0xc8, 0x0f, 0x96, 0x1f, 0x0e, 0x71, 0xf3, 0xa9, 0xb5, 0x24, 0xaf, 0x60,
                0x12, 0x06, 0x2f, 0xe0, 0x37, 0xa6,
            ]
        );
    }
}
