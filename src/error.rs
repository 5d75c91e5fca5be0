//! Error types for decoding, verifying and configuring hashes.

use thiserror::Error;

/// Errors raised while decoding a stored hash or validating hasher parameters.
#[derive(Debug, Error)]
pub enum HashError {
    /// The stored hash is not valid standard base64.
    #[error("invalid base64 encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The leading format marker is neither V2 (`0x00`) nor V3 (`0x01`).
    #[error("bad version")]
    BadVersion,

    /// The blob length does not fit the layout of its version.
    #[error("bad size")]
    BadSize,

    /// Unknown PRF selector or algorithm name.
    #[error("bad algorithm")]
    BadAlgorithm,

    #[error("bad iteration")]
    BadIteration,

    #[error("bad salt length")]
    BadSaltLen,

    #[error("bad key length")]
    BadKeyLen,
}

/// The OS random source could not produce a salt.
#[derive(Debug, Error)]
#[error("OS random generator unavailable: {0}")]
pub struct RandomUnavailable(pub(crate) getrandom::Error);
