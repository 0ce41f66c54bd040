//! Error types for ades-crypto

use thiserror::Error;

/// Errors that can occur in the cryptographic backend.
///
/// These are environmental faults, not evidential outcomes: a signature that
/// simply does not verify is reported as `Verification`, which callers
/// record on the token instead of propagating.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend has no implementation for the requested algorithm
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The public key could not be used
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The signature did not verify
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// ASN.1 encoding/decoding error
    #[error("ASN.1 error: {0}")]
    Asn1(String),
}

/// Result type for crypto operations
pub type Result<T> = std::result::Result<T, Error>;
