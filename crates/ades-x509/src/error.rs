//! Error types for ades-x509

use thiserror::Error;

/// Errors that can occur handling certificates and sources
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed DER input
    #[error("failed to parse certificate: {0}")]
    Parse(String),

    /// Re-encoding a parsed structure failed
    #[error("failed to encode structure: {0}")]
    Encoding(String),

    /// Crypto backend fault
    #[error(transparent)]
    Crypto(#[from] ades_crypto::Error),
}

/// Result type for certificate operations
pub type Result<T> = std::result::Result<T, Error>;
