//! Error types for ades-tsp

use thiserror::Error;

/// Errors that can occur handling timestamp tokens
#[derive(Error, Debug)]
pub enum Error {
    /// The bytes are not a well-formed CMS carrying an RFC 3161 token.
    /// Terminal for the construction; the token is not created.
    #[error("failed to parse timestamp token: {0}")]
    Parse(String),

    /// The CMS does not encapsulate a TSTInfo
    #[error("no TSTInfo in timestamp token")]
    NoTstInfo,

    /// Crypto backend fault, propagated unchanged
    #[error(transparent)]
    Crypto(#[from] ades_crypto::Error),

    /// A method was called out of order. Never confused with evidential
    /// failure.
    #[error("illegal state: {0}")]
    IllegalState(String),
}

/// Result type for timestamp operations
pub type Result<T> = std::result::Result<T, Error>;
