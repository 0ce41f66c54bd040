//! Error types for ades-validation

use thiserror::Error;

/// Errors that can occur driving a signature through validation
#[derive(Error, Debug)]
pub enum Error {
    /// A method was called out of order
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Linking a counter-signature would create a cycle
    #[error("counter-signature linking would create a cycle")]
    CounterSignatureCycle,

    /// Crypto backend fault, propagated unchanged
    #[error(transparent)]
    Crypto(#[from] ades_crypto::Error),

    /// Timestamp subsystem fault
    #[error(transparent)]
    Timestamp(#[from] ades_tsp::Error),
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, Error>;
