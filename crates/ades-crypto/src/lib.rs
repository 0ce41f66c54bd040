//! Digest engine and signature verification backend for AdES validation
//!
//! The digest engine covers every algorithm OID the data formats may carry,
//! including the legacy ones; signature verification is delegated to
//! aws-lc-rs through an explicit [`VerificationKey`] handle, so sessions can
//! carry different backends without any process-wide provider state.

pub mod digest;
pub mod error;
pub mod pss;
pub mod verify;

pub use digest::{digest, digest_document, StreamingDigest};
pub use error::{Error, Result};
pub use pss::{decode_pss_parameters, RsaSsaPssParams};
pub use verify::VerificationKey;
