//! Core types and data structures for AdES signature validation
//!
//! This crate provides the fundamental value types shared by every layer of
//! the validation core: algorithm enumerations with their OIDs, digests,
//! stable token identifiers, signature forms and levels, timestamp
//! classification enums and the in-memory document model.

pub mod algorithms;
pub mod digest;
pub mod document;
pub mod enums;
pub mod identifier;
pub mod reference;
pub mod scope;

pub use algorithms::{
    DigestAlgorithm, EncryptionAlgorithm, MaskGenerationFunction, SignatureAlgorithm,
    UnknownOidError,
};
pub use digest::Digest;
pub use document::{DocumentContent, ManifestFile, PdfRevision, SignedDocument};
pub use enums::{
    ArchiveTimestampType, CertificateSourceType, SignatureForm, SignatureLevel, SignatureValidity,
    TimestampLocation, TimestampType,
};
pub use identifier::DssId;
pub use reference::{TimestampedObjectType, TimestampedReference};
pub use scope::{SignatureScope, SignatureScopeType};
