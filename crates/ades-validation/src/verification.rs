//! Integrity-check evidence records

use ades_types::{Digest, DigestAlgorithm};
use ades_x509::CertificateToken;
use std::sync::Arc;

/// Kind of signed reference being validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceType {
    /// An XML-DSig ds:Reference
    XmlReference,
    /// The XAdES SignedProperties reference
    SignedProperties,
    /// A manifest reference
    Manifest,
    /// The single CAdES message-imprint (message-digest attribute)
    MessageImprint,
}

/// Parser-supplied input for one reference check.
///
/// When `data` is absent the referenced content is resolved against the
/// signature's detached contents by name.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Kind of reference
    pub ref_type: ReferenceType,
    /// Reference name or URI
    pub name: Option<String>,
    /// Digest algorithm of the signed reference
    pub digest_algorithm: DigestAlgorithm,
    /// Digest value the signature committed to
    pub expected_digest: Vec<u8>,
    /// Referenced bytes, already resolved by the parser
    pub data: Option<Vec<u8>>,
}

/// Outcome of one reference check
#[derive(Debug, Clone)]
pub struct ReferenceValidation {
    /// Kind of reference
    pub ref_type: ReferenceType,
    /// Reference name or URI
    pub name: Option<String>,
    /// The digest the signature committed to
    pub digest: Option<Digest>,
    /// Whether the referenced data could be resolved
    pub found: bool,
    /// Whether the recomputed digest matches
    pub intact: bool,
}

/// Evidence collected by `check_signature_integrity`.
///
/// Missing detached content and failed verification are recorded here, never
/// raised as errors; only backend faults interrupt the check.
#[derive(Debug, Clone, Default)]
pub struct SignatureCryptographicVerification {
    /// True when the signature value verified against the elected candidate
    /// and every reference was intact
    pub signature_intact: bool,
    /// True when every signed reference resolved and matched
    pub references_valid: bool,
    /// Descriptive error when something failed, empty otherwise
    pub error_message: String,
    /// The certificate the signature verified with
    pub signing_certificate: Option<Arc<CertificateToken>>,
}
