//! Signed and unsigned signature properties

use ades_types::Digest;

/// Whether a signer role was merely claimed or certified by an attribute
/// certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerRoleCategory {
    /// Claimed by the signer
    Claimed,
    /// Backed by an attribute certificate
    Certified,
}

/// A role the signer held when producing the signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerRole {
    /// Role text as carried by the signature
    pub role: String,
    /// Claimed or certified
    pub category: SignerRoleCategory,
}

impl SignerRole {
    /// Create a claimed role
    pub fn claimed(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            category: SignerRoleCategory::Claimed,
        }
    }

    /// Create a certified role
    pub fn certified(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            category: SignerRoleCategory::Certified,
        }
    }
}

/// A commitment the signer expressed over the signed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentTypeIndication {
    /// Commitment identifier (OID or URI)
    pub identifier: String,
    /// Optional description
    pub description: Option<String>,
    /// References to the covered documents, when the commitment is partial
    pub document_references: Vec<String>,
}

/// Claimed place of signature production
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureProductionPlace {
    /// City
    pub city: Option<String>,
    /// State or province
    pub state_or_province: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Country
    pub country_name: Option<String>,
}

/// A digest reference over the signature element itself (TS 119 442)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureDigestReference {
    /// Canonicalization applied before digesting, for XML signatures
    pub canonicalization_method: Option<String>,
    /// The digest over the (canonicalized) signature element
    pub digest: Digest,
}
