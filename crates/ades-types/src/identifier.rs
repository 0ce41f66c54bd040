//! Stable token identifiers
//!
//! Identifiers are derived from the DER encoding of a token, so two tokens
//! with byte-identical encodings always share the same identifier.

use sha2::{Digest as _, Sha256};

/// A deterministic identifier for a token or signature.
///
/// Derived from the SHA-256 of the token's DER encoding (or of an ordered
/// list of identity parts for structures without a single encoding).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DssId([u8; 32]);

impl DssId {
    /// Derive an identifier from a DER encoding
    pub fn from_der(encoded: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(encoded);
        Self(hasher.finalize().into())
    }

    /// Derive an identifier from an ordered list of identity parts.
    ///
    /// Each part is length-prefixed so that distinct part lists never
    /// collide by concatenation.
    pub fn from_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// Get the raw identifier bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Get the identifier as a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for DssId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::fmt::Debug for DssId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DssId({})", &self.to_hex()[..16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_stability() {
        let a = DssId::from_der(b"identical bytes");
        let b = DssId::from_der(b"identical bytes");
        assert_eq!(a, b);

        let c = DssId::from_der(b"different bytes");
        assert_ne!(a, c);
    }

    #[test]
    fn test_parts_are_length_prefixed() {
        let a = DssId::from_parts(&[b"ab", b"c"]);
        let b = DssId::from_parts(&[b"a", b"bc"]);
        assert_ne!(a, b);
    }
}
