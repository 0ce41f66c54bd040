//! Signature scope descriptors

/// How much of an object a signature covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScopeType {
    /// The whole object is covered
    Full,
    /// Only a part of the object is covered
    Partial,
    /// Only a digest of the object was signed
    DigestOnly,
}

/// Describes what a signature (or detached timestamp) actually covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureScope {
    /// Name of the covered object (document name, element id, byte range)
    pub name: String,
    /// Human readable description of the coverage
    pub description: String,
    /// Coverage kind
    pub scope_type: SignatureScopeType,
}

impl SignatureScope {
    /// Create a new scope entry
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        scope_type: SignatureScopeType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            scope_type,
        }
    }
}
