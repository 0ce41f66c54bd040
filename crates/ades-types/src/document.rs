//! In-memory document model
//!
//! Containers hand signed content to the core either as full bytes or, for
//! doc-hash-only validation, as a set of pre-computed digests.

use crate::algorithms::DigestAlgorithm;
use crate::digest::Digest;

/// Content of a signed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentContent {
    /// The full document bytes are available
    Bytes(Vec<u8>),
    /// Only pre-computed digests are available (doc-hash-only validation)
    Digests(Vec<Digest>),
}

/// A document handed to the validation core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedDocument {
    name: Option<String>,
    content: DocumentContent,
}

impl SignedDocument {
    /// Create a document from full bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            content: DocumentContent::Bytes(bytes.into()),
        }
    }

    /// Create a named document from full bytes
    pub fn with_name(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: Some(name.into()),
            content: DocumentContent::Bytes(bytes.into()),
        }
    }

    /// Create a digest-only document
    pub fn digest_only(name: Option<String>, digests: Vec<Digest>) -> Self {
        Self {
            name,
            content: DocumentContent::Digests(digests),
        }
    }

    /// The document name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The full bytes, if available
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.content {
            DocumentContent::Bytes(bytes) => Some(bytes),
            DocumentContent::Digests(_) => None,
        }
    }

    /// A pre-computed digest for the given algorithm, if this is a
    /// digest-only document carrying one
    pub fn known_digest(&self, algorithm: DigestAlgorithm) -> Option<&Digest> {
        match &self.content {
            DocumentContent::Bytes(_) => None,
            DocumentContent::Digests(digests) => {
                digests.iter().find(|d| d.algorithm == algorithm)
            }
        }
    }

    /// True when only digests are available
    pub fn is_digest_only(&self) -> bool {
        matches!(self.content, DocumentContent::Digests(_))
    }
}

/// An ASiC-E manifest file and the entries it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFile {
    /// Name of the manifest file inside the container
    pub filename: String,
    /// Name of the signature (or timestamp) file the manifest belongs to
    pub signature_filename: String,
    /// Names of the container entries the manifest covers
    pub entries: Vec<String>,
}

/// A PDF revision carrying a signature or document timestamp.
///
/// Produced by the external PDF parser; the core only reads the embedded CMS
/// and the revision metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfRevision {
    /// One-based revision number within the document
    pub revision_number: u32,
    /// The /ByteRange of the signature dictionary
    pub byte_range: Vec<i64>,
    /// Names of the signature fields bound to this revision
    pub field_names: Vec<String>,
    /// DER-encoded CMS extracted from /Contents
    pub cms_bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_only_lookup() {
        let digest = Digest::new(DigestAlgorithm::Sha256, vec![1, 2, 3]);
        let doc = SignedDocument::digest_only(Some("doc.bin".into()), vec![digest.clone()]);

        assert!(doc.is_digest_only());
        assert!(doc.bytes().is_none());
        assert_eq!(doc.known_digest(DigestAlgorithm::Sha256), Some(&digest));
        assert!(doc.known_digest(DigestAlgorithm::Sha512).is_none());
    }

    #[test]
    fn test_full_document() {
        let doc = SignedDocument::with_name("a.txt", b"hello".to_vec());
        assert_eq!(doc.name(), Some("a.txt"));
        assert_eq!(doc.bytes(), Some(b"hello".as_slice()));
        assert!(!doc.is_digest_only());
    }
}
