//! Certificate sources and merged views

use crate::certificate::CertificateToken;
use crate::pool::CertificatePool;
use crate::token::Token;
use ades_types::{CertificateSourceType, Digest, DigestAlgorithm, DssId};
use cms::signed_data::SignerIdentifier;
use std::collections::HashSet;
use std::sync::Arc;

/// Where a certificate reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRefOrigin {
    /// XAdES SigningCertificate / CAdES ESS signing-certificate attribute
    SigningCertificateAttribute,
    /// XAdES KeyInfo / CMS certificates bag
    KeyInfo,
    /// XAdES CompleteCertificateRefs unsigned property
    CompleteCertificateRefs,
}

/// Issuer and serial as recorded in a reference or signer info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSerialInfo {
    /// Issuer distinguished name (RFC 4514 form)
    pub issuer_name: String,
    /// Serial number bytes, big endian
    pub serial_number: Vec<u8>,
}

/// A reference to a certificate by digest, as carried in signed or unsigned
/// properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRef {
    /// Digest of the referenced certificate's DER encoding
    pub certificate_digest: Digest,
    /// Issuer and serial, when the reference carries them
    pub issuer_serial: Option<IssuerSerialInfo>,
    /// Where the reference was found
    pub origin: CertificateRefOrigin,
}

/// The set of certificates extracted from one container, registered in the
/// shared pool and tagged with their source type
pub struct CertificateSource {
    source_type: CertificateSourceType,
    pool: Arc<CertificatePool>,
    certificates: Vec<Arc<CertificateToken>>,
    refs: Vec<CertificateRef>,
}

impl CertificateSource {
    /// Create an empty source backed by the given pool
    pub fn new(source_type: CertificateSourceType, pool: Arc<CertificatePool>) -> Self {
        Self {
            source_type,
            pool,
            certificates: Vec::new(),
            refs: Vec::new(),
        }
    }

    /// The kind of container this source was extracted from
    pub fn source_type(&self) -> CertificateSourceType {
        self.source_type
    }

    /// The pool this source registers into
    pub fn pool(&self) -> &Arc<CertificatePool> {
        &self.pool
    }

    /// Register a certificate, deduplicating through the pool and within
    /// this source
    pub fn add_certificate(&mut self, token: CertificateToken) -> Arc<CertificateToken> {
        let canonical = self.pool.add(token, self.source_type);
        if !self
            .certificates
            .iter()
            .any(|c| c.dss_id() == canonical.dss_id())
        {
            self.certificates.push(Arc::clone(&canonical));
        }
        canonical
    }

    /// Record a certificate reference found in the container
    pub fn add_certificate_ref(&mut self, reference: CertificateRef) {
        self.refs.push(reference);
    }

    /// Certificates in this source
    pub fn certificates(&self) -> &[Arc<CertificateToken>] {
        &self.certificates
    }

    /// Certificate references in this source
    pub fn certificate_refs(&self) -> &[CertificateRef] {
        &self.refs
    }

    /// Find a certificate whose DER digest matches
    pub fn find_by_digest(
        &self,
        algorithm: DigestAlgorithm,
        digest: &[u8],
    ) -> Option<Arc<CertificateToken>> {
        self.certificates
            .iter()
            .find(|c| c.digest(algorithm) == digest)
            .cloned()
    }

    /// Find the certificate matching a CMS SignerIdentifier
    pub fn find_by_signer_identifier(
        &self,
        sid: &SignerIdentifier,
    ) -> Option<Arc<CertificateToken>> {
        self.certificates
            .iter()
            .find(|c| c.matches_signer_identifier(sid))
            .cloned()
    }

    /// Number of distinct certificates
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True when no certificate was extracted
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}

/// Merged view over the certificate sources of a signature and all its
/// nested timestamps; duplicates collapse by certificate identity
#[derive(Default)]
pub struct ListCertificateSource {
    certificates: Vec<Arc<CertificateToken>>,
    seen: HashSet<DssId>,
    num_sources: usize,
}

impl ListCertificateSource {
    /// Create an empty merged view
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge in one source
    pub fn add_source(&mut self, source: &CertificateSource) {
        self.num_sources += 1;
        for certificate in source.certificates() {
            if self.seen.insert(certificate.dss_id()) {
                self.certificates.push(Arc::clone(certificate));
            }
        }
    }

    /// Every distinct certificate across the merged sources
    pub fn all_certificates(&self) -> &[Arc<CertificateToken>] {
        &self.certificates
    }

    /// True when the view contains the given certificate
    pub fn contains(&self, id: &DssId) -> bool {
        self.seen.contains(id)
    }

    /// Number of merged sources
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Number of distinct certificates
    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    /// True when no source contributed a certificate
    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }
}
