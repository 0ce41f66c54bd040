//! Revocation artifact sources
//!
//! The core does not interpret CRLs or OCSP responses; it collects the DER
//! artifacts embedded in containers so that external revocation checkers can
//! consume them. Artifacts deduplicate by the digest of their encoding.

use ades_types::{CertificateSourceType, DssId};
use std::collections::HashSet;

/// A DER-encoded CRL with a stable identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrlBinary {
    id: DssId,
    der: Vec<u8>,
}

impl CrlBinary {
    /// Wrap a DER-encoded CRL
    pub fn new(der: Vec<u8>) -> Self {
        Self {
            id: DssId::from_der(&der),
            der,
        }
    }

    /// Stable identifier of the artifact
    pub fn dss_id(&self) -> DssId {
        self.id
    }

    /// The DER encoding
    pub fn encoded(&self) -> &[u8] {
        &self.der
    }
}

/// A DER-encoded OCSP response with a stable identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcspResponseBinary {
    id: DssId,
    der: Vec<u8>,
}

impl OcspResponseBinary {
    /// Wrap a DER-encoded OCSP response
    pub fn new(der: Vec<u8>) -> Self {
        Self {
            id: DssId::from_der(&der),
            der,
        }
    }

    /// Stable identifier of the artifact
    pub fn dss_id(&self) -> DssId {
        self.id
    }

    /// The DER encoding
    pub fn encoded(&self) -> &[u8] {
        &self.der
    }
}

/// CRLs extracted from one container
pub struct CrlSource {
    source_type: CertificateSourceType,
    crls: Vec<CrlBinary>,
}

impl CrlSource {
    /// Create an empty source
    pub fn new(source_type: CertificateSourceType) -> Self {
        Self {
            source_type,
            crls: Vec::new(),
        }
    }

    /// The kind of container this source was extracted from
    pub fn source_type(&self) -> CertificateSourceType {
        self.source_type
    }

    /// Add a CRL, deduplicating by identity
    pub fn add_crl(&mut self, der: Vec<u8>) {
        let artifact = CrlBinary::new(der);
        if !self.crls.iter().any(|c| c.dss_id() == artifact.dss_id()) {
            self.crls.push(artifact);
        }
    }

    /// The collected CRLs
    pub fn crls(&self) -> &[CrlBinary] {
        &self.crls
    }

    /// True when no CRL was extracted
    pub fn is_empty(&self) -> bool {
        self.crls.is_empty()
    }
}

/// OCSP responses extracted from one container
pub struct OcspSource {
    source_type: CertificateSourceType,
    responses: Vec<OcspResponseBinary>,
}

impl OcspSource {
    /// Create an empty source
    pub fn new(source_type: CertificateSourceType) -> Self {
        Self {
            source_type,
            responses: Vec::new(),
        }
    }

    /// The kind of container this source was extracted from
    pub fn source_type(&self) -> CertificateSourceType {
        self.source_type
    }

    /// Add an OCSP response, deduplicating by identity
    pub fn add_ocsp_response(&mut self, der: Vec<u8>) {
        let artifact = OcspResponseBinary::new(der);
        if !self
            .responses
            .iter()
            .any(|r| r.dss_id() == artifact.dss_id())
        {
            self.responses.push(artifact);
        }
    }

    /// The collected responses
    pub fn ocsp_responses(&self) -> &[OcspResponseBinary] {
        &self.responses
    }

    /// True when no response was extracted
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

/// Merged CRL view across a signature and its timestamps
#[derive(Default)]
pub struct ListCrlSource {
    crls: Vec<CrlBinary>,
    seen: HashSet<DssId>,
    num_sources: usize,
}

impl ListCrlSource {
    /// Create an empty merged view
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge in one source
    pub fn add_source(&mut self, source: &CrlSource) {
        self.num_sources += 1;
        for crl in source.crls() {
            if self.seen.insert(crl.dss_id()) {
                self.crls.push(crl.clone());
            }
        }
    }

    /// Every distinct CRL across the merged sources
    pub fn all_crls(&self) -> &[CrlBinary] {
        &self.crls
    }

    /// Number of merged sources
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }
}

/// Merged OCSP view across a signature and its timestamps
#[derive(Default)]
pub struct ListOcspSource {
    responses: Vec<OcspResponseBinary>,
    seen: HashSet<DssId>,
    num_sources: usize,
}

impl ListOcspSource {
    /// Create an empty merged view
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge in one source
    pub fn add_source(&mut self, source: &OcspSource) {
        self.num_sources += 1;
        for response in source.ocsp_responses() {
            if self.seen.insert(response.dss_id()) {
                self.responses.push(response.clone());
            }
        }
    }

    /// Every distinct response across the merged sources
    pub fn all_ocsp_responses(&self) -> &[OcspResponseBinary] {
        &self.responses
    }

    /// Number of merged sources
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crl_source_dedup() {
        let mut source = CrlSource::new(CertificateSourceType::Signature);
        source.add_crl(vec![1, 2, 3]);
        source.add_crl(vec![1, 2, 3]);
        source.add_crl(vec![4, 5, 6]);
        assert_eq!(source.crls().len(), 2);
    }

    #[test]
    fn test_merged_view_collapses_duplicates() {
        let mut a = CrlSource::new(CertificateSourceType::Signature);
        a.add_crl(vec![1, 2, 3]);
        let mut b = CrlSource::new(CertificateSourceType::Timestamp);
        b.add_crl(vec![1, 2, 3]);
        b.add_crl(vec![9]);

        let mut merged = ListCrlSource::new();
        merged.add_source(&a);
        merged.add_source(&b);
        assert_eq!(merged.all_crls().len(), 2);
        assert_eq!(merged.num_sources(), 2);
    }
}
