//! Signing-certificate candidates and their election

use ades_types::DssId;
use ades_x509::{CertificateToken, Token};
use std::sync::Arc;

/// How a candidate was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    /// Supplied by the caller for signatures missing the certificate
    Provided,
    /// Referenced by a signed property (XAdES SigningCertificate, CAdES
    /// ESSCertIDv2)
    SigningCertificateAttribute,
    /// Present in the container's certificate bag without a signed reference
    CertificateSource,
}

/// One signing-certificate candidate with the attestation of how it was
/// derived and the bookkeeping filled in during the integrity check
#[derive(Debug, Clone)]
pub struct CertificateValidity {
    /// The referenced certificate, when it could be resolved
    pub certificate: Option<Arc<CertificateToken>>,
    /// How the candidate was derived
    pub origin: CandidateOrigin,
    /// A signed digest reference exists for this candidate
    pub digest_present: bool,
    /// The signed digest matches the resolved certificate
    pub digest_equal: bool,
    /// The reference carries issuer and serial
    pub issuer_serial_present: bool,
    /// Issuer and serial match the resolved certificate
    pub issuer_serial_equal: bool,
    /// The signature value verified with this candidate
    pub valid: bool,
}

impl CertificateValidity {
    /// Candidate supplied by the caller
    pub fn provided(certificate: Arc<CertificateToken>) -> Self {
        Self {
            certificate: Some(certificate),
            origin: CandidateOrigin::Provided,
            digest_present: false,
            digest_equal: false,
            issuer_serial_present: false,
            issuer_serial_equal: false,
            valid: false,
        }
    }

    /// Candidate found in the container's certificate bag
    pub fn from_source(certificate: Arc<CertificateToken>) -> Self {
        Self {
            certificate: Some(certificate),
            origin: CandidateOrigin::CertificateSource,
            digest_present: false,
            digest_equal: false,
            issuer_serial_present: false,
            issuer_serial_equal: false,
            valid: false,
        }
    }
}

/// Ordered candidate list; exactly zero or one candidate ends up elected.
///
/// Never null once resolved: a signature without any resolvable candidate
/// yields an empty list, not an absent one.
#[derive(Debug, Clone, Default)]
pub struct CandidatesForSigningCertificate {
    candidates: Vec<CertificateValidity>,
    elected: Option<usize>,
}

impl CandidatesForSigningCertificate {
    /// Create an empty candidate list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate
    pub fn add(&mut self, candidate: CertificateValidity) {
        self.candidates.push(candidate);
    }

    /// The candidates, in resolution order
    pub fn candidates(&self) -> &[CertificateValidity] {
        &self.candidates
    }

    /// Mutable access for the integrity check
    pub fn candidates_mut(&mut self) -> &mut [CertificateValidity] {
        &mut self.candidates
    }

    /// True when no candidate could be resolved
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// True when some candidate references the given certificate
    pub fn contains_certificate(&self, id: DssId) -> bool {
        self.candidates
            .iter()
            .any(|c| c.certificate.as_ref().is_some_and(|cert| cert.dss_id() == id))
    }

    /// Mark the candidate at `index` as elected
    pub fn elect(&mut self, index: usize) {
        debug_assert!(index < self.candidates.len());
        self.elected = Some(index);
    }

    /// The elected candidate, if any
    pub fn elected_candidate(&self) -> Option<&CertificateValidity> {
        self.elected.and_then(|i| self.candidates.get(i))
    }

    /// The elected certificate, if any
    pub fn elected_certificate(&self) -> Option<Arc<CertificateToken>> {
        self.elected_candidate()
            .and_then(|c| c.certificate.clone())
    }
}
