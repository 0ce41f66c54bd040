//! Validation context sink

use ades_tsp::TimestampToken;
use ades_types::DssId;
use ades_x509::{CertificateToken, CrlBinary, OcspResponseBinary, Token};
use std::sync::Arc;

/// Sink for tokens discovered during validation.
///
/// A signature pushes its timestamps and their embedded material here so the
/// context's certificate-chain builder can process them; the core never
/// reads anything back.
pub trait ValidationContext {
    /// Register a certificate discovered during validation
    fn add_certificate_token(&mut self, certificate: &Arc<CertificateToken>);

    /// Register a timestamp discovered during validation
    fn add_timestamp_token(&mut self, timestamp: &TimestampToken);

    /// Register a CRL discovered during validation
    fn add_crl(&mut self, crl: &CrlBinary);

    /// Register an OCSP response discovered during validation
    fn add_ocsp_response(&mut self, response: &OcspResponseBinary);
}

/// A context that records the identifiers of everything pushed into it
#[derive(Debug, Default)]
pub struct CollectingValidationContext {
    /// Identifiers of the registered certificates
    pub certificates: Vec<DssId>,
    /// Identifiers of the registered timestamps
    pub timestamps: Vec<DssId>,
    /// Identifiers of the registered CRLs
    pub crls: Vec<DssId>,
    /// Identifiers of the registered OCSP responses
    pub ocsp_responses: Vec<DssId>,
}

impl CollectingValidationContext {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidationContext for CollectingValidationContext {
    fn add_certificate_token(&mut self, certificate: &Arc<CertificateToken>) {
        self.certificates.push(certificate.dss_id());
    }

    fn add_timestamp_token(&mut self, timestamp: &TimestampToken) {
        self.timestamps.push(timestamp.dss_id());
    }

    fn add_crl(&mut self, crl: &CrlBinary) {
        self.crls.push(crl.dss_id());
    }

    fn add_ocsp_response(&mut self, response: &OcspResponseBinary) {
        self.ocsp_responses.push(response.dss_id());
    }
}
