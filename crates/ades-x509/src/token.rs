//! The uniform token contract
//!
//! Every cryptographic token (certificate, timestamp) exposes a stable
//! identifier derived from its DER encoding and a signer-verification
//! protocol whose outcome is recorded on the token rather than returned as
//! an error.

use crate::certificate::CertificateToken;
use ades_types::{DssId, SignatureAlgorithm, SignatureValidity};
use chrono::{DateTime, Utc};

/// Verification state recorded on a token by `check_is_signed_by`
#[derive(Debug, Clone, Default)]
pub struct TokenStatus {
    /// Three-state verification outcome
    pub validity: SignatureValidity,
    /// Short reason recorded when the outcome is `Invalid`
    pub invalidity_reason: String,
    /// The concrete algorithm, resolved on a successful check
    pub signature_algorithm: Option<SignatureAlgorithm>,
    /// Distinguished name of the signer, set only on `Valid`
    pub signer_dn: Option<String>,
}

/// Abstract cryptographic token.
///
/// `check_is_signed_by` is the subclass hook: it records the outcome, the
/// signer DN and the resolved algorithm on the token. Evidential failures
/// (the signature simply does not verify) are recorded, never returned; a
/// crypto backend that cannot even instantiate a verifier is an
/// environmental fault and surfaces as `Err`.
pub trait Token {
    /// Stable identifier derived from the DER encoding
    fn dss_id(&self) -> DssId;

    /// DER encoding of the whole token
    fn encoded(&self) -> &[u8];

    /// Issuer distinguished name.
    ///
    /// For signed tokens whose issuer is learned during verification (a
    /// timestamp's TSA), this is `None` until a successful check.
    fn issuer_dn(&self) -> Option<String>;

    /// Creation date carried by the token, if any
    fn creation_date(&self) -> Option<DateTime<Utc>>;

    /// Recorded verification state
    fn status(&self) -> &TokenStatus;

    /// Verify whether the candidate certificate signed this token,
    /// recording the outcome on the token
    fn check_is_signed_by(
        &mut self,
        candidate: &CertificateToken,
    ) -> ades_crypto::Result<SignatureValidity>;

    /// Three-state verification outcome
    fn signature_validity(&self) -> SignatureValidity {
        self.status().validity
    }

    /// Reason recorded for an `Invalid` outcome
    fn signature_invalidity_reason(&self) -> &str {
        &self.status().invalidity_reason
    }

    /// The algorithm resolved on a successful check
    fn signature_algorithm(&self) -> Option<SignatureAlgorithm> {
        self.status().signature_algorithm
    }

    /// Idempotent wrapper around `check_is_signed_by`: once a token has been
    /// verified `Valid`, further calls return without re-running the check
    /// or mutating the recorded state.
    fn is_signed_by(&mut self, candidate: &CertificateToken) -> ades_crypto::Result<bool> {
        if self.signature_validity() == SignatureValidity::Valid {
            return Ok(true);
        }
        Ok(self.check_is_signed_by(candidate)? == SignatureValidity::Valid)
    }

    /// True when the recorded outcome is `Valid`.
    ///
    /// Returns false both for `Invalid` and for a check that never ran; use
    /// `signature_validity` to distinguish.
    fn is_signature_valid(&self) -> bool {
        self.signature_validity() == SignatureValidity::Valid
    }
}
