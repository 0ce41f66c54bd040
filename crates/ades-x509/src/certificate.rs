//! X.509 certificate token

use crate::error::{Error, Result};
use crate::token::{Token, TokenStatus};
use ades_crypto::VerificationKey;
use ades_types::{
    DigestAlgorithm, DssId, EncryptionAlgorithm, SignatureAlgorithm, SignatureValidity,
};
use chrono::{DateTime, Utc};
use cms::signed_data::SignerIdentifier;
use const_oid::db::rfc5280::{ID_CE_EXT_KEY_USAGE, ID_CE_SUBJECT_KEY_IDENTIFIER};
use const_oid::db::rfc5912::{
    ECDSA_WITH_SHA_256, ECDSA_WITH_SHA_384, ECDSA_WITH_SHA_512, ID_RSASSA_PSS,
    SHA_1_WITH_RSA_ENCRYPTION, SHA_256_WITH_RSA_ENCRYPTION, SHA_384_WITH_RSA_ENCRYPTION,
    SHA_512_WITH_RSA_ENCRYPTION,
};
use const_oid::ObjectIdentifier;
use der::{Decode, Encode};
use x509_cert::ext::pkix::{ExtendedKeyUsage, SubjectKeyIdentifier};
use x509_cert::name::Name;
use x509_cert::serial_number::SerialNumber;
use x509_cert::Certificate;

/// A parsed X.509 certificate with a stable identity.
///
/// Instances are deduplicated through the `CertificatePool` and shared
/// between sources by reference; the pool keys them by [`DssId`].
#[derive(Debug, Clone)]
pub struct CertificateToken {
    der: Vec<u8>,
    certificate: Certificate,
    id: DssId,
    status: TokenStatus,
}

impl CertificateToken {
    /// Parse a certificate from its DER encoding
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let certificate =
            Certificate::from_der(der).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self {
            der: der.to_vec(),
            certificate,
            id: DssId::from_der(der),
            status: TokenStatus::default(),
        })
    }

    /// The parsed certificate structure
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Subject distinguished name (RFC 4514 form)
    pub fn subject_dn(&self) -> String {
        self.certificate.tbs_certificate.subject.to_string()
    }

    /// Serial number
    pub fn serial_number(&self) -> &SerialNumber {
        &self.certificate.tbs_certificate.serial_number
    }

    /// DER-encoded SubjectPublicKeyInfo
    pub fn spki_der(&self) -> Result<Vec<u8>> {
        self.certificate
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| Error::Encoding(e.to_string()))
    }

    /// Public key algorithm derived from the SPKI OID
    pub fn public_key_algorithm(&self) -> Result<EncryptionAlgorithm> {
        let oid = self
            .certificate
            .tbs_certificate
            .subject_public_key_info
            .algorithm
            .oid;
        EncryptionAlgorithm::from_oid(&oid)
            .map_err(|e| Error::Parse(format!("unknown public key algorithm: {e}")))
    }

    /// Value of the SubjectKeyIdentifier extension, if present
    pub fn subject_key_identifier(&self) -> Option<Vec<u8>> {
        let extensions = self.certificate.tbs_certificate.extensions.as_ref()?;
        for ext in extensions.iter() {
            if ext.extn_id == ID_CE_SUBJECT_KEY_IDENTIFIER {
                if let Ok(ski) = SubjectKeyIdentifier::from_der(ext.extn_value.as_bytes()) {
                    return Some(ski.0.as_bytes().to_vec());
                }
            }
        }
        None
    }

    /// True when the ExtendedKeyUsage extension contains the given purpose
    pub fn has_extended_key_usage(&self, purpose: &ObjectIdentifier) -> bool {
        let Some(extensions) = self.certificate.tbs_certificate.extensions.as_ref() else {
            return false;
        };
        for ext in extensions.iter() {
            if ext.extn_id == ID_CE_EXT_KEY_USAGE {
                if let Ok(eku) = ExtendedKeyUsage::from_der(ext.extn_value.as_bytes()) {
                    return eku.0.iter().any(|oid| oid == purpose);
                }
            }
        }
        false
    }

    /// Start of the validity window
    pub fn not_before(&self) -> DateTime<Utc> {
        let secs = self
            .certificate
            .tbs_certificate
            .validity
            .not_before
            .to_unix_duration()
            .as_secs() as i64;
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    /// End of the validity window
    pub fn not_after(&self) -> DateTime<Utc> {
        let secs = self
            .certificate
            .tbs_certificate
            .validity
            .not_after
            .to_unix_duration()
            .as_secs() as i64;
        DateTime::from_timestamp(secs, 0).unwrap_or_default()
    }

    /// True when the validity window covers the given instant
    pub fn is_valid_at(&self, time: DateTime<Utc>) -> bool {
        self.not_before() <= time && time <= self.not_after()
    }

    /// True when subject and issuer DN are identical
    pub fn is_self_signed(&self) -> bool {
        self.certificate.tbs_certificate.subject == self.certificate.tbs_certificate.issuer
    }

    /// Compute a digest over the DER encoding of this certificate
    pub fn digest(&self, algorithm: DigestAlgorithm) -> Vec<u8> {
        ades_crypto::digest(algorithm, &self.der)
    }

    /// True when the certificate matches the given issuer and serial
    pub fn matches_issuer_serial(&self, issuer: &Name, serial: &SerialNumber) -> bool {
        self.certificate.tbs_certificate.issuer == *issuer
            && self.certificate.tbs_certificate.serial_number == *serial
    }

    /// True when the certificate matches a CMS SignerIdentifier, either by
    /// issuer and serial or by subject key identifier
    pub fn matches_signer_identifier(&self, sid: &SignerIdentifier) -> bool {
        match sid {
            SignerIdentifier::IssuerAndSerialNumber(issuer_serial) => self
                .matches_issuer_serial(&issuer_serial.issuer, &issuer_serial.serial_number),
            SignerIdentifier::SubjectKeyIdentifier(ski) => self
                .subject_key_identifier()
                .is_some_and(|own| own == ski.0.as_bytes()),
        }
    }

    fn signature_algorithm_of_certificate(&self) -> ades_crypto::Result<SignatureAlgorithm> {
        let identifier = &self.certificate.signature_algorithm;
        let oid = identifier.oid;
        if oid == ECDSA_WITH_SHA_256 {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Ecdsa,
                DigestAlgorithm::Sha256,
            ))
        } else if oid == ECDSA_WITH_SHA_384 {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Ecdsa,
                DigestAlgorithm::Sha384,
            ))
        } else if oid == ECDSA_WITH_SHA_512 {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Ecdsa,
                DigestAlgorithm::Sha512,
            ))
        } else if oid == SHA_256_WITH_RSA_ENCRYPTION {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Rsa,
                DigestAlgorithm::Sha256,
            ))
        } else if oid == SHA_384_WITH_RSA_ENCRYPTION {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Rsa,
                DigestAlgorithm::Sha384,
            ))
        } else if oid == SHA_512_WITH_RSA_ENCRYPTION {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Rsa,
                DigestAlgorithm::Sha512,
            ))
        } else if oid == SHA_1_WITH_RSA_ENCRYPTION {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Rsa,
                DigestAlgorithm::Sha1,
            ))
        } else if oid == ID_RSASSA_PSS {
            match &identifier.parameters {
                Some(params) => ades_crypto::decode_pss_parameters(params),
                None => Err(ades_crypto::Error::Asn1(
                    "RSASSA-PSS signature without parameters".to_string(),
                )),
            }
        } else if oid == const_oid::db::rfc8410::ID_ED_25519 {
            Ok(SignatureAlgorithm::new(
                EncryptionAlgorithm::Ed25519,
                DigestAlgorithm::Sha512,
            ))
        } else {
            Err(ades_crypto::Error::UnsupportedAlgorithm(format!(
                "certificate signature algorithm {oid}"
            )))
        }
    }
}

impl Token for CertificateToken {
    fn dss_id(&self) -> DssId {
        self.id
    }

    fn encoded(&self) -> &[u8] {
        &self.der
    }

    fn issuer_dn(&self) -> Option<String> {
        Some(self.certificate.tbs_certificate.issuer.to_string())
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        Some(self.not_before())
    }

    fn status(&self) -> &TokenStatus {
        &self.status
    }

    fn check_is_signed_by(
        &mut self,
        candidate: &CertificateToken,
    ) -> ades_crypto::Result<SignatureValidity> {
        let algorithm = self.signature_algorithm_of_certificate()?;
        let spki = candidate
            .spki_der()
            .map_err(|e| ades_crypto::Error::InvalidKey(e.to_string()))?;
        let key = VerificationKey::from_spki(&spki, &algorithm)?;

        let tbs = self
            .certificate
            .tbs_certificate
            .to_der()
            .map_err(|e| ades_crypto::Error::Asn1(e.to_string()))?;
        let Some(signature) = self.certificate.signature.as_bytes() else {
            self.status.validity = SignatureValidity::Invalid;
            self.status.invalidity_reason = "certificate signature has unused bits".to_string();
            return Ok(SignatureValidity::Invalid);
        };

        match key.verify(&tbs, signature) {
            Ok(()) => {
                self.status.validity = SignatureValidity::Valid;
                self.status.invalidity_reason.clear();
                self.status.signature_algorithm = Some(algorithm);
                self.status.signer_dn = Some(candidate.subject_dn());
            }
            Err(e) => {
                self.status.validity = SignatureValidity::Invalid;
                self.status.invalidity_reason = e.to_string();
            }
        }
        Ok(self.status.validity)
    }
}

impl std::fmt::Display for CertificateToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Certificate[subject={}, issuer={}, id={:?}]",
            self.subject_dn(),
            self.certificate.tbs_certificate.issuer,
            self.id
        )
    }
}
