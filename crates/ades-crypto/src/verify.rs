//! Signature verification using aws-lc-rs

use crate::error::{Error, Result};
use ades_types::{Digest, DigestAlgorithm, EncryptionAlgorithm, SignatureAlgorithm};
use aws_lc_rs::signature::{
    UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ECDSA_P256_SHA384_ASN1,
    ECDSA_P384_SHA256_ASN1, ECDSA_P384_SHA384_ASN1, ED25519, RSA_PKCS1_2048_8192_SHA256,
    RSA_PKCS1_2048_8192_SHA384, RSA_PKCS1_2048_8192_SHA512, RSA_PSS_2048_8192_SHA256,
    RSA_PSS_2048_8192_SHA384, RSA_PSS_2048_8192_SHA512,
};
use const_oid::db::rfc5912::{SECP_256_R_1, SECP_384_R_1};
use const_oid::ObjectIdentifier;
use spki::SubjectPublicKeyInfoRef;

/// Elliptic curves the backend can verify against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EcCurve {
    P256,
    P384,
}

/// A public key bound to a concrete verification algorithm.
///
/// Built from a DER-encoded SubjectPublicKeyInfo and the resolved signature
/// algorithm. Construction fails with [`Error::UnsupportedAlgorithm`] when
/// the backend has no implementation for the requested combination; that is
/// an environmental fault, not an evidential outcome.
pub struct VerificationKey {
    raw: Vec<u8>,
    algorithm: &'static dyn VerificationAlgorithm,
    digest: DigestAlgorithm,
    curve: Option<EcCurve>,
}

impl VerificationKey {
    /// Create a verification key from a DER-encoded SPKI public key
    pub fn from_spki(spki_der: &[u8], signature_algorithm: &SignatureAlgorithm) -> Result<Self> {
        let spki = SubjectPublicKeyInfoRef::try_from(spki_der)
            .map_err(|e| Error::InvalidKey(format!("invalid SPKI: {e}")))?;

        let raw = spki
            .subject_public_key
            .as_bytes()
            .ok_or_else(|| Error::InvalidKey("public key has unused bits".to_string()))?
            .to_vec();

        let digest = signature_algorithm.digest;
        let mut curve = None;

        let algorithm: &'static dyn VerificationAlgorithm = match signature_algorithm.encryption {
            EncryptionAlgorithm::Ecdsa => {
                let ec_curve = ec_curve_from_params(&spki)?;
                curve = Some(ec_curve);
                match (ec_curve, digest) {
                    (EcCurve::P256, DigestAlgorithm::Sha256) => &ECDSA_P256_SHA256_ASN1,
                    (EcCurve::P256, DigestAlgorithm::Sha384) => &ECDSA_P256_SHA384_ASN1,
                    (EcCurve::P384, DigestAlgorithm::Sha256) => &ECDSA_P384_SHA256_ASN1,
                    (EcCurve::P384, DigestAlgorithm::Sha384) => &ECDSA_P384_SHA384_ASN1,
                    _ => {
                        return Err(Error::UnsupportedAlgorithm(format!(
                            "ECDSA with {digest}"
                        )))
                    }
                }
            }
            EncryptionAlgorithm::Ed25519 => &ED25519,
            EncryptionAlgorithm::Rsa => match digest {
                DigestAlgorithm::Sha256 => &RSA_PKCS1_2048_8192_SHA256,
                DigestAlgorithm::Sha384 => &RSA_PKCS1_2048_8192_SHA384,
                DigestAlgorithm::Sha512 => &RSA_PKCS1_2048_8192_SHA512,
                _ => {
                    return Err(Error::UnsupportedAlgorithm(format!("RSA with {digest}")))
                }
            },
            EncryptionAlgorithm::RsaSsaPss => match digest {
                DigestAlgorithm::Sha256 => &RSA_PSS_2048_8192_SHA256,
                DigestAlgorithm::Sha384 => &RSA_PSS_2048_8192_SHA384,
                DigestAlgorithm::Sha512 => &RSA_PSS_2048_8192_SHA512,
                _ => {
                    return Err(Error::UnsupportedAlgorithm(format!(
                        "RSASSA-PSS with {digest}"
                    )))
                }
            },
            EncryptionAlgorithm::Dsa => {
                return Err(Error::UnsupportedAlgorithm("DSA".to_string()))
            }
        };

        Ok(Self {
            raw,
            algorithm,
            digest,
            curve,
        })
    }

    /// Verify a signature over data
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        UnparsedPublicKey::new(self.algorithm, &self.raw)
            .verify(data, signature)
            .map_err(|_| Error::Verification("signature does not verify".to_string()))
    }

    /// Verify a signature over already-hashed data (DTBSR-only validation).
    ///
    /// Only ECDSA supports importing an external digest; other schemes need
    /// the original message.
    pub fn verify_prehashed(&self, dtbsr: &Digest, signature: &[u8]) -> Result<()> {
        use aws_lc_rs::digest::{Digest as AwsDigest, SHA256, SHA384};

        if dtbsr.algorithm != self.digest {
            return Err(Error::Verification(format!(
                "digest algorithm mismatch: key expects {}, DTBSR uses {}",
                self.digest, dtbsr.algorithm
            )));
        }

        let Some(curve) = self.curve else {
            return Err(Error::UnsupportedAlgorithm(
                "pre-hashed verification is only available for ECDSA".to_string(),
            ));
        };

        let aws_algorithm = match self.digest {
            DigestAlgorithm::Sha256 => &SHA256,
            DigestAlgorithm::Sha384 => &SHA384,
            _ => {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "pre-hashed verification with {}",
                    self.digest
                )))
            }
        };
        let imported = AwsDigest::import_less_safe(&dtbsr.value, aws_algorithm)
            .map_err(|_| Error::InvalidKey("failed to import digest".to_string()))?;

        let ecdsa = match (curve, self.digest) {
            (EcCurve::P256, DigestAlgorithm::Sha256) => &ECDSA_P256_SHA256_ASN1,
            (EcCurve::P256, DigestAlgorithm::Sha384) => &ECDSA_P256_SHA384_ASN1,
            (EcCurve::P384, DigestAlgorithm::Sha256) => &ECDSA_P384_SHA256_ASN1,
            (EcCurve::P384, DigestAlgorithm::Sha384) => &ECDSA_P384_SHA384_ASN1,
            _ => {
                return Err(Error::UnsupportedAlgorithm(format!(
                    "ECDSA with {}",
                    self.digest
                )))
            }
        };

        UnparsedPublicKey::new(ecdsa, &self.raw)
            .verify_digest(&imported, signature)
            .map_err(|_| Error::Verification("signature does not verify".to_string()))
    }
}

fn ec_curve_from_params(spki: &SubjectPublicKeyInfoRef<'_>) -> Result<EcCurve> {
    let params = spki
        .algorithm
        .parameters
        .as_ref()
        .ok_or_else(|| Error::InvalidKey("missing EC curve parameters".to_string()))?;
    let curve_oid = params
        .decode_as::<ObjectIdentifier>()
        .map_err(|e| Error::InvalidKey(format!("failed to decode curve OID: {e}")))?;

    if curve_oid == SECP_256_R_1 {
        Ok(EcCurve::P256)
    } else if curve_oid == SECP_384_R_1 {
        Ok(EcCurve::P384)
    } else {
        Err(Error::UnsupportedAlgorithm(format!(
            "EC curve {curve_oid}"
        )))
    }
}
