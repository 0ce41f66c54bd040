//! Digest, encryption and signature algorithm enumerations
//!
//! Every algorithm carries its OID so that tokens parsed from DER structures
//! can be mapped back without string juggling.

use const_oid::ObjectIdentifier;
use thiserror::Error;

/// Raised when an OID does not map to a known algorithm
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm OID: {0}")]
pub struct UnknownOidError(pub String);

/// OID for SHA-1: 1.3.14.3.2.26
const OID_SHA1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.14.3.2.26");
/// OID for RIPEMD-160: 1.3.36.3.2.1
const OID_RIPEMD160: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.36.3.2.1");
/// OID for MD5: 1.2.840.113549.2.5
const OID_MD5: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.2.5");
/// OID for WHIRLPOOL: 1.0.10118.3.0.55
const OID_WHIRLPOOL: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.0.10118.3.0.55");
/// OID for DSA: 1.2.840.10040.4.1
const OID_DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
/// OID for SHA3-224: 2.16.840.1.101.3.4.2.7
const OID_SHA3_224: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.7");
/// OID for SHA3-256: 2.16.840.1.101.3.4.2.8
const OID_SHA3_256: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.8");
/// OID for SHA3-384: 2.16.840.1.101.3.4.2.9
const OID_SHA3_384: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.9");
/// OID for SHA3-512: 2.16.840.1.101.3.4.2.10
const OID_SHA3_512: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.16.840.1.101.3.4.2.10");

/// Digest algorithms recognised in message imprints and signed references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// SHA-1 (legacy)
    Sha1,
    /// SHA-224
    Sha224,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
    /// SHA3-224
    Sha3_224,
    /// SHA3-256
    Sha3_256,
    /// SHA3-384
    Sha3_384,
    /// SHA3-512
    Sha3_512,
    /// RIPEMD-160 (legacy)
    Ripemd160,
    /// WHIRLPOOL (legacy)
    Whirlpool,
    /// MD5 (legacy)
    Md5,
}

impl DigestAlgorithm {
    /// Get the OID for this algorithm
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            DigestAlgorithm::Sha1 => OID_SHA1,
            DigestAlgorithm::Sha224 => const_oid::db::rfc5912::ID_SHA_224,
            DigestAlgorithm::Sha256 => const_oid::db::rfc5912::ID_SHA_256,
            DigestAlgorithm::Sha384 => const_oid::db::rfc5912::ID_SHA_384,
            DigestAlgorithm::Sha512 => const_oid::db::rfc5912::ID_SHA_512,
            DigestAlgorithm::Sha3_224 => OID_SHA3_224,
            DigestAlgorithm::Sha3_256 => OID_SHA3_256,
            DigestAlgorithm::Sha3_384 => OID_SHA3_384,
            DigestAlgorithm::Sha3_512 => OID_SHA3_512,
            DigestAlgorithm::Ripemd160 => OID_RIPEMD160,
            DigestAlgorithm::Whirlpool => OID_WHIRLPOOL,
            DigestAlgorithm::Md5 => OID_MD5,
        }
    }

    /// Look up the algorithm for an OID
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self, UnknownOidError> {
        const ALL: [DigestAlgorithm; 12] = [
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha224,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
            DigestAlgorithm::Sha3_224,
            DigestAlgorithm::Sha3_256,
            DigestAlgorithm::Sha3_384,
            DigestAlgorithm::Sha3_512,
            DigestAlgorithm::Ripemd160,
            DigestAlgorithm::Whirlpool,
            DigestAlgorithm::Md5,
        ];
        ALL.into_iter()
            .find(|a| a.oid() == *oid)
            .ok_or_else(|| UnknownOidError(oid.to_string()))
    }

    /// Get the digest size in bytes for this algorithm
    pub fn digest_size(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 | DigestAlgorithm::Ripemd160 => 20,
            DigestAlgorithm::Sha224 | DigestAlgorithm::Sha3_224 => 28,
            DigestAlgorithm::Sha256 | DigestAlgorithm::Sha3_256 => 32,
            DigestAlgorithm::Sha384 | DigestAlgorithm::Sha3_384 => 48,
            DigestAlgorithm::Sha512 | DigestAlgorithm::Sha3_512 | DigestAlgorithm::Whirlpool => 64,
            DigestAlgorithm::Md5 => 16,
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DigestAlgorithm::Sha1 => "SHA1",
            DigestAlgorithm::Sha224 => "SHA224",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Sha3_224 => "SHA3-224",
            DigestAlgorithm::Sha3_256 => "SHA3-256",
            DigestAlgorithm::Sha3_384 => "SHA3-384",
            DigestAlgorithm::Sha3_512 => "SHA3-512",
            DigestAlgorithm::Ripemd160 => "RIPEMD160",
            DigestAlgorithm::Whirlpool => "WHIRLPOOL",
            DigestAlgorithm::Md5 => "MD5",
        };
        write!(f, "{}", name)
    }
}

/// Encryption (public key) algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionAlgorithm {
    /// RSA PKCS#1 v1.5
    Rsa,
    /// RSASSA-PSS
    RsaSsaPss,
    /// ECDSA
    Ecdsa,
    /// Ed25519
    Ed25519,
    /// DSA (legacy)
    Dsa,
}

impl EncryptionAlgorithm {
    /// Get the public key algorithm OID
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            EncryptionAlgorithm::Rsa => const_oid::db::rfc5912::RSA_ENCRYPTION,
            EncryptionAlgorithm::RsaSsaPss => const_oid::db::rfc5912::ID_RSASSA_PSS,
            EncryptionAlgorithm::Ecdsa => const_oid::db::rfc5912::ID_EC_PUBLIC_KEY,
            EncryptionAlgorithm::Ed25519 => const_oid::db::rfc8410::ID_ED_25519,
            EncryptionAlgorithm::Dsa => OID_DSA,
        }
    }

    /// Look up the algorithm for a public key OID
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self, UnknownOidError> {
        const ALL: [EncryptionAlgorithm; 5] = [
            EncryptionAlgorithm::Rsa,
            EncryptionAlgorithm::RsaSsaPss,
            EncryptionAlgorithm::Ecdsa,
            EncryptionAlgorithm::Ed25519,
            EncryptionAlgorithm::Dsa,
        ];
        ALL.into_iter()
            .find(|a| a.oid() == *oid)
            .ok_or_else(|| UnknownOidError(oid.to_string()))
    }
}

impl std::fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EncryptionAlgorithm::Rsa => "RSA",
            EncryptionAlgorithm::RsaSsaPss => "RSASSA-PSS",
            EncryptionAlgorithm::Ecdsa => "ECDSA",
            EncryptionAlgorithm::Ed25519 => "Ed25519",
            EncryptionAlgorithm::Dsa => "DSA",
        };
        write!(f, "{}", name)
    }
}

/// Mask generation functions for parametric signature schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskGenerationFunction {
    /// MGF1 (RFC 8017)
    Mgf1,
}

impl MaskGenerationFunction {
    /// OID for MGF1: 1.2.840.113549.1.1.8
    pub fn oid(&self) -> ObjectIdentifier {
        ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8")
    }
}

/// A fully resolved signature algorithm: encryption and digest pair, plus the
/// mask generation function for parametric schemes such as RSASSA-PSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureAlgorithm {
    /// Encryption algorithm
    pub encryption: EncryptionAlgorithm,
    /// Digest algorithm
    pub digest: DigestAlgorithm,
    /// Mask generation function, only set for parametric schemes
    pub mask_generation: Option<MaskGenerationFunction>,
}

impl SignatureAlgorithm {
    /// Pair an encryption algorithm with a digest algorithm
    pub fn new(encryption: EncryptionAlgorithm, digest: DigestAlgorithm) -> Self {
        Self {
            encryption,
            digest,
            mask_generation: None,
        }
    }

    /// Build an RSASSA-PSS algorithm with the MGF1 mask generation function
    pub fn rsa_ssa_pss(digest: DigestAlgorithm) -> Self {
        Self {
            encryption: EncryptionAlgorithm::RsaSsaPss,
            digest,
            mask_generation: Some(MaskGenerationFunction::Mgf1),
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mask_generation {
            Some(MaskGenerationFunction::Mgf1) => {
                write!(f, "{}_{}_MGF1", self.encryption, self.digest)
            }
            None => write!(f, "{}_{}", self.encryption, self.digest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_oid_round_trip() {
        for algo in [
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha3_512,
            DigestAlgorithm::Whirlpool,
            DigestAlgorithm::Md5,
        ] {
            assert_eq!(DigestAlgorithm::from_oid(&algo.oid()).unwrap(), algo);
        }
    }

    #[test]
    fn test_unknown_oid() {
        let oid = ObjectIdentifier::new_unwrap("1.2.3.4");
        assert!(DigestAlgorithm::from_oid(&oid).is_err());
    }

    #[test]
    fn test_digest_sizes() {
        assert_eq!(DigestAlgorithm::Sha256.digest_size(), 32);
        assert_eq!(DigestAlgorithm::Sha512.digest_size(), 64);
        assert_eq!(DigestAlgorithm::Ripemd160.digest_size(), 20);
    }

    #[test]
    fn test_signature_algorithm_display() {
        let plain = SignatureAlgorithm::new(EncryptionAlgorithm::Rsa, DigestAlgorithm::Sha256);
        assert_eq!(plain.to_string(), "RSA_SHA256");

        let pss = SignatureAlgorithm::rsa_ssa_pss(DigestAlgorithm::Sha256);
        assert_eq!(pss.to_string(), "RSASSA-PSS_SHA256_MGF1");
        assert_eq!(pss.mask_generation, Some(MaskGenerationFunction::Mgf1));
    }
}
