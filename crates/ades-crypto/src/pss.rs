//! RSASSA-PSS AlgorithmIdentifier parameters
//!
//! RFC 4055 Section 3.1. The parameters block rides along the signature
//! algorithm identifier of a SignerInfo when the TSA signs with RSASSA-PSS;
//! decoding it is the only way to learn the digest actually used.

use crate::error::{Error, Result};
use ades_types::{DigestAlgorithm, SignatureAlgorithm};
use const_oid::ObjectIdentifier;
use der::{Any, Sequence};
use spki::AlgorithmIdentifierOwned;

/// OID for MGF1: 1.2.840.113549.1.1.8
pub const OID_MGF1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.8");

/// ```text
/// RSASSA-PSS-params ::= SEQUENCE {
///     hashAlgorithm    [0] HashAlgorithm      DEFAULT sha1,
///     maskGenAlgorithm [1] MaskGenAlgorithm   DEFAULT mgf1SHA1,
///     saltLength       [2] INTEGER            DEFAULT 20,
///     trailerField     [3] TrailerField       DEFAULT trailerFieldBC }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct RsaSsaPssParams {
    /// Hash algorithm, SHA-1 when absent
    #[asn1(context_specific = "0", optional = "true", tag_mode = "EXPLICIT")]
    pub hash_algorithm: Option<AlgorithmIdentifierOwned>,

    /// Mask generation algorithm, MGF1-SHA1 when absent
    #[asn1(context_specific = "1", optional = "true", tag_mode = "EXPLICIT")]
    pub mask_gen_algorithm: Option<AlgorithmIdentifierOwned>,

    /// Salt length in bytes, 20 when absent
    #[asn1(context_specific = "2", optional = "true", tag_mode = "EXPLICIT")]
    pub salt_length: Option<u32>,

    /// Trailer field, 1 (0xBC) when absent
    #[asn1(context_specific = "3", optional = "true", tag_mode = "EXPLICIT")]
    pub trailer_field: Option<u32>,
}

impl RsaSsaPssParams {
    /// Build the parameter block for a given digest with MGF1 over the same
    /// digest and a salt of the digest size
    pub fn for_digest(digest: DigestAlgorithm) -> Result<Self> {
        let hash_algorithm = AlgorithmIdentifierOwned {
            oid: digest.oid(),
            parameters: None,
        };
        let mgf_parameters = Any::encode_from(&hash_algorithm)
            .map_err(|e| Error::Asn1(e.to_string()))?;
        Ok(Self {
            hash_algorithm: Some(hash_algorithm),
            mask_gen_algorithm: Some(AlgorithmIdentifierOwned {
                oid: OID_MGF1,
                parameters: Some(mgf_parameters),
            }),
            salt_length: Some(digest.digest_size() as u32),
            trailer_field: None,
        })
    }
}

/// Decode RSASSA-PSS parameters into a resolved signature algorithm.
///
/// The mask generation function must be MGF1; anything else is unsupported.
pub fn decode_pss_parameters(parameters: &Any) -> Result<SignatureAlgorithm> {
    let params: RsaSsaPssParams = parameters
        .decode_as()
        .map_err(|e| Error::Asn1(format!("malformed RSASSA-PSS parameters: {e}")))?;

    let digest = match &params.hash_algorithm {
        Some(alg) => DigestAlgorithm::from_oid(&alg.oid)
            .map_err(|e| Error::UnsupportedAlgorithm(e.to_string()))?,
        None => DigestAlgorithm::Sha1,
    };

    if let Some(mgf) = &params.mask_gen_algorithm {
        if mgf.oid != OID_MGF1 {
            return Err(Error::UnsupportedAlgorithm(format!(
                "mask generation function {}",
                mgf.oid
            )));
        }
    }

    Ok(SignatureAlgorithm::rsa_ssa_pss(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ades_types::{EncryptionAlgorithm, MaskGenerationFunction};

    #[test]
    fn test_decode_sha256_params() {
        let params = RsaSsaPssParams::for_digest(DigestAlgorithm::Sha256).unwrap();
        let any = Any::encode_from(&params).unwrap();

        let algorithm = decode_pss_parameters(&any).unwrap();
        assert_eq!(algorithm.encryption, EncryptionAlgorithm::RsaSsaPss);
        assert_eq!(algorithm.digest, DigestAlgorithm::Sha256);
        assert_eq!(algorithm.mask_generation, Some(MaskGenerationFunction::Mgf1));
    }

    #[test]
    fn test_decode_empty_params_defaults_to_sha1() {
        let params = RsaSsaPssParams {
            hash_algorithm: None,
            mask_gen_algorithm: None,
            salt_length: None,
            trailer_field: None,
        };
        let any = Any::encode_from(&params).unwrap();

        let algorithm = decode_pss_parameters(&any).unwrap();
        assert_eq!(algorithm.digest, DigestAlgorithm::Sha1);
    }

    #[test]
    fn test_round_trip_salt_length() {
        let params = RsaSsaPssParams::for_digest(DigestAlgorithm::Sha384).unwrap();
        let any = Any::encode_from(&params).unwrap();
        let decoded: RsaSsaPssParams = any.decode_as().unwrap();
        assert_eq!(decoded.salt_length, Some(48));
    }
}
