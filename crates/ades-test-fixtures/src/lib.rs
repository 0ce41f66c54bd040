//! Shared test fixtures
//!
//! Builds real DER structures for the test suites: generated ECDSA keys,
//! self-signed TSA certificates and RFC 3161 timestamp tokens assembled with
//! the same formats stack the production code parses.

use ades_tsp::asn1::{
    EssCertIdV2, SigningCertificateV2, TspMessageImprint, TstInfo, OID_CONTENT_TYPE,
    OID_MESSAGE_DIGEST, OID_SIGNED_DATA, OID_SIGNING_CERTIFICATE_V2, OID_TST_INFO,
};
use ades_types::DigestAlgorithm;
use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{EcdsaKeyPair, KeyPair as _, ECDSA_P256_SHA256_ASN1_SIGNING};
use cms::cert::{CertificateChoices, IssuerAndSerialNumber};
use cms::content_info::{CmsVersion, ContentInfo};
use cms::signed_data::{
    CertificateSet, EncapsulatedContentInfo, SignedData, SignerIdentifier, SignerInfo,
    SignerInfos,
};
use const_oid::db::rfc5280::ID_KP_TIME_STAMPING;
use const_oid::db::rfc5912::{ECDSA_WITH_SHA_256, ID_EC_PUBLIC_KEY, SECP_256_R_1};
use const_oid::ObjectIdentifier;
use der::asn1::{BitString, GeneralizedTime, Int, OctetString, SetOfVec};
use der::{Any, Decode, Encode};
use spki::{AlgorithmIdentifierOwned, SubjectPublicKeyInfoOwned};
use std::time::Duration;
use x509_cert::certificate::{TbsCertificate, Version};
use x509_cert::ext::pkix::ExtendedKeyUsage;
use x509_cert::ext::Extension;
use x509_cert::name::{Name, RdnSequence};
use x509_cert::serial_number::SerialNumber;
use x509_cert::time::{Time, Validity};
use x509_cert::Certificate;

/// Fixed generation time used by the fixtures (2023-11-14T22:13:20Z)
pub const GEN_TIME_SECS: u64 = 1_700_000_000;

/// An ECDSA P-256 key pair with its SPKI encoding
pub struct TestKey {
    keypair: EcdsaKeyPair,
    spki_der: Vec<u8>,
}

impl TestKey {
    /// Generate a fresh P-256 key
    pub fn generate_p256() -> Self {
        let rng = SystemRandom::new();
        let pkcs8 = EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, &rng)
            .expect("generate ECDSA P-256 key");
        let keypair = EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_ASN1_SIGNING, pkcs8.as_ref())
            .expect("load generated key");

        let spki = SubjectPublicKeyInfoOwned {
            algorithm: AlgorithmIdentifierOwned {
                oid: ID_EC_PUBLIC_KEY,
                parameters: Some(Any::encode_from(&SECP_256_R_1).expect("encode curve OID")),
            },
            subject_public_key: BitString::from_bytes(keypair.public_key().as_ref())
                .expect("encode public key"),
        };
        let spki_der = spki.to_der().expect("encode SPKI");

        Self { keypair, spki_der }
    }

    /// Sign a message, producing an ASN.1 ECDSA signature
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let rng = SystemRandom::new();
        self.keypair
            .sign(&rng, message)
            .expect("sign message")
            .as_ref()
            .to_vec()
    }

    /// The DER-encoded SubjectPublicKeyInfo
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }
}

fn parse_name(value: &str) -> Name {
    let der = RdnSequence::encode_from_string(value).expect("encode distinguished name");
    Name::from_der(&der).expect("decode distinguished name")
}

fn sha256_algorithm() -> AlgorithmIdentifierOwned {
    AlgorithmIdentifierOwned {
        oid: DigestAlgorithm::Sha256.oid(),
        parameters: None,
    }
}

/// Build a self-signed TSA certificate for the given key.
///
/// The validity window covers [`GEN_TIME_SECS`] by a year on each side. The
/// timeStamping extended key usage is included unless disabled, which lets
/// tests exercise the strict-validation failure paths.
pub fn tsa_certificate(key: &TestKey, common_name: &str, with_timestamping_eku: bool) -> Vec<u8> {
    let name = parse_name(&format!("CN={common_name},O=Fixtures"));
    let spki =
        SubjectPublicKeyInfoOwned::from_der(key.spki_der()).expect("round-trip fixture SPKI");

    let extensions = if with_timestamping_eku {
        let eku = ExtendedKeyUsage(vec![ID_KP_TIME_STAMPING]);
        Some(vec![Extension {
            extn_id: const_oid::db::rfc5280::ID_CE_EXT_KEY_USAGE,
            critical: true,
            extn_value: OctetString::new(eku.to_der().expect("encode EKU"))
                .expect("wrap EKU"),
        }])
    } else {
        None
    };

    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: SerialNumber::new(&[0x01, 0x02, 0x03]).expect("serial"),
        signature: AlgorithmIdentifierOwned {
            oid: ECDSA_WITH_SHA_256,
            parameters: None,
        },
        issuer: name.clone(),
        validity: Validity {
            not_before: Time::GeneralTime(
                GeneralizedTime::from_unix_duration(Duration::from_secs(
                    GEN_TIME_SECS - 365 * 24 * 3600,
                ))
                .expect("not before"),
            ),
            not_after: Time::GeneralTime(
                GeneralizedTime::from_unix_duration(Duration::from_secs(
                    GEN_TIME_SECS + 365 * 24 * 3600,
                ))
                .expect("not after"),
            ),
        },
        subject: name,
        subject_public_key_info: spki,
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions,
    };

    let message = tbs.to_der().expect("encode TBS certificate");
    let signature = key.sign(&message);

    let certificate = Certificate {
        tbs_certificate: tbs,
        signature_algorithm: AlgorithmIdentifierOwned {
            oid: ECDSA_WITH_SHA_256,
            parameters: None,
        },
        signature: BitString::from_bytes(&signature).expect("wrap signature"),
    };
    certificate.to_der().expect("encode certificate")
}

/// Options for assembling a timestamp token
pub struct TimestampSpec {
    /// Message imprint digest value
    pub message_imprint: Vec<u8>,
    /// Message imprint algorithm
    pub imprint_algorithm: DigestAlgorithm,
    /// Include the ESS signing-certificate-v2 signed attribute
    pub with_signing_certificate_attr: bool,
    /// Embed the TSA certificate in the CMS certificate bag
    pub embed_certificate: bool,
    /// TSTInfo generation time, seconds since the epoch
    pub gen_time_secs: u64,
}

impl TimestampSpec {
    /// A well-formed token over the given imprint value
    pub fn over_imprint(message_imprint: Vec<u8>) -> Self {
        Self {
            message_imprint,
            imprint_algorithm: DigestAlgorithm::Sha256,
            with_signing_certificate_attr: true,
            embed_certificate: true,
            gen_time_secs: GEN_TIME_SECS,
        }
    }

    /// A well-formed token over the SHA-256 of the given content
    pub fn over_content(content: &[u8]) -> Self {
        Self::over_imprint(ades_crypto::digest(DigestAlgorithm::Sha256, content))
    }
}

/// Assemble a DER-encoded RFC 3161 TimeStampToken signed by `key` with the
/// TSA certificate `cert_der`.
pub fn timestamp_token(key: &TestKey, cert_der: &[u8], spec: &TimestampSpec) -> Vec<u8> {
    let certificate = Certificate::from_der(cert_der).expect("parse TSA certificate");

    let tst_info = TstInfo {
        version: 1,
        policy: ObjectIdentifier::new_unwrap("1.3.6.1.4.1.99999.1.1"),
        message_imprint: TspMessageImprint {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: spec.imprint_algorithm.oid(),
                parameters: None,
            },
            hashed_message: OctetString::new(spec.message_imprint.clone())
                .expect("wrap imprint"),
        },
        serial_number: Int::new(&[0x2a]).expect("serial"),
        gen_time: GeneralizedTime::from_unix_duration(Duration::from_secs(spec.gen_time_secs))
            .expect("generation time"),
        accuracy: None,
        ordering: false,
        nonce: None,
        tsa: None,
        extensions: None,
    };
    let tst_info_der = tst_info.to_der().expect("encode TSTInfo");

    let mut attributes = vec![
        x509_cert::attr::Attribute {
            oid: OID_CONTENT_TYPE,
            values: SetOfVec::try_from(vec![
                Any::encode_from(&OID_TST_INFO).expect("encode content-type value"),
            ])
            .expect("content-type values"),
        },
        x509_cert::attr::Attribute {
            oid: OID_MESSAGE_DIGEST,
            values: SetOfVec::try_from(vec![Any::encode_from(
                &OctetString::new(ades_crypto::digest(DigestAlgorithm::Sha256, &tst_info_der))
                    .expect("wrap message digest"),
            )
            .expect("encode message-digest value")])
            .expect("message-digest values"),
        },
    ];

    if spec.with_signing_certificate_attr {
        let signing_certificate = SigningCertificateV2 {
            certs: vec![EssCertIdV2 {
                hash_algorithm: None,
                cert_hash: OctetString::new(ades_crypto::digest(
                    DigestAlgorithm::Sha256,
                    cert_der,
                ))
                .expect("wrap certificate hash"),
                issuer_serial: None,
            }],
            policies: None,
        };
        attributes.push(x509_cert::attr::Attribute {
            oid: OID_SIGNING_CERTIFICATE_V2,
            values: SetOfVec::try_from(vec![
                Any::encode_from(&signing_certificate).expect("encode signing-certificate"),
            ])
            .expect("signing-certificate values"),
        });
    }

    let signed_attrs = SetOfVec::try_from(attributes).expect("signed attributes");
    let message =
        ades_tsp::parse::signed_attrs_der(&signed_attrs).expect("re-encode signed attributes");
    let signature = key.sign(&message);

    let signer_info = SignerInfo {
        version: CmsVersion::V1,
        sid: SignerIdentifier::IssuerAndSerialNumber(IssuerAndSerialNumber {
            issuer: certificate.tbs_certificate.issuer.clone(),
            serial_number: certificate.tbs_certificate.serial_number.clone(),
        }),
        digest_alg: sha256_algorithm(),
        signed_attrs: Some(signed_attrs),
        signature_algorithm: AlgorithmIdentifierOwned {
            oid: ECDSA_WITH_SHA_256,
            parameters: None,
        },
        signature: OctetString::new(signature).expect("wrap signature"),
        unsigned_attrs: None,
    };

    let signed_data = SignedData {
        version: CmsVersion::V3,
        digest_algorithms: SetOfVec::try_from(vec![sha256_algorithm()])
            .expect("digest algorithms"),
        encap_content_info: EncapsulatedContentInfo {
            econtent_type: OID_TST_INFO,
            econtent: Some(
                Any::encode_from(&OctetString::new(tst_info_der).expect("wrap TSTInfo"))
                    .expect("encode eContent"),
            ),
        },
        certificates: if spec.embed_certificate {
            Some(
                CertificateSet::from(
                    SetOfVec::try_from(vec![CertificateChoices::Certificate(certificate)])
                        .expect("certificate set"),
                ),
            )
        } else {
            None
        },
        crls: None,
        signer_infos: SignerInfos::from(
            SetOfVec::try_from(vec![signer_info]).expect("signer infos"),
        ),
    };

    let content_info = ContentInfo {
        content_type: OID_SIGNED_DATA,
        content: Any::encode_from(&signed_data).expect("encode SignedData"),
    };
    content_info.to_der().expect("encode TimeStampToken")
}
