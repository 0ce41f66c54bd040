//! ASN.1 types for RFC 3161 timestamp tokens
//!
//! Defines the TSTInfo structure (RFC 3161 Section 2.4.2) and the ESS
//! signing-certificate attributes (RFC 2634 / RFC 5035) that the strict
//! verification path checks.

use const_oid::ObjectIdentifier;
use der::{
    asn1::{GeneralizedTime, Int, OctetString},
    Any, Sequence,
};
use spki::AlgorithmIdentifierOwned;
use x509_cert::ext::pkix::name::GeneralNames;
use x509_cert::ext::Extensions;
use x509_cert::serial_number::SerialNumber;

/// OID for id-ct-TSTInfo: 1.2.840.113549.1.9.16.1.4
pub const OID_TST_INFO: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.1.4");

/// OID for id-signedData: 1.2.840.113549.1.7.2
pub const OID_SIGNED_DATA: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.7.2");

/// OID for the content-type signed attribute: 1.2.840.113549.1.9.3
pub const OID_CONTENT_TYPE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.3");

/// OID for the message-digest signed attribute: 1.2.840.113549.1.9.4
pub const OID_MESSAGE_DIGEST: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.4");

/// OID for the ESS signing-certificate attribute: 1.2.840.113549.1.9.16.2.12
pub const OID_SIGNING_CERTIFICATE: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.12");

/// OID for the ESS signing-certificate-v2 attribute: 1.2.840.113549.1.9.16.2.47
pub const OID_SIGNING_CERTIFICATE_V2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.47");

/// OID for id-aa-ets-certValues: 1.2.840.113549.1.9.16.2.23
pub const OID_CERT_VALUES: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.16.2.23");

/// OID for id-pkix-ocsp-basic: 1.3.6.1.5.5.7.48.1.1
pub const OID_OCSP_BASIC: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.5.5.7.48.1.1");

fn default_false() -> bool {
    false
}

/// Message imprint containing hash algorithm and hashed message
///
/// RFC 3161 Section 2.4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TspMessageImprint {
    /// Hash algorithm used
    pub hash_algorithm: AlgorithmIdentifierOwned,
    /// Hashed message
    pub hashed_message: OctetString,
}

/// Accuracy of the timestamp
///
/// RFC 3161 Section 2.4.2
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct Accuracy {
    /// Seconds
    #[asn1(optional = "true")]
    pub seconds: Option<u64>,
    /// Milliseconds (1-999)
    #[asn1(context_specific = "0", optional = "true")]
    pub millis: Option<u16>,
    /// Microseconds (1-999)
    #[asn1(context_specific = "1", optional = "true")]
    pub micros: Option<u16>,
}

/// TSTInfo - the timestamp token info
///
/// RFC 3161 Section 2.4.2
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct TstInfo {
    /// Version (must be 1)
    pub version: u8,
    /// TSA policy OID
    pub policy: ObjectIdentifier,
    /// Message imprint
    pub message_imprint: TspMessageImprint,
    /// Serial number
    pub serial_number: Int,
    /// Generation time
    pub gen_time: GeneralizedTime,
    /// Accuracy
    #[asn1(optional = "true")]
    pub accuracy: Option<Accuracy>,
    /// Ordering
    #[asn1(default = "default_false")]
    pub ordering: bool,
    /// Nonce
    #[asn1(optional = "true")]
    pub nonce: Option<Int>,
    /// TSA name
    #[asn1(context_specific = "0", optional = "true", tag_mode = "EXPLICIT")]
    pub tsa: Option<x509_cert::ext::pkix::name::GeneralName>,
    /// Extensions
    #[asn1(context_specific = "1", optional = "true", tag_mode = "IMPLICIT")]
    pub extensions: Option<Extensions>,
}

/// IssuerSerial as used by the ESS signing-certificate attributes
///
/// RFC 5035 Section 4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct IssuerSerial {
    /// Issuer names
    pub issuer: GeneralNames,
    /// Certificate serial number
    pub serial_number: SerialNumber,
}

/// ESSCertID (SHA-1 based)
///
/// RFC 2634 Section 5.4.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EssCertId {
    /// SHA-1 hash of the certificate's DER encoding
    pub cert_hash: OctetString,
    /// Issuer and serial of the certificate
    #[asn1(optional = "true")]
    pub issuer_serial: Option<IssuerSerial>,
}

/// SigningCertificate attribute value
///
/// RFC 2634 Section 5.4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SigningCertificate {
    /// Certificate identifiers, the signer's certificate first
    pub certs: Vec<EssCertId>,
    /// Signature policies (not interpreted here)
    #[asn1(optional = "true")]
    pub policies: Option<Any>,
}

/// ESSCertIDv2 with a configurable hash algorithm
///
/// RFC 5035 Section 4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct EssCertIdV2 {
    /// Hash algorithm, SHA-256 when absent
    #[asn1(optional = "true")]
    pub hash_algorithm: Option<AlgorithmIdentifierOwned>,
    /// Hash of the certificate's DER encoding
    pub cert_hash: OctetString,
    /// Issuer and serial of the certificate
    #[asn1(optional = "true")]
    pub issuer_serial: Option<IssuerSerial>,
}

/// SigningCertificateV2 attribute value
///
/// RFC 5035 Section 3
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SigningCertificateV2 {
    /// Certificate identifiers, the signer's certificate first
    pub certs: Vec<EssCertIdV2>,
    /// Signature policies (not interpreted here)
    #[asn1(optional = "true")]
    pub policies: Option<Any>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ades_types::DigestAlgorithm;
    use der::{Decode, Encode};

    fn sha256_imprint() -> TspMessageImprint {
        TspMessageImprint {
            hash_algorithm: AlgorithmIdentifierOwned {
                oid: DigestAlgorithm::Sha256.oid(),
                parameters: None,
            },
            hashed_message: OctetString::new(vec![0u8; 32]).unwrap(),
        }
    }

    #[test]
    fn test_message_imprint_round_trip() {
        let imprint = sha256_imprint();
        let der = imprint.to_der().unwrap();
        assert_eq!(TspMessageImprint::from_der(&der).unwrap(), imprint);
    }

    #[test]
    fn test_tst_info_round_trip() {
        let tst_info = TstInfo {
            version: 1,
            policy: ObjectIdentifier::new_unwrap("1.2.3.4.5"),
            message_imprint: sha256_imprint(),
            serial_number: Int::new(&[0x2a]).unwrap(),
            gen_time: GeneralizedTime::from_unix_duration(std::time::Duration::from_secs(
                1_700_000_000,
            ))
            .unwrap(),
            accuracy: Some(Accuracy {
                seconds: Some(1),
                millis: None,
                micros: None,
            }),
            ordering: false,
            nonce: None,
            tsa: None,
            extensions: None,
        };
        let der = tst_info.to_der().unwrap();
        let decoded = TstInfo::from_der(&der).unwrap();
        assert_eq!(decoded, tst_info);
    }

    #[test]
    fn test_ess_cert_id_v2_defaults() {
        let id = EssCertIdV2 {
            hash_algorithm: None,
            cert_hash: OctetString::new(vec![1u8; 32]).unwrap(),
            issuer_serial: None,
        };
        let der = id.to_der().unwrap();
        let decoded = EssCertIdV2::from_der(&der).unwrap();
        assert!(decoded.hash_algorithm.is_none());
        assert_eq!(decoded.cert_hash.as_bytes(), &[1u8; 32]);
    }
}
