//! Certificate token and pool tests over generated certificates

use ades_test_fixtures::{tsa_certificate, TestKey, GEN_TIME_SECS};
use ades_types::{CertificateSourceType, DigestAlgorithm, SignatureValidity};
use ades_x509::{CertificatePool, CertificateSource, CertificateToken, Token};
use chrono::DateTime;
use const_oid::db::rfc5280::ID_KP_TIME_STAMPING;
use std::sync::Arc;

fn fixture_certificate(common_name: &str, with_eku: bool) -> (TestKey, Vec<u8>) {
    let key = TestKey::generate_p256();
    let der = tsa_certificate(&key, common_name, with_eku);
    (key, der)
}

#[test]
fn test_parse_and_accessors() {
    let (_, der) = fixture_certificate("Accessor Test", true);
    let certificate = CertificateToken::from_der(&der).unwrap();

    assert!(certificate.subject_dn().contains("Accessor Test"));
    assert!(certificate.is_self_signed());
    assert_eq!(certificate.serial_number().as_bytes(), &[0x01, 0x02, 0x03]);
    assert!(certificate.has_extended_key_usage(&ID_KP_TIME_STAMPING));
    assert!(certificate.subject_key_identifier().is_none());

    let gen_time = DateTime::from_timestamp(GEN_TIME_SECS as i64, 0).unwrap();
    assert!(certificate.is_valid_at(gen_time));
}

#[test]
fn test_eku_absence() {
    let (_, der) = fixture_certificate("No EKU", false);
    let certificate = CertificateToken::from_der(&der).unwrap();
    assert!(!certificate.has_extended_key_usage(&ID_KP_TIME_STAMPING));
}

#[test]
fn test_identity_follows_der_bytes() {
    let (_, der) = fixture_certificate("Identity", true);
    let first = CertificateToken::from_der(&der).unwrap();
    let second = CertificateToken::from_der(&der).unwrap();
    assert_eq!(first.dss_id(), second.dss_id());

    let (_, other_der) = fixture_certificate("Identity", true);
    let third = CertificateToken::from_der(&other_der).unwrap();
    // a different key produces different DER, hence a different identity
    assert_ne!(first.dss_id(), third.dss_id());
}

#[test]
fn test_parse_error() {
    assert!(CertificateToken::from_der(b"garbage").is_err());
}

#[test]
fn test_self_signed_verification() {
    let (_, der) = fixture_certificate("Self Signed", true);
    let mut certificate = CertificateToken::from_der(&der).unwrap();
    let candidate = CertificateToken::from_der(&der).unwrap();

    let validity = certificate.check_is_signed_by(&candidate).unwrap();
    assert_eq!(validity, SignatureValidity::Valid);
    assert!(certificate.is_signature_valid());
}

#[test]
fn test_wrong_issuer_key_is_invalid() {
    let (_, der) = fixture_certificate("Subject", true);
    let (_, other_der) = fixture_certificate("Other", true);

    let mut certificate = CertificateToken::from_der(&der).unwrap();
    let wrong = CertificateToken::from_der(&other_der).unwrap();

    let validity = certificate.check_is_signed_by(&wrong).unwrap();
    assert_eq!(validity, SignatureValidity::Invalid);
    assert!(!certificate.signature_invalidity_reason().is_empty());
}

#[test]
fn test_pool_deduplicates_by_identity() {
    let pool = CertificatePool::new();
    let (_, der) = fixture_certificate("Pooled", true);

    let first = pool.add(
        CertificateToken::from_der(&der).unwrap(),
        CertificateSourceType::Signature,
    );
    let second = pool.add(
        CertificateToken::from_der(&der).unwrap(),
        CertificateSourceType::Timestamp,
    );

    assert_eq!(pool.len(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        pool.sources_of(&first.dss_id()),
        vec![
            CertificateSourceType::Signature,
            CertificateSourceType::Timestamp
        ]
    );
}

#[test]
fn test_source_lookup_by_digest() {
    let pool = Arc::new(CertificatePool::new());
    let mut source = CertificateSource::new(CertificateSourceType::Signature, pool);
    let (_, der) = fixture_certificate("Lookup", true);
    source.add_certificate(CertificateToken::from_der(&der).unwrap());

    let digest = ades_crypto::digest(DigestAlgorithm::Sha256, &der);
    assert!(source.find_by_digest(DigestAlgorithm::Sha256, &digest).is_some());
    assert!(source
        .find_by_digest(DigestAlgorithm::Sha256, &[0u8; 32])
        .is_none());
}
