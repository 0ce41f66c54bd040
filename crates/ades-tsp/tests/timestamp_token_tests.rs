//! End-to-end timestamp token tests over real DER structures

use ades_test_fixtures::{timestamp_token, tsa_certificate, TestKey, TimestampSpec, GEN_TIME_SECS};
use ades_tsp::{Error, TimestampToken, TimestampVerificationPath};
use ades_types::{
    DigestAlgorithm, EncryptionAlgorithm, PdfRevision, SignatureValidity, SignedDocument,
    TimestampLocation, TimestampType,
};
use ades_x509::{CertificatePool, CertificateToken, Token};
use std::sync::Arc;

fn pool() -> Arc<CertificatePool> {
    Arc::new(CertificatePool::new())
}

/// A key, its TSA certificate and a token over `content`
fn valid_setup(content: &[u8]) -> (TimestampToken, CertificateToken) {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Fixture TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(content));

    let token =
        TimestampToken::from_der(&token_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    let certificate = CertificateToken::from_der(&cert_der).unwrap();
    (token, certificate)
}

#[test]
fn test_parse_exposes_metadata() {
    let (token, _) = valid_setup(b"signature value");

    assert_eq!(token.timestamp_type(), TimestampType::SignatureTimestamp);
    assert_eq!(token.generation_time().timestamp(), GEN_TIME_SECS as i64);
    assert_eq!(token.message_imprint().algorithm, DigestAlgorithm::Sha256);
    assert_eq!(token.message_imprint().value.len(), 32);
    assert_eq!(token.certificates().len(), 1);
    assert!(token.location().is_none());
    assert!(!token.is_processed());
    assert_eq!(token.signature_validity(), SignatureValidity::NotEvaluated);
}

#[test]
fn test_identity_is_stable_across_reparses() {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Fixture TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"data"));

    let first =
        TimestampToken::from_der(&token_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    let second =
        TimestampToken::from_der(&token_der, TimestampType::ArchiveTimestamp, pool()).unwrap();
    assert_eq!(first.dss_id(), second.dss_id());

    let other_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"other"));
    let third =
        TimestampToken::from_der(&other_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    assert_ne!(first.dss_id(), third.dss_id());
}

#[test]
fn test_parse_error_is_terminal() {
    let result = TimestampToken::from_der(b"not a token", TimestampType::SignatureTimestamp, pool());
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_imprint_outcome_before_match_data_is_a_contract_violation() {
    let (token, _) = valid_setup(b"content");
    assert!(matches!(
        token.is_message_imprint_data_intact(),
        Err(Error::IllegalState(_))
    ));
}

#[test]
fn test_match_data_intact() {
    let (mut token, _) = valid_setup(b"timestamped content");
    let document = SignedDocument::from_bytes(b"timestamped content".to_vec());

    assert!(token.match_data(Some(&document)));
    assert!(token.is_processed());
    assert!(token.is_message_imprint_data_found());
    assert!(token.is_message_imprint_data_intact().unwrap());

    // imprint soundness: the recorded imprint is the digest of the content
    assert_eq!(
        token.message_imprint().value,
        ades_crypto::digest(DigestAlgorithm::Sha256, b"timestamped content")
    );
}

#[test]
fn test_match_data_mismatch_is_recorded_not_raised() {
    let (mut token, _) = valid_setup(b"original");
    let document = SignedDocument::from_bytes(b"tampered".to_vec());

    assert!(!token.match_data(Some(&document)));
    assert!(token.is_message_imprint_data_found());
    assert!(!token.is_message_imprint_data_intact().unwrap());
}

#[test]
fn test_match_data_without_data() {
    let (mut token, _) = valid_setup(b"original");

    assert!(!token.match_data(None));
    assert!(token.is_processed());
    assert!(!token.is_message_imprint_data_found());
    assert!(!token.is_message_imprint_data_intact().unwrap());
}

#[test]
fn test_match_imprint_against_precomputed_digest() {
    let (mut token, _) = valid_setup(b"payload");
    let digest = ades_crypto::digest(DigestAlgorithm::Sha256, b"payload");
    assert!(token.match_imprint(Some(&digest)));
    assert!(token.is_message_imprint_data_intact().unwrap());
}

#[test]
fn test_strict_verification_path() {
    let (mut token, certificate) = valid_setup(b"content");

    let validity = token.check_is_signed_by(&certificate).unwrap();
    assert_eq!(validity, SignatureValidity::Valid);
    assert!(token.is_signature_valid());
    assert_eq!(
        token.verification_path(),
        Some(TimestampVerificationPath::Strict)
    );

    let algorithm = token.signature_algorithm().unwrap();
    assert_eq!(algorithm.encryption, EncryptionAlgorithm::Ecdsa);
    assert_eq!(algorithm.digest, DigestAlgorithm::Sha256);

    let dn = token.issuer_dn().unwrap();
    assert!(dn.contains("Fixture TSA"), "unexpected TSA DN: {dn}");

    // the TSA certificate itself is self-signed and verifies against itself
    let self_check = certificate.clone().check_is_signed_by(&certificate).unwrap();
    assert_eq!(self_check, SignatureValidity::Valid);
}

#[test]
fn test_signer_verification_is_idempotent() {
    let (mut token, certificate) = valid_setup(b"content");

    assert!(token.is_signed_by(&certificate).unwrap());
    let dn = token.issuer_dn();
    let algorithm = token.signature_algorithm();

    // a second call returns the same outcome without mutating the record
    assert!(token.is_signed_by(&certificate).unwrap());
    assert_eq!(token.issuer_dn(), dn);
    assert_eq!(token.signature_algorithm(), algorithm);
}

#[test]
fn test_cms_fallback_when_ess_attribute_is_missing() {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Relaxed TSA", true);
    let mut spec = TimestampSpec::over_content(b"content");
    spec.with_signing_certificate_attr = false;
    let token_der = timestamp_token(&key, &cert_der, &spec);

    let mut token =
        TimestampToken::from_der(&token_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    let certificate = CertificateToken::from_der(&cert_der).unwrap();

    let validity = token.check_is_signed_by(&certificate).unwrap();
    assert_eq!(validity, SignatureValidity::Valid);
    assert_eq!(
        token.verification_path(),
        Some(TimestampVerificationPath::CmsFallback)
    );
}

#[test]
fn test_cms_fallback_when_eku_is_missing() {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "No EKU TSA", false);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"content"));

    let mut token =
        TimestampToken::from_der(&token_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    let certificate = CertificateToken::from_der(&cert_der).unwrap();

    let validity = token.check_is_signed_by(&certificate).unwrap();
    assert_eq!(validity, SignatureValidity::Valid);
    assert_eq!(
        token.verification_path(),
        Some(TimestampVerificationPath::CmsFallback)
    );
}

#[test]
fn test_wrong_key_is_invalid_with_reason() {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Fixture TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"content"));

    // same subject and serial, different key: the SID matches but the
    // signature cannot verify
    let other_key = TestKey::generate_p256();
    let other_cert_der = tsa_certificate(&other_key, "Fixture TSA", true);

    let mut token =
        TimestampToken::from_der(&token_der, TimestampType::SignatureTimestamp, pool()).unwrap();
    let impostor = CertificateToken::from_der(&other_cert_der).unwrap();

    let validity = token.check_is_signed_by(&impostor).unwrap();
    assert_eq!(validity, SignatureValidity::Invalid);
    assert!(!token.signature_invalidity_reason().is_empty());
    assert!(token.issuer_dn().is_none());
    assert!(token.verification_path().is_none());
}

#[test]
fn test_unrelated_candidate_does_not_match_sid() {
    let (mut token, _) = valid_setup(b"content");

    let stranger_key = TestKey::generate_p256();
    let stranger_der = tsa_certificate(&stranger_key, "Unrelated CA", true);
    let stranger = CertificateToken::from_der(&stranger_der).unwrap();

    let validity = token.check_is_signed_by(&stranger).unwrap();
    assert_eq!(validity, SignatureValidity::Invalid);
    assert!(token.issuer_dn().is_none());
}

#[test]
fn test_pool_receives_embedded_certificates() {
    let shared_pool = pool();
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Pooled TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"data"));

    let token = TimestampToken::from_der(
        &token_der,
        TimestampType::SignatureTimestamp,
        Arc::clone(&shared_pool),
    )
    .unwrap();

    assert_eq!(shared_pool.len(), 1);
    let embedded = &token.certificates()[0];
    assert!(shared_pool.by_id(&embedded.dss_id()).is_some());
}

#[test]
fn test_signer_issuer_serial_infos() {
    let (token, certificate) = valid_setup(b"content");
    let infos = token.signer_issuer_serial_infos();
    assert_eq!(infos.len(), 1);
    assert_eq!(
        infos[0].serial_number,
        certificate.serial_number().as_bytes()
    );
}

#[test]
fn test_document_timestamp_from_pdf_revision() {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "PDF TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"revision"));

    let revision = PdfRevision {
        revision_number: 2,
        byte_range: vec![0, 100, 200, 300],
        field_names: vec!["Signature1".to_string()],
        cms_bytes: token_der,
    };

    let token = TimestampToken::from_pdf_revision(
        revision,
        TimestampType::DocumentTimestamp,
        pool(),
        Some(TimestampLocation::Pades),
    )
    .unwrap();

    assert_eq!(token.timestamp_type(), TimestampType::DocumentTimestamp);
    assert_eq!(token.location(), Some(TimestampLocation::Pades));
    assert_eq!(token.pdf_revision().unwrap().revision_number, 2);
}
