//! End-to-end scenarios over the advanced signature abstraction

use ades_test_fixtures::{timestamp_token, tsa_certificate, TestKey, TimestampSpec};
use ades_tsp::TimestampToken;
use ades_types::{
    Digest, DigestAlgorithm, EncryptionAlgorithm, PdfRevision, SignatureAlgorithm,
    SignatureLevel, SignatureValidity, SignedDocument, TimestampLocation, TimestampType,
};
use ades_validation::{
    AdvancedSignature, CadesData, CollectingValidationContext, Error, FormData, PadesData,
    ReferenceData, ReferenceType, SignaturePolicy, SignaturePolicyProvider, XadesData,
};
use ades_x509::{CertificatePool, CertificateRef, CertificateRefOrigin, CertificateToken, Token};
use std::sync::Arc;

fn pool() -> Arc<CertificatePool> {
    Arc::new(CertificatePool::new())
}

fn ecdsa_sha256() -> SignatureAlgorithm {
    SignatureAlgorithm::new(EncryptionAlgorithm::Ecdsa, DigestAlgorithm::Sha256)
}

/// Build a timestamp of the given type whose imprint covers `content`
fn build_timestamp(
    content: &[u8],
    timestamp_type: TimestampType,
    shared_pool: Arc<CertificatePool>,
) -> TimestampToken {
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Scenario TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(content));
    TimestampToken::from_der(&token_der, timestamp_type, shared_pool).unwrap()
}

/// A CAdES signature whose DTBS really was signed by the embedded
/// certificate's key
fn signed_cades(content: &[u8]) -> (AdvancedSignature, Vec<u8>) {
    let shared_pool = pool();
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "CAdES Signer", true);

    let dtbs = b"re-encoded signed attributes".to_vec();
    let signature_value = key.sign(&dtbs);
    let message_digest = ades_crypto::digest(DigestAlgorithm::Sha256, content);

    let mut signature = AdvancedSignature::new(
        FormData::Cades(CadesData {
            message_digest_value: Some(message_digest.clone()),
            ..CadesData::default()
        }),
        signature_value,
        None,
        Arc::clone(&shared_pool),
    );
    signature.set_signature_algorithm(ecdsa_sha256());
    signature.set_dtbs(dtbs);
    signature
        .certificate_source_mut()
        .add_certificate(CertificateToken::from_der(&cert_der).unwrap());
    signature.set_reference_data(vec![ReferenceData {
        ref_type: ReferenceType::MessageImprint,
        name: None,
        digest_algorithm: DigestAlgorithm::Sha256,
        expected_digest: message_digest,
        data: None,
    }]);
    (signature, cert_der)
}

// ==== CAdES-T happy path ====

#[test]
fn test_cades_t_happy_path() {
    let content = b"signed content";
    let (mut signature, _) = signed_cades(content);
    signature.set_detached_contents(vec![SignedDocument::from_bytes(content.to_vec())]);

    // a signature timestamp over the signature value
    let shared_pool = pool();
    let mut timestamp = build_timestamp(
        signature.signature_value(),
        TimestampType::SignatureTimestamp,
        shared_pool,
    );
    let signature_document = SignedDocument::from_bytes(signature.signature_value().to_vec());
    assert!(timestamp.match_data(Some(&signature_document)));
    signature.timestamp_source_mut().add(timestamp);

    assert_eq!(signature.signature_timestamps().len(), 1);
    assert!(signature.is_data_for_signature_level_present(SignatureLevel::CadesBaselineT));
    assert_eq!(
        signature.data_found_up_to_level(),
        Some(SignatureLevel::CadesBaselineT)
    );

    signature.check_signature_integrity().unwrap();
    let verification = signature.signature_cryptographic_verification().unwrap();
    assert!(verification.signature_intact, "{}", verification.error_message);
    assert!(verification.references_valid);
    assert!(signature.signing_certificate_token().is_some());
}

#[test]
fn test_timestamp_signer_verification_inside_signature() {
    let shared_pool = pool();
    let key = TestKey::generate_p256();
    let cert_der = tsa_certificate(&key, "Inline TSA", true);
    let token_der = timestamp_token(&key, &cert_der, &TimestampSpec::over_content(b"value"));
    let timestamp = TimestampToken::from_der(
        &token_der,
        TimestampType::SignatureTimestamp,
        Arc::clone(&shared_pool),
    )
    .unwrap();

    let (mut signature, _) = signed_cades(b"content");
    signature.timestamp_source_mut().add(timestamp);

    // the TSA certificate came in through the timestamp's own source
    let candidate = CertificateToken::from_der(&cert_der).unwrap();
    for timestamp in signature.timestamp_source_mut().iter_all_mut() {
        let validity = timestamp.check_is_signed_by(&candidate).unwrap();
        assert_eq!(validity, SignatureValidity::Valid);
    }
}

// ==== XAdES-LTA with every bucket ====

#[test]
fn test_xades_lta_buckets_and_levels() {
    let shared_pool = pool();
    let mut signature = AdvancedSignature::new(
        FormData::Xades(XadesData {
            has_certificate_values: true,
            has_revocation_values: true,
            ..XadesData::default()
        }),
        b"xml signature value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );

    let buckets = [
        (b"content data".as_slice(), TimestampType::AllDataObjectsTimestamp),
        (b"signature value".as_slice(), TimestampType::SignatureTimestamp),
        (b"sig and refs".as_slice(), TimestampType::ValidationDataTimestamp),
        (b"refs only".as_slice(), TimestampType::ValidationDataRefsOnlyTimestamp),
        (b"everything".as_slice(), TimestampType::ArchiveTimestamp),
    ];
    for (content, timestamp_type) in buckets {
        let mut timestamp =
            build_timestamp(content, timestamp_type, Arc::clone(&shared_pool));
        if timestamp_type == TimestampType::ArchiveTimestamp {
            timestamp.set_archive_timestamp_type(ades_types::ArchiveTimestampType::Xades141);
        }
        signature.timestamp_source_mut().add(timestamp);
    }

    assert_eq!(signature.content_timestamps().len(), 1);
    assert_eq!(signature.signature_timestamps().len(), 1);
    assert_eq!(signature.timestamps_x1().len(), 1);
    assert_eq!(signature.timestamps_x2().len(), 1);
    assert_eq!(signature.archive_timestamps().len(), 1);
    assert!(signature.document_timestamps().is_empty());

    let all = signature.all_timestamps();
    assert_eq!(all.len(), 5);
    let mut ids: Vec<_> = all.iter().map(|t| t.dss_id()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);

    assert_eq!(
        signature.data_found_up_to_level(),
        Some(SignatureLevel::XadesBaselineLta)
    );

    // level monotonicity over the whole ladder
    let levels = signature.signature_levels();
    for (i, level) in levels.iter().enumerate() {
        if signature.is_data_for_signature_level_present(*level) {
            for lower in &levels[..i] {
                assert!(signature.is_data_for_signature_level_present(*lower));
            }
        }
    }
}

#[test]
fn test_level_data_stops_at_missing_profile() {
    let shared_pool = pool();
    // T present but no LT material
    let mut signature = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        b"value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );
    let timestamp = build_timestamp(
        b"value",
        TimestampType::SignatureTimestamp,
        Arc::clone(&shared_pool),
    );
    signature.timestamp_source_mut().add(timestamp);

    assert!(signature.is_data_for_signature_level_present(SignatureLevel::XadesBaselineT));
    assert!(!signature.is_data_for_signature_level_present(SignatureLevel::XadesBaselineLt));
    assert!(!signature.is_data_for_signature_level_present(SignatureLevel::XadesBaselineLta));
    assert_eq!(
        signature.data_found_up_to_level(),
        Some(SignatureLevel::XadesBaselineT)
    );
}

// ==== PAdES DocTimeStamp chain ====

#[test]
fn test_pades_document_timestamp_chain() {
    let shared_pool = pool();
    let mut signature = AdvancedSignature::new(
        FormData::Pades(PadesData::default()),
        b"pdf signature value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );

    for revision_number in [2u32, 3u32] {
        let key = TestKey::generate_p256();
        let cert_der = tsa_certificate(&key, "Doc TSA", true);
        let token_der = timestamp_token(
            &key,
            &cert_der,
            &TimestampSpec::over_content(format!("revision {revision_number}").as_bytes()),
        );
        let revision = PdfRevision {
            revision_number,
            byte_range: vec![0, 100 * revision_number as i64, 0, 50],
            field_names: vec![format!("DocTimeStamp{revision_number}")],
            cms_bytes: token_der,
        };
        let timestamp = TimestampToken::from_pdf_revision(
            revision,
            TimestampType::DocumentTimestamp,
            Arc::clone(&shared_pool),
            Some(TimestampLocation::Pades),
        )
        .unwrap();
        signature.timestamp_source_mut().add(timestamp);
    }

    let documents = signature.document_timestamps();
    assert_eq!(documents.len(), 2);
    assert!(signature.signature_timestamps().is_empty());
    assert_ne!(
        documents[0].pdf_revision().unwrap().revision_number,
        documents[1].pdf_revision().unwrap().revision_number
    );

    // a document timestamp satisfies PAdES-T
    assert!(signature.is_data_for_signature_level_present(SignatureLevel::PadesBaselineT));
}

// ==== Detached CAdES with missing content ====

#[test]
fn test_detached_content_missing_is_recorded_not_raised() {
    let (mut signature, _) = signed_cades(b"detached content");
    // the caller never provided the detached contents

    signature.check_signature_integrity().unwrap();
    let verification = signature.signature_cryptographic_verification().unwrap();
    assert!(!verification.signature_intact);
    assert!(!verification.references_valid);
    assert!(!verification.error_message.is_empty());

    let references = signature.reference_validations();
    assert_eq!(references.len(), 1);
    assert!(!references[0].found);
}

// ==== Substitution attack on the certificate bag ====

#[test]
fn test_signing_certificate_substitution_blocks_election() {
    let shared_pool = pool();
    let key = TestKey::generate_p256();
    let keyinfo_cert_der = tsa_certificate(&key, "KeyInfo Certificate", true);
    let (_, unrelated_der) = {
        let other = TestKey::generate_p256();
        let der = tsa_certificate(&other, "Referenced Certificate", true);
        (other, der)
    };

    let dtbs = b"canonicalized signed info".to_vec();
    let signature_value = key.sign(&dtbs);

    let mut signature = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        signature_value,
        None,
        Arc::clone(&shared_pool),
    );
    signature.set_signature_algorithm(ecdsa_sha256());
    signature.set_dtbs(dtbs);
    signature
        .certificate_source_mut()
        .add_certificate(CertificateToken::from_der(&keyinfo_cert_der).unwrap());

    // the signed SigningCertificate property references a different
    // certificate than the one present in KeyInfo
    signature.add_signing_certificate_ref(CertificateRef {
        certificate_digest: Digest::new(
            DigestAlgorithm::Sha256,
            ades_crypto::digest(DigestAlgorithm::Sha256, &unrelated_der),
        ),
        issuer_serial: None,
        origin: CertificateRefOrigin::SigningCertificateAttribute,
    });

    signature.check_signing_certificate();
    signature.check_signature_integrity().unwrap();

    assert!(!signature.candidates_for_signing_certificate().is_empty());
    assert!(signature.signing_certificate_token().is_none());
    let verification = signature.signature_cryptographic_verification().unwrap();
    assert!(!verification.signature_intact);
    assert!(!verification.error_message.is_empty());
}

// ==== Merged sources ====

#[test]
fn test_complete_certificate_source_merges_timestamp_material() {
    let shared_pool = pool();
    let (mut signature, signer_cert_der) = signed_cades(b"content");
    let timestamp = build_timestamp(
        b"anything",
        TimestampType::SignatureTimestamp,
        Arc::clone(&shared_pool),
    );
    let timestamp_cert_id = timestamp.certificates()[0].dss_id();
    signature.timestamp_source_mut().add(timestamp);

    let complete = signature.complete_certificate_source();
    let signer_id = CertificateToken::from_der(&signer_cert_der).unwrap().dss_id();
    assert!(complete.contains(&signer_id));
    assert!(complete.contains(&timestamp_cert_id));
    assert_eq!(complete.len(), 2);
    assert_eq!(complete.num_sources(), 2);

    // every fixture certificate is self-signed
    assert!(signature.are_all_self_signed_certificates());
}

// ==== Counter-signatures ====

#[test]
fn test_counter_signature_duality() {
    let shared_pool = pool();
    let mut master = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        b"master value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );
    let counter = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        b"counter value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );

    master.add_counter_signature(counter).unwrap();
    let master_id = master.dss_id();
    let linked = &master.counter_signatures()[0];
    assert_eq!(linked.master_signature_id(), Some(master_id));
}

#[test]
fn test_counter_signature_cycle_is_rejected() {
    let shared_pool = pool();
    let mut master = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        b"same value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );
    // identical form, value and signing time produce the identical id
    let twin = AdvancedSignature::new(
        FormData::Xades(XadesData::default()),
        b"same value".to_vec(),
        None,
        Arc::clone(&shared_pool),
    );

    assert!(matches!(
        master.add_counter_signature(twin),
        Err(Error::CounterSignatureCycle)
    ));
}

// ==== External timestamps ====

#[test]
fn test_external_timestamp_must_be_processed() {
    let shared_pool = pool();
    let (mut signature, _) = signed_cades(b"content");

    let unprocessed = build_timestamp(
        b"archive material",
        TimestampType::ArchiveTimestamp,
        Arc::clone(&shared_pool),
    );
    assert!(matches!(
        signature.add_external_timestamp(unprocessed),
        Err(Error::IllegalState(_))
    ));

    let mut processed = build_timestamp(
        b"archive material",
        TimestampType::ArchiveTimestamp,
        Arc::clone(&shared_pool),
    );
    let document = SignedDocument::from_bytes(b"archive material".to_vec());
    assert!(processed.match_data(Some(&document)));
    signature.add_external_timestamp(processed).unwrap();
    assert_eq!(signature.archive_timestamps().len(), 1);
}

// ==== Validation context ====

#[test]
fn test_prepare_timestamps_feeds_the_context() {
    let shared_pool = pool();
    let (mut signature, _) = signed_cades(b"content");
    signature.timestamp_source_mut().add(build_timestamp(
        b"one",
        TimestampType::SignatureTimestamp,
        Arc::clone(&shared_pool),
    ));
    signature.timestamp_source_mut().add(build_timestamp(
        b"two",
        TimestampType::ArchiveTimestamp,
        Arc::clone(&shared_pool),
    ));

    let mut context = CollectingValidationContext::new();
    signature.prepare_timestamps(&mut context);

    assert_eq!(context.timestamps.len(), 2);
    // each fixture timestamp embeds its TSA certificate
    assert_eq!(context.certificates.len(), 2);
}

// ==== Policy, scopes, structure ====

struct FixedPolicyStore;

impl SignaturePolicyProvider for FixedPolicyStore {
    fn resolve(&self, identifier: &str) -> Option<SignaturePolicy> {
        (identifier == "1.2.3.4").then(|| SignaturePolicy {
            identifier: identifier.to_string(),
            description: Some("fixture policy".to_string()),
            url: None,
            digest: None,
        })
    }
}

#[test]
fn test_policy_resolution() {
    let (mut signature, _) = signed_cades(b"content");
    signature.set_policy_identifier("1.2.3.4");
    signature.check_signature_policy(&FixedPolicyStore);
    assert_eq!(signature.policy().unwrap().identifier, "1.2.3.4");

    let (mut unknown, _) = signed_cades(b"content");
    unknown.set_policy_identifier("9.9.9");
    unknown.check_signature_policy(&FixedPolicyStore);
    assert!(unknown.policy().is_none());
}

#[test]
fn test_structure_validation_records_issues() {
    let shared_pool = pool();
    let mut incomplete = AdvancedSignature::new(
        FormData::Cades(CadesData::default()),
        Vec::new(),
        None,
        shared_pool,
    );
    assert!(incomplete.structure_validation_result().is_none());

    incomplete.validate_structure();
    let result = incomplete.structure_validation_result().unwrap();
    assert!(result.contains("signature value"));
    assert!(result.contains("message-digest"));

    let (mut sound, _) = signed_cades(b"content");
    sound.validate_structure();
    assert_eq!(sound.structure_validation_result(), Some(""));
}

#[test]
fn test_doc_hash_only_and_hash_only_modes() {
    let (mut signature, _) = signed_cades(b"content");
    assert!(!signature.is_doc_hash_only_validation());
    assert!(!signature.is_hash_only_validation());

    signature.set_detached_contents(vec![SignedDocument::digest_only(
        Some("payload.bin".to_string()),
        vec![Digest::new(DigestAlgorithm::Sha256, vec![0u8; 32])],
    )]);
    assert!(signature.is_doc_hash_only_validation());

    let shared_pool = pool();
    let mut hash_only = AdvancedSignature::new(
        FormData::Cades(CadesData::default()),
        b"value".to_vec(),
        None,
        shared_pool,
    );
    hash_only.set_dtbsr(Digest::new(DigestAlgorithm::Sha256, vec![1u8; 32]));
    assert!(hash_only.is_hash_only_validation());
}
