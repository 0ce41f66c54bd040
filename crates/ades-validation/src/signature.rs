//! The format-agnostic advanced signature abstraction
//!
//! XAdES, CAdES and PAdES signatures are treated the same: a common core
//! holds the shared state and a tagged variant carries the few
//! format-specific payloads. Instances are produced by external parsers,
//! mutated through the enumerated setters, validated, then treated as
//! read-only evidence containers.

use crate::candidates::{
    CandidateOrigin, CandidatesForSigningCertificate, CertificateValidity,
};
use crate::context::ValidationContext;
use crate::error::{Error, Result};
use crate::policy::{SignaturePolicy, SignaturePolicyProvider};
use crate::properties::{
    CommitmentTypeIndication, SignatureDigestReference, SignatureProductionPlace, SignerRole,
    SignerRoleCategory,
};
use crate::scope::SignatureScopeFinder;
use crate::timestamp_source::TimestampSource;
use crate::verification::{
    ReferenceData, ReferenceValidation, SignatureCryptographicVerification,
};
use ades_crypto::VerificationKey;
use ades_tsp::TimestampToken;
use ades_types::{
    CertificateSourceType, Digest, DigestAlgorithm, DssId, EncryptionAlgorithm, ManifestFile,
    MaskGenerationFunction, PdfRevision, SignatureAlgorithm, SignatureForm, SignatureLevel,
    SignatureScope, SignedDocument,
};
use ades_x509::{
    CertificatePool, CertificateRef, CertificateSource, CertificateToken, CrlSource,
    IssuerSerialInfo, ListCertificateSource, ListCrlSource, ListOcspSource, OcspSource, Token,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// XAdES-specific payload
#[derive(Debug, Clone, Default)]
pub struct XadesData {
    /// Identifier assigned by the driving application
    pub da_identifier: Option<String>,
    /// Canonicalization method of the ds:Signature element
    pub canonicalization_method: Option<String>,
    /// CertificateValues unsigned property present
    pub has_certificate_values: bool,
    /// RevocationValues unsigned property present
    pub has_revocation_values: bool,
}

/// CAdES-specific payload
#[derive(Debug, Clone, Default)]
pub struct CadesData {
    /// Value of the message-digest signed attribute
    pub message_digest_value: Option<Vec<u8>>,
    /// Issuer and serial of each SignerInfo in the CMS
    pub signer_infos: Vec<IssuerSerialInfo>,
    /// certificate-values unsigned attribute present
    pub has_certificate_values: bool,
    /// revocation-values unsigned attribute present
    pub has_revocation_values: bool,
}

/// PAdES-specific payload
#[derive(Debug, Clone, Default)]
pub struct PadesData {
    /// The PDF revision carrying this signature
    pub pdf_revision: Option<PdfRevision>,
    /// A DSS dictionary is present in a later revision
    pub has_dss_dictionary: bool,
}

/// Format-specific payload of a signature
#[derive(Debug, Clone)]
pub enum FormData {
    /// XML-DSig based signature
    Xades(XadesData),
    /// CMS based signature
    Cades(CadesData),
    /// PDF based signature
    Pades(PadesData),
}

impl FormData {
    /// The signature form of this payload
    pub fn form(&self) -> SignatureForm {
        match self {
            FormData::Xades(_) => SignatureForm::Xades,
            FormData::Cades(_) => SignatureForm::Cades,
            FormData::Pades(_) => SignatureForm::Pades,
        }
    }
}

/// Format-agnostic abstraction of one advanced electronic signature
pub struct AdvancedSignature {
    id: DssId,
    form_data: FormData,
    signature_value: Vec<u8>,
    signing_time: Option<DateTime<Utc>>,
    signature_algorithm: Option<SignatureAlgorithm>,

    signature_filename: Option<String>,
    detached_contents: Vec<SignedDocument>,
    container_contents: Vec<SignedDocument>,
    manifest_files: Vec<ManifestFile>,
    provided_signing_certificate: Option<Arc<CertificateToken>>,

    signer_roles: Vec<SignerRole>,
    commitment_type_indications: Vec<CommitmentTypeIndication>,
    production_place: Option<SignatureProductionPlace>,
    policy_identifier: Option<String>,
    policy: Option<SignaturePolicy>,
    content_type: Option<String>,
    mime_type: Option<String>,
    content_identifier: Option<String>,
    content_hints: Option<String>,

    certificate_source: CertificateSource,
    crl_source: CrlSource,
    ocsp_source: OcspSource,
    timestamp_source: TimestampSource,
    signing_certificate_refs: Vec<CertificateRef>,

    /// The data the signature value is computed over, as reconstructed by
    /// the parser (canonicalized SignedInfo, re-encoded signed attributes)
    dtbs: Option<Vec<u8>>,
    /// Pre-hashed variant when only the DTBSR is available
    dtbsr: Option<Digest>,
    /// The raw signature element, for digest references over the signature
    signature_binary: Option<Vec<u8>>,
    reference_data: Vec<ReferenceData>,

    reference_validations: Vec<ReferenceValidation>,
    crypto_verification: Option<SignatureCryptographicVerification>,
    candidates: Option<CandidatesForSigningCertificate>,
    signing_certificate_mismatch: bool,
    structure_validation: Option<String>,
    signature_scopes: Vec<SignatureScope>,

    counter_signatures: Vec<AdvancedSignature>,
    master_signature_id: Option<DssId>,
}

impl AdvancedSignature {
    /// Create a signature shell for the parser to populate.
    ///
    /// The identifier is derived from the form, the signature value and the
    /// signing time, so re-parsing the same container yields the same id.
    pub fn new(
        form_data: FormData,
        signature_value: Vec<u8>,
        signing_time: Option<DateTime<Utc>>,
        pool: Arc<CertificatePool>,
    ) -> Self {
        let form = form_data.form();
        let time_part = signing_time
            .map(|t| t.timestamp().to_be_bytes().to_vec())
            .unwrap_or_default();
        let id = DssId::from_parts(&[
            form.to_string().as_bytes(),
            &signature_value,
            &time_part,
        ]);

        Self {
            id,
            form_data,
            signature_value,
            signing_time,
            signature_algorithm: None,
            signature_filename: None,
            detached_contents: Vec::new(),
            container_contents: Vec::new(),
            manifest_files: Vec::new(),
            provided_signing_certificate: None,
            signer_roles: Vec::new(),
            commitment_type_indications: Vec::new(),
            production_place: None,
            policy_identifier: None,
            policy: None,
            content_type: None,
            mime_type: None,
            content_identifier: None,
            content_hints: None,
            certificate_source: CertificateSource::new(CertificateSourceType::Signature, pool),
            crl_source: CrlSource::new(CertificateSourceType::Signature),
            ocsp_source: OcspSource::new(CertificateSourceType::Signature),
            timestamp_source: TimestampSource::new(),
            signing_certificate_refs: Vec::new(),
            dtbs: None,
            dtbsr: None,
            signature_binary: None,
            reference_data: Vec::new(),
            reference_validations: Vec::new(),
            crypto_verification: None,
            candidates: None,
            signing_certificate_mismatch: false,
            structure_validation: None,
            signature_scopes: Vec::new(),
            counter_signatures: Vec::new(),
            master_signature_id: None,
        }
    }

    // ---- identity and metadata ----------------------------------------

    /// Unique signature identifier
    pub fn dss_id(&self) -> DssId {
        self.id
    }

    /// The identifier as a string
    pub fn id(&self) -> String {
        self.id.to_hex()
    }

    /// Identifier assigned by the driving application (XAdES only)
    pub fn da_identifier(&self) -> Option<&str> {
        match &self.form_data {
            FormData::Xades(data) => data.da_identifier.as_deref(),
            _ => None,
        }
    }

    /// Set the driving-application identifier (XAdES only)
    pub fn set_da_identifier(&mut self, identifier: impl Into<String>) {
        if let FormData::Xades(data) = &mut self.form_data {
            data.da_identifier = Some(identifier.into());
        }
    }

    /// The container format of this signature
    pub fn signature_form(&self) -> SignatureForm {
        self.form_data.form()
    }

    /// Format-specific payload
    pub fn form_data(&self) -> &FormData {
        &self.form_data
    }

    /// Mutable format-specific payload, for the parser
    pub fn form_data_mut(&mut self) -> &mut FormData {
        &mut self.form_data
    }

    /// Signature filename (ASiC and multi-signature containers)
    pub fn signature_filename(&self) -> Option<&str> {
        self.signature_filename.as_deref()
    }

    /// Set the signature filename
    pub fn set_signature_filename(&mut self, filename: impl Into<String>) {
        self.signature_filename = Some(filename.into());
    }

    /// The resolved signature algorithm
    pub fn signature_algorithm(&self) -> Option<SignatureAlgorithm> {
        self.signature_algorithm
    }

    /// Set the signature algorithm extracted by the parser
    pub fn set_signature_algorithm(&mut self, algorithm: SignatureAlgorithm) {
        self.signature_algorithm = Some(algorithm);
    }

    /// Encryption algorithm of the signature
    pub fn encryption_algorithm(&self) -> Option<EncryptionAlgorithm> {
        self.signature_algorithm.map(|a| a.encryption)
    }

    /// Digest algorithm of the signature
    pub fn digest_algorithm(&self) -> Option<DigestAlgorithm> {
        self.signature_algorithm.map(|a| a.digest)
    }

    /// Mask generation function, for parametric schemes
    pub fn mask_generation_function(&self) -> Option<MaskGenerationFunction> {
        self.signature_algorithm.and_then(|a| a.mask_generation)
    }

    /// Claimed signing time
    pub fn signing_time(&self) -> Option<DateTime<Utc>> {
        self.signing_time
    }

    /// The digital signature value
    pub fn signature_value(&self) -> &[u8] {
        &self.signature_value
    }

    // ---- payload linkage ----------------------------------------------

    /// Signed contents of a detached signature
    pub fn detached_contents(&self) -> &[SignedDocument] {
        &self.detached_contents
    }

    /// Provide the signed contents of a detached signature
    pub fn set_detached_contents(&mut self, contents: Vec<SignedDocument>) {
        self.detached_contents = contents;
    }

    /// Container documents of an ASiC signature
    pub fn container_contents(&self) -> &[SignedDocument] {
        &self.container_contents
    }

    /// Provide the container documents of an ASiC signature
    pub fn set_container_contents(&mut self, contents: Vec<SignedDocument>) {
        self.container_contents = contents;
    }

    /// Manifest files of an ASiC-E signature
    pub fn manifest_files(&self) -> &[ManifestFile] {
        &self.manifest_files
    }

    /// Provide the manifest files of an ASiC-E signature
    pub fn set_manifest_files(&mut self, manifests: Vec<ManifestFile>) {
        self.manifest_files = manifests;
    }

    /// Container documents referenced by the manifests of this signature
    pub fn manifested_documents(&self) -> Vec<&SignedDocument> {
        self.manifest_files
            .iter()
            .flat_map(|manifest| manifest.entries.iter())
            .filter_map(|entry| {
                self.container_contents
                    .iter()
                    .find(|doc| doc.name() == Some(entry.as_str()))
            })
            .collect()
    }

    /// The signing certificate supplied by the caller, if any
    pub fn provided_signing_certificate_token(&self) -> Option<&Arc<CertificateToken>> {
        self.provided_signing_certificate.as_ref()
    }

    /// Provide a signing certificate for signatures that do not embed one
    pub fn set_provided_signing_certificate_token(&mut self, token: Arc<CertificateToken>) {
        self.provided_signing_certificate = Some(token);
        self.candidates = None;
    }

    /// The data the signature value is computed over
    pub fn set_dtbs(&mut self, dtbs: Vec<u8>) {
        self.dtbs = Some(dtbs);
    }

    /// The pre-hashed data to be signed representation
    pub fn set_dtbsr(&mut self, dtbsr: Digest) {
        self.dtbsr = Some(dtbsr);
    }

    /// The raw signature element bytes
    pub fn set_signature_binary(&mut self, binary: Vec<u8>) {
        self.signature_binary = Some(binary);
    }

    /// Parser-supplied inputs for the reference checks
    pub fn set_reference_data(&mut self, references: Vec<ReferenceData>) {
        self.reference_data = references;
    }

    /// Record a signed signing-certificate reference
    pub fn add_signing_certificate_ref(&mut self, reference: CertificateRef) {
        self.signing_certificate_refs.push(reference);
        self.candidates = None;
    }

    /// The signed signing-certificate references
    pub fn signing_certificate_refs(&self) -> &[CertificateRef] {
        &self.signing_certificate_refs
    }

    /// Value of the CAdES message-digest attribute
    pub fn message_digest_value(&self) -> Option<&[u8]> {
        match &self.form_data {
            FormData::Cades(data) => data.message_digest_value.as_deref(),
            _ => None,
        }
    }

    /// Issuer and serial of each SignerInfo (CAdES only)
    pub fn signer_information_store_infos(&self) -> &[IssuerSerialInfo] {
        match &self.form_data {
            FormData::Cades(data) => &data.signer_infos,
            _ => &[],
        }
    }

    /// The PDF revision carrying this signature (PAdES only)
    pub fn pdf_revision(&self) -> Option<&PdfRevision> {
        match &self.form_data {
            FormData::Pades(data) => data.pdf_revision.as_ref(),
            _ => None,
        }
    }

    // ---- signed properties --------------------------------------------

    /// All signer roles, claimed and certified
    pub fn signer_roles(&self) -> &[SignerRole] {
        &self.signer_roles
    }

    /// Roles merely claimed by the signer
    pub fn claimed_signer_roles(&self) -> Vec<&SignerRole> {
        self.signer_roles
            .iter()
            .filter(|r| r.category == SignerRoleCategory::Claimed)
            .collect()
    }

    /// Roles certified by an attribute certificate
    pub fn certified_signer_roles(&self) -> Vec<&SignerRole> {
        self.signer_roles
            .iter()
            .filter(|r| r.category == SignerRoleCategory::Certified)
            .collect()
    }

    /// Record a signer role
    pub fn add_signer_role(&mut self, role: SignerRole) {
        self.signer_roles.push(role);
    }

    /// Commitment type indications
    pub fn commitment_type_indications(&self) -> &[CommitmentTypeIndication] {
        &self.commitment_type_indications
    }

    /// Record a commitment type indication
    pub fn add_commitment_type_indication(&mut self, indication: CommitmentTypeIndication) {
        self.commitment_type_indications.push(indication);
    }

    /// Claimed production place
    pub fn signature_production_place(&self) -> Option<&SignatureProductionPlace> {
        self.production_place.as_ref()
    }

    /// Set the claimed production place
    pub fn set_signature_production_place(&mut self, place: SignatureProductionPlace) {
        self.production_place = Some(place);
    }

    /// Signature policy identifier carried by the signature
    pub fn policy_identifier(&self) -> Option<&str> {
        self.policy_identifier.as_deref()
    }

    /// Set the signature policy identifier
    pub fn set_policy_identifier(&mut self, identifier: impl Into<String>) {
        self.policy_identifier = Some(identifier.into());
    }

    /// Content-type signed attribute
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Set the content-type signed attribute
    pub fn set_content_type(&mut self, value: impl Into<String>) {
        self.content_type = Some(value.into());
    }

    /// Mime-type attribute
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Set the mime-type attribute
    pub fn set_mime_type(&mut self, value: impl Into<String>) {
        self.mime_type = Some(value.into());
    }

    /// Content identifier attribute
    pub fn content_identifier(&self) -> Option<&str> {
        self.content_identifier.as_deref()
    }

    /// Set the content identifier attribute
    pub fn set_content_identifier(&mut self, value: impl Into<String>) {
        self.content_identifier = Some(value.into());
    }

    /// Content hints attribute
    pub fn content_hints(&self) -> Option<&str> {
        self.content_hints.as_deref()
    }

    /// Set the content hints attribute
    pub fn set_content_hints(&mut self, value: impl Into<String>) {
        self.content_hints = Some(value.into());
    }

    // ---- embedded material --------------------------------------------

    /// Certificates embedded in the signature
    pub fn certificate_source(&self) -> &CertificateSource {
        &self.certificate_source
    }

    /// Mutable certificate source, for the parser
    pub fn certificate_source_mut(&mut self) -> &mut CertificateSource {
        &mut self.certificate_source
    }

    /// Certificates embedded in the signature, as tokens
    pub fn certificates(&self) -> &[Arc<CertificateToken>] {
        self.certificate_source.certificates()
    }

    /// CRLs embedded in the signature
    pub fn crl_source(&self) -> &CrlSource {
        &self.crl_source
    }

    /// Mutable CRL source, for the parser
    pub fn crl_source_mut(&mut self) -> &mut CrlSource {
        &mut self.crl_source
    }

    /// OCSP responses embedded in the signature
    pub fn ocsp_source(&self) -> &OcspSource {
        &self.ocsp_source
    }

    /// Mutable OCSP source, for the parser
    pub fn ocsp_source_mut(&mut self) -> &mut OcspSource {
        &mut self.ocsp_source
    }

    /// Merged certificate view: the signature's source plus the source of
    /// every nested timestamp
    pub fn complete_certificate_source(&self) -> ListCertificateSource {
        let mut list = ListCertificateSource::new();
        list.add_source(&self.certificate_source);
        for timestamp in self.timestamp_source.iter_all() {
            list.add_source(timestamp.certificate_source());
        }
        list
    }

    /// Merged CRL view across the signature and its timestamps
    pub fn complete_crl_source(&self) -> ListCrlSource {
        let mut list = ListCrlSource::new();
        list.add_source(&self.crl_source);
        for timestamp in self.timestamp_source.iter_all() {
            list.add_source(timestamp.crl_source());
        }
        list
    }

    /// Merged OCSP view across the signature and its timestamps
    pub fn complete_ocsp_source(&self) -> ListOcspSource {
        let mut list = ListOcspSource::new();
        list.add_source(&self.ocsp_source);
        for timestamp in self.timestamp_source.iter_all() {
            list.add_source(timestamp.ocsp_source());
        }
        list
    }

    /// True when every certificate across the signature and its timestamps
    /// is self-signed
    pub fn are_all_self_signed_certificates(&self) -> bool {
        let list = self.complete_certificate_source();
        !list.is_empty() && list.all_certificates().iter().all(|c| c.is_self_signed())
    }

    // ---- timestamps ----------------------------------------------------

    /// The timestamp source of this signature
    pub fn timestamp_source(&self) -> &TimestampSource {
        &self.timestamp_source
    }

    /// Mutable timestamp source, for the parser and for running the
    /// per-timestamp verifications
    pub fn timestamp_source_mut(&mut self) -> &mut TimestampSource {
        &mut self.timestamp_source
    }

    /// Timestamps over content prior to signing
    pub fn content_timestamps(&self) -> &[TimestampToken] {
        self.timestamp_source.content_timestamps()
    }

    /// Timestamps over the signature value
    pub fn signature_timestamps(&self) -> &[TimestampToken] {
        self.timestamp_source.signature_timestamps()
    }

    /// SigAndRefs timestamps (X1)
    pub fn timestamps_x1(&self) -> &[TimestampToken] {
        self.timestamp_source.timestamps_x1()
    }

    /// RefsOnly timestamps (X2)
    pub fn timestamps_x2(&self) -> &[TimestampToken] {
        self.timestamp_source.timestamps_x2()
    }

    /// Archive timestamps
    pub fn archive_timestamps(&self) -> &[TimestampToken] {
        self.timestamp_source.archive_timestamps()
    }

    /// PAdES DocTimeStamp revisions
    pub fn document_timestamps(&self) -> &[TimestampToken] {
        self.timestamp_source.document_timestamps()
    }

    /// Every timestamp, deduplicated by identity
    pub fn all_timestamps(&self) -> Vec<&TimestampToken> {
        self.timestamp_source.all_timestamps()
    }

    /// Attach an already-processed external timestamp
    pub fn add_external_timestamp(&mut self, timestamp: TimestampToken) -> Result<()> {
        self.timestamp_source.add_external_timestamp(timestamp)
    }

    /// Emit every owned timestamp and its embedded material into the
    /// validation context. Side effect only.
    pub fn prepare_timestamps(&self, context: &mut dyn ValidationContext) {
        for timestamp in self.timestamp_source.iter_all() {
            context.add_timestamp_token(timestamp);
            for certificate in timestamp.certificates() {
                context.add_certificate_token(certificate);
            }
            for crl in timestamp.crl_source().crls() {
                context.add_crl(crl);
            }
            for response in timestamp.ocsp_source().ocsp_responses() {
                context.add_ocsp_response(response);
            }
        }
    }

    // ---- integrity -----------------------------------------------------

    /// Verify the signature integrity: recompute the reference digests,
    /// verify the signature value against the signing-certificate
    /// candidates and elect the one that verifies.
    ///
    /// Evidential failures (missing detached content, mismatching digests,
    /// a signature that does not verify) are recorded on the returned
    /// evidence, never raised; only crypto backend faults surface as `Err`.
    pub fn check_signature_integrity(&mut self) -> Result<()> {
        let mut verification = SignatureCryptographicVerification::default();

        self.reference_validations = self.compute_reference_validations();
        let references_valid = self
            .reference_validations
            .iter()
            .all(|r| r.found && r.intact);
        verification.references_valid = references_valid;
        if let Some(missing) = self.reference_validations.iter().find(|r| !r.found) {
            verification.error_message = format!(
                "referenced data not found: {}",
                missing.name.as_deref().unwrap_or("<unnamed>")
            );
        }

        self.signing_certificate_mismatch = self.detect_signing_certificate_mismatch();
        self.ensure_candidates();

        let signature_value = self.signature_value.clone();
        let algorithm = self.signature_algorithm;
        let dtbs = self.dtbs.clone();
        let dtbsr = self.dtbsr.clone();
        let mismatch = self.signing_certificate_mismatch;
        let has_refs = !self.signing_certificate_refs.is_empty();

        let candidates = self
            .candidates
            .as_mut()
            .expect("candidates resolved above");

        let mut elected: Option<usize> = None;
        if candidates.is_empty() {
            if verification.error_message.is_empty() {
                verification.error_message =
                    "no candidate for the signing certificate".to_string();
            }
        } else if algorithm.is_none() {
            verification.error_message =
                "the signature algorithm could not be determined".to_string();
        } else if dtbs.is_none() && dtbsr.is_none() {
            verification.error_message =
                "the data to be signed is not available".to_string();
        } else {
            let algorithm = algorithm.expect("checked above");
            for (index, candidate) in candidates.candidates_mut().iter_mut().enumerate() {
                let Some(certificate) = candidate.certificate.clone() else {
                    continue;
                };
                let spki = match certificate.spki_der() {
                    Ok(spki) => spki,
                    Err(e) => {
                        tracing::warn!("cannot read candidate public key: {e}");
                        continue;
                    }
                };
                let key = VerificationKey::from_spki(&spki, &algorithm)?;
                let verified = match (&dtbs, &dtbsr) {
                    (Some(data), _) => key.verify(data, &signature_value).is_ok(),
                    (None, Some(digest)) => {
                        key.verify_prehashed(digest, &signature_value).is_ok()
                    }
                    (None, None) => false,
                };
                if verified {
                    candidate.valid = true;
                    let electable = candidate.origin == CandidateOrigin::Provided
                        || !has_refs
                        || (candidate.digest_equal && !mismatch);
                    if electable && elected.is_none() {
                        elected = Some(index);
                    }
                }
            }
        }

        let crypto_ok = if let Some(index) = elected {
            candidates.elect(index);
            verification.signing_certificate = candidates.elected_certificate();
            true
        } else {
            if verification.error_message.is_empty() {
                verification.error_message = if mismatch {
                    "the signed signing-certificate reference does not match any embedded certificate".to_string()
                } else {
                    "the signature value could not be verified with any candidate certificate"
                        .to_string()
                };
            }
            false
        };

        verification.signature_intact = crypto_ok && references_valid;
        self.crypto_verification = Some(verification);
        Ok(())
    }

    /// Evidence collected by the last `check_signature_integrity`
    pub fn signature_cryptographic_verification(
        &self,
    ) -> Option<&SignatureCryptographicVerification> {
        self.crypto_verification.as_ref()
    }

    /// Individual validation for each signed reference (XAdES) or for the
    /// message-imprint (CAdES)
    pub fn reference_validations(&self) -> &[ReferenceValidation] {
        &self.reference_validations
    }

    fn compute_reference_validations(&self) -> Vec<ReferenceValidation> {
        self.reference_data
            .iter()
            .map(|reference| {
                let document = match &reference.name {
                    Some(name) => self
                        .detached_contents
                        .iter()
                        .find(|doc| doc.name() == Some(name.as_str())),
                    None => self.detached_contents.first(),
                };
                let computed: Option<Vec<u8>> = reference
                    .data
                    .as_ref()
                    .map(|bytes| ades_crypto::digest(reference.digest_algorithm, bytes))
                    .or_else(|| {
                        document.and_then(|doc| {
                            ades_crypto::digest_document(doc, reference.digest_algorithm)
                        })
                    });

                match computed {
                    Some(digest) => ReferenceValidation {
                        ref_type: reference.ref_type,
                        name: reference.name.clone(),
                        digest: Some(Digest::new(
                            reference.digest_algorithm,
                            reference.expected_digest.clone(),
                        )),
                        found: true,
                        intact: digest == reference.expected_digest,
                    },
                    None => ReferenceValidation {
                        ref_type: reference.ref_type,
                        name: reference.name.clone(),
                        digest: Some(Digest::new(
                            reference.digest_algorithm,
                            reference.expected_digest.clone(),
                        )),
                        found: false,
                        intact: false,
                    },
                }
            })
            .collect()
    }

    // ---- signing certificate ------------------------------------------

    /// The signing-certificate candidates; never absent once resolved.
    ///
    /// Every candidate references a certificate from the pool plus an
    /// attestation of how it was derived.
    pub fn candidates_for_signing_certificate(&mut self) -> &CandidatesForSigningCertificate {
        self.ensure_candidates();
        self.candidates.as_ref().expect("candidates resolved above")
    }

    /// The elected signing certificate.
    ///
    /// `check_signature_integrity` must have been called for the returned
    /// value to be meaningful.
    pub fn signing_certificate_token(&self) -> Option<Arc<CertificateToken>> {
        self.candidates
            .as_ref()
            .and_then(|c| c.elected_certificate())
    }

    /// Check the protection of the embedded certificates against the
    /// substitution attack: a signed signing-certificate reference whose
    /// digest matches no embedded certificate means the KeyInfo set or the
    /// CMS certificates bag was altered.
    pub fn check_signing_certificate(&mut self) {
        self.signing_certificate_mismatch = self.detect_signing_certificate_mismatch();
        if self.signing_certificate_mismatch {
            tracing::warn!(
                "signed signing-certificate reference does not match the embedded certificates"
            );
        }
        self.ensure_candidates();
    }

    fn detect_signing_certificate_mismatch(&self) -> bool {
        self.signing_certificate_refs.iter().any(|reference| {
            self.certificate_source
                .find_by_digest(
                    reference.certificate_digest.algorithm,
                    &reference.certificate_digest.value,
                )
                .is_none()
        })
    }

    fn ensure_candidates(&mut self) {
        if self.candidates.is_some() {
            return;
        }
        let mut candidates = CandidatesForSigningCertificate::new();

        if let Some(provided) = &self.provided_signing_certificate {
            candidates.add(CertificateValidity::provided(Arc::clone(provided)));
        }

        for reference in &self.signing_certificate_refs {
            let resolved = self.certificate_source.find_by_digest(
                reference.certificate_digest.algorithm,
                &reference.certificate_digest.value,
            );
            let issuer_serial_equal = match (&reference.issuer_serial, &resolved) {
                (Some(info), Some(certificate)) => {
                    certificate.issuer_dn().as_deref() == Some(info.issuer_name.as_str())
                        && certificate.serial_number().as_bytes() == info.serial_number
                }
                _ => false,
            };
            candidates.add(CertificateValidity {
                digest_present: true,
                digest_equal: resolved.is_some(),
                issuer_serial_present: reference.issuer_serial.is_some(),
                issuer_serial_equal,
                certificate: resolved,
                origin: CandidateOrigin::SigningCertificateAttribute,
                valid: false,
            });
        }

        for certificate in self.certificate_source.certificates() {
            if !candidates.contains_certificate(certificate.dss_id()) {
                candidates.add(CertificateValidity::from_source(Arc::clone(certificate)));
            }
        }

        self.candidates = Some(candidates);
    }

    // ---- scope, structure, policy -------------------------------------

    /// Delegate scope discovery to the injected strategy
    pub fn find_signature_scope(&mut self, finder: &dyn SignatureScopeFinder) {
        self.signature_scopes = finder.find_signature_scope(self);
    }

    /// The discovered signature scopes
    pub fn signature_scopes(&self) -> &[SignatureScope] {
        &self.signature_scopes
    }

    /// Run format-specific structural checks, recording the outcome
    pub fn validate_structure(&mut self) {
        let mut issues: Vec<String> = Vec::new();
        if self.signature_value.is_empty() {
            issues.push("the signature value is empty".to_string());
        }
        match &self.form_data {
            FormData::Xades(_) => {
                if self.reference_data.is_empty() {
                    issues.push("no ds:Reference is present".to_string());
                }
            }
            FormData::Cades(data) => {
                if data.message_digest_value.is_none() {
                    issues.push("the message-digest attribute is missing".to_string());
                }
            }
            FormData::Pades(data) => {
                if data.pdf_revision.is_none() {
                    issues.push("no PDF revision is attached".to_string());
                }
            }
        }
        self.structure_validation = Some(issues.join("; "));
    }

    /// Outcome of `validate_structure`: `None` when it never ran, an empty
    /// string when the structure is sound, the issue list otherwise
    pub fn structure_validation_result(&self) -> Option<&str> {
        self.structure_validation.as_deref()
    }

    /// Resolve the policy identifier against the provided policy store
    pub fn check_signature_policy(&mut self, provider: &dyn SignaturePolicyProvider) {
        if let Some(identifier) = &self.policy_identifier {
            self.policy = provider.resolve(identifier);
        }
    }

    /// The resolved signature policy
    pub fn policy(&self) -> Option<&SignaturePolicy> {
        self.policy.as_ref()
    }

    /// A digest reference over the signature element itself (TS 119 442)
    pub fn signature_digest_reference(
        &self,
        algorithm: DigestAlgorithm,
    ) -> Option<SignatureDigestReference> {
        let binary = self.signature_binary.as_ref()?;
        let canonicalization_method = match &self.form_data {
            FormData::Xades(data) => data.canonicalization_method.clone(),
            _ => None,
        };
        Some(SignatureDigestReference {
            canonicalization_method,
            digest: Digest::new(algorithm, ades_crypto::digest(algorithm, binary)),
        })
    }

    // ---- validation modes ---------------------------------------------

    /// True when only the signer's document hashes are available
    pub fn is_doc_hash_only_validation(&self) -> bool {
        !self.detached_contents.is_empty()
            && self.detached_contents.iter().all(|doc| doc.is_digest_only())
    }

    /// True when only the DTBSR is available
    pub fn is_hash_only_validation(&self) -> bool {
        self.dtbs.is_none() && self.dtbsr.is_some()
    }

    // ---- levels --------------------------------------------------------

    /// The level ladder for this form, simple to complete
    pub fn signature_levels(&self) -> &'static [SignatureLevel; 4] {
        self.signature_form().levels()
    }

    /// True when every structural element the profile requires for the
    /// level is present. Monotone: true for a level implies true for every
    /// lower level of the same ladder.
    pub fn is_data_for_signature_level_present(&self, level: SignatureLevel) -> bool {
        if level.form() != self.signature_form() {
            return false;
        }
        (0..=level.rank()).all(|rank| self.level_rank_present(rank))
    }

    /// The highest level whose data is present
    pub fn data_found_up_to_level(&self) -> Option<SignatureLevel> {
        let mut found = None;
        for level in self.signature_levels() {
            if self.level_rank_present(level.rank()) {
                found = Some(*level);
            } else {
                break;
            }
        }
        found
    }

    fn level_rank_present(&self, rank: usize) -> bool {
        match rank {
            // B: a well-formed signature with a signature value
            0 => !self.signature_value.is_empty(),
            // T: a timestamp over the signature value
            1 => match self.form_data {
                FormData::Pades(_) => {
                    !self.signature_timestamps().is_empty()
                        || !self.document_timestamps().is_empty()
                }
                _ => !self.signature_timestamps().is_empty(),
            },
            // LT: the validation material is embedded
            2 => match &self.form_data {
                FormData::Xades(data) => {
                    data.has_certificate_values && data.has_revocation_values
                }
                FormData::Cades(data) => {
                    data.has_certificate_values && data.has_revocation_values
                }
                FormData::Pades(data) => data.has_dss_dictionary,
            },
            // LTA: an archive timestamp over everything
            _ => match self.form_data {
                FormData::Pades(_) => !self.document_timestamps().is_empty(),
                _ => !self.archive_timestamps().is_empty(),
            },
        }
    }

    // ---- counter-signatures -------------------------------------------

    /// Attach a counter-signature. Its master becomes this signature; when
    /// the child has no DTBS yet, the master's signature value is the
    /// counter-signed payload. Rejects links that would revisit an
    /// identifier in the counter tree.
    pub fn add_counter_signature(&mut self, mut counter: AdvancedSignature) -> Result<()> {
        if counter.id == self.id || counter.contains_in_counter_tree(self.id) {
            return Err(Error::CounterSignatureCycle);
        }
        counter.master_signature_id = Some(self.id);
        if counter.dtbs.is_none() && counter.dtbsr.is_none() {
            counter.dtbs = Some(self.signature_value.clone());
        }
        self.counter_signatures.push(counter);
        Ok(())
    }

    /// Counter-signatures applied to this signature
    pub fn counter_signatures(&self) -> &[AdvancedSignature] {
        &self.counter_signatures
    }

    /// Mutable counter-signatures, for validating them in place
    pub fn counter_signatures_mut(&mut self) -> &mut [AdvancedSignature] {
        &mut self.counter_signatures
    }

    /// Identifier of the master signature, set when this signature is a
    /// counter-signature
    pub fn master_signature_id(&self) -> Option<DssId> {
        self.master_signature_id
    }

    fn contains_in_counter_tree(&self, id: DssId) -> bool {
        self.counter_signatures
            .iter()
            .any(|cs| cs.id == id || cs.contains_in_counter_tree(id))
    }
}
