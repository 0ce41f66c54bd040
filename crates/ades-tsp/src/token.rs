//! Timestamp token: parsing, message-imprint matching and signer
//! verification

use crate::asn1::{
    SigningCertificate, SigningCertificateV2, TstInfo, OID_CONTENT_TYPE, OID_MESSAGE_DIGEST,
    OID_SIGNING_CERTIFICATE, OID_SIGNING_CERTIFICATE_V2, OID_TST_INFO,
};
use crate::error::{Error, Result};
use crate::parse;
use ades_crypto::VerificationKey;
use ades_types::{
    ArchiveTimestampType, CertificateSourceType, Digest, DigestAlgorithm, DssId, ManifestFile,
    PdfRevision, SignatureAlgorithm, SignatureScope, SignatureValidity, SignedDocument,
    TimestampLocation, TimestampType, TimestampedReference,
};
use ades_x509::{
    CertificatePool, CertificateRef, CertificateSource, CertificateToken, CrlSource,
    IssuerSerialInfo, OcspSource, Token, TokenStatus,
};
use base64::Engine;
use chrono::{DateTime, Utc};
use cms::signed_data::{SignedData, SignerIdentifier, SignerInfo};
use const_oid::db::rfc5280::ID_KP_TIME_STAMPING;
use const_oid::db::rfc5912::ID_RSASSA_PSS;
use std::sync::Arc;
use x509_cert::attr::Attributes;

/// Which verification path produced a VALID outcome.
///
/// Some historical timestamps embed TSA certificates that violate later
/// RFC 3161 profile checks but remain cryptographically sound; those verify
/// through the CMS fallback and policy layers can observe it here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampVerificationPath {
    /// Full RFC 3161 validation succeeded
    Strict,
    /// Only the plain CMS signature verification succeeded
    CmsFallback,
}

/// XAdES IndividualDataObjectsTimeStamp Include element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampInclude {
    /// URI of the covered reference
    pub uri: String,
    /// Value of the referencedData attribute
    pub referenced_data: bool,
}

/// Message-imprint verification state.
///
/// Reading the outcome before `match_data` has run is a contract violation,
/// not an evidential failure; the state machine makes that mechanical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageImprintCheck {
    NotPerformed,
    Performed { data_found: bool, intact: bool },
}

/// A signed token containing an RFC 3161 timestamp.
///
/// Parsed from CMS bytes (or a PDF revision carrying them); verification
/// outcomes are recorded on the token and inspected by the caller, never
/// raised as errors.
pub struct TimestampToken {
    der: Vec<u8>,
    id: DssId,
    signed_data: SignedData,
    tst_info: TstInfo,
    tst_info_der: Vec<u8>,
    generation_time: DateTime<Utc>,
    message_imprint: Digest,

    timestamp_type: TimestampType,
    location: Option<TimestampLocation>,
    timestamped_references: Vec<TimestampedReference>,

    certificate_source: CertificateSource,
    crl_source: CrlSource,
    ocsp_source: OcspSource,

    imprint_check: MessageImprintCheck,
    status: TokenStatus,
    verification_path: Option<TimestampVerificationPath>,

    archive_timestamp_type: Option<ArchiveTimestampType>,
    canonicalization_method: Option<String>,
    includes: Vec<TimestampInclude>,
    manifest_file: Option<ManifestFile>,
    file_name: Option<String>,
    timestamp_scopes: Vec<SignatureScope>,
    pdf_revision: Option<PdfRevision>,
    dom_hash_code: Option<u64>,
}

impl TimestampToken {
    /// Parse a timestamp token from its DER encoding
    pub fn from_der(
        binaries: &[u8],
        timestamp_type: TimestampType,
        pool: Arc<CertificatePool>,
    ) -> Result<Self> {
        Self::from_der_with(binaries, timestamp_type, pool, Vec::new(), None)
    }

    /// Parse a timestamp token, attaching the references it attests to and
    /// the location it was found in
    pub fn from_der_with(
        binaries: &[u8],
        timestamp_type: TimestampType,
        pool: Arc<CertificatePool>,
        timestamped_references: Vec<TimestampedReference>,
        location: Option<TimestampLocation>,
    ) -> Result<Self> {
        let (signed_data, der) = parse::parse_timestamp_content_info(binaries)?;
        Self::from_signed_data(
            signed_data,
            der,
            timestamp_type,
            pool,
            timestamped_references,
            location,
        )
    }

    /// Build a token from an already-parsed CMS SignedData and its token DER
    pub fn from_signed_data(
        signed_data: SignedData,
        der: Vec<u8>,
        timestamp_type: TimestampType,
        pool: Arc<CertificatePool>,
        timestamped_references: Vec<TimestampedReference>,
        location: Option<TimestampLocation>,
    ) -> Result<Self> {
        let (tst_info, tst_info_der) = parse::extract_tst_info(&signed_data)?;

        let imprint_algorithm =
            DigestAlgorithm::from_oid(&tst_info.message_imprint.hash_algorithm.oid)
                .map_err(|e| Error::Parse(format!("unknown message imprint algorithm: {e}")))?;
        let message_imprint = Digest::new(
            imprint_algorithm,
            tst_info.message_imprint.hashed_message.as_bytes().to_vec(),
        );

        let generation_time = DateTime::from_timestamp(
            tst_info.gen_time.to_unix_duration().as_secs() as i64,
            0,
        )
        .ok_or_else(|| Error::Parse("invalid generation time in TSTInfo".to_string()))?;

        let mut certificate_source =
            CertificateSource::new(CertificateSourceType::Timestamp, pool);
        for cert_der in parse::extract_certificates(&signed_data) {
            match CertificateToken::from_der(&cert_der) {
                Ok(token) => {
                    certificate_source.add_certificate(token);
                }
                Err(e) => {
                    tracing::warn!("skipping unparsable certificate embedded in timestamp: {e}");
                }
            }
        }

        let mut crl_source = CrlSource::new(CertificateSourceType::Timestamp);
        for crl in parse::extract_crls(&signed_data) {
            crl_source.add_crl(crl);
        }
        let mut ocsp_source = OcspSource::new(CertificateSourceType::Timestamp);
        for response in parse::extract_ocsp_responses(&signed_data) {
            ocsp_source.add_ocsp_response(response);
        }

        Ok(Self {
            id: DssId::from_der(&der),
            der,
            signed_data,
            tst_info,
            tst_info_der,
            generation_time,
            message_imprint,
            timestamp_type,
            location,
            timestamped_references,
            certificate_source,
            crl_source,
            ocsp_source,
            imprint_check: MessageImprintCheck::NotPerformed,
            status: TokenStatus::default(),
            verification_path: None,
            archive_timestamp_type: None,
            canonicalization_method: None,
            includes: Vec::new(),
            manifest_file: None,
            file_name: None,
            timestamp_scopes: Vec::new(),
            pdf_revision: None,
            dom_hash_code: None,
        })
    }

    /// Build a token from a PDF revision carrying a DocTimeStamp
    pub fn from_pdf_revision(
        revision: PdfRevision,
        timestamp_type: TimestampType,
        pool: Arc<CertificatePool>,
        location: Option<TimestampLocation>,
    ) -> Result<Self> {
        let mut token =
            Self::from_der_with(&revision.cms_bytes, timestamp_type, pool, Vec::new(), location)?;
        token.pdf_revision = Some(revision);
        Ok(token)
    }

    /// The parsed TSTInfo
    pub fn tst_info(&self) -> &TstInfo {
        &self.tst_info
    }

    /// The parsed CMS SignedData
    pub fn signed_data(&self) -> &SignedData {
        &self.signed_data
    }

    /// Timestamp generation time from the TSTInfo
    pub fn generation_time(&self) -> DateTime<Utc> {
        self.generation_time
    }

    /// The embedded message imprint: digest algorithm and value
    pub fn message_imprint(&self) -> &Digest {
        &self.message_imprint
    }

    /// Semantic role of this timestamp
    pub fn timestamp_type(&self) -> TimestampType {
        self.timestamp_type
    }

    /// Where the timestamp was found
    pub fn location(&self) -> Option<TimestampLocation> {
        self.location
    }

    /// References this timestamp attests to
    pub fn timestamped_references(&self) -> &[TimestampedReference] {
        &self.timestamped_references
    }

    /// Replace the attested references
    pub fn set_timestamped_references(&mut self, references: Vec<TimestampedReference>) {
        self.timestamped_references = references;
    }

    /// Certificates embedded in the timestamp's CMS
    pub fn certificate_source(&self) -> &CertificateSource {
        &self.certificate_source
    }

    /// CRLs embedded in the timestamp's CMS
    pub fn crl_source(&self) -> &CrlSource {
        &self.crl_source
    }

    /// OCSP responses embedded in the timestamp's CMS
    pub fn ocsp_source(&self) -> &OcspSource {
        &self.ocsp_source
    }

    /// The wrapped certificates
    pub fn certificates(&self) -> &[Arc<CertificateToken>] {
        self.certificate_source.certificates()
    }

    /// Certificate references carried by the timestamp
    pub fn certificate_refs(&self) -> &[CertificateRef] {
        self.certificate_source.certificate_refs()
    }

    /// Unsigned attributes of the timestamp's SignerInfo, carrying nested
    /// artifacts such as TSA certificates in CertificateValues
    pub fn unsigned_attributes(&self) -> Option<&Attributes> {
        parse::first_signer_info(&self.signed_data)?.unsigned_attrs.as_ref()
    }

    /// Issuer and serial of each SignerInfo in the CMS
    pub fn signer_issuer_serial_infos(&self) -> Vec<IssuerSerialInfo> {
        self.signed_data
            .signer_infos
            .0
            .iter()
            .filter_map(|si| match &si.sid {
                SignerIdentifier::IssuerAndSerialNumber(issuer_serial) => Some(IssuerSerialInfo {
                    issuer_name: issuer_serial.issuer.to_string(),
                    serial_number: issuer_serial.serial_number.as_bytes().to_vec(),
                }),
                SignerIdentifier::SubjectKeyIdentifier(_) => None,
            })
            .collect()
    }

    /// True once a `match_data` variant has run
    pub fn is_processed(&self) -> bool {
        !matches!(self.imprint_check, MessageImprintCheck::NotPerformed)
    }

    /// True when the timestamped data was available to the last check
    pub fn is_message_imprint_data_found(&self) -> bool {
        matches!(
            self.imprint_check,
            MessageImprintCheck::Performed { data_found: true, .. }
        )
    }

    /// Whether the message imprint matched the timestamped data.
    ///
    /// A `match_data` variant must have been invoked before; reading the
    /// outcome earlier is a contract violation.
    pub fn is_message_imprint_data_intact(&self) -> Result<bool> {
        match self.imprint_check {
            MessageImprintCheck::NotPerformed => Err(Error::IllegalState(
                "invoke match_data before reading the message imprint outcome".to_string(),
            )),
            MessageImprintCheck::Performed { intact, .. } => Ok(intact),
        }
    }

    /// Check whether this token matches the timestamped data, digesting the
    /// document with the imprint's algorithm
    pub fn match_data(&mut self, timestamped_data: Option<&SignedDocument>) -> bool {
        self.match_data_ext(timestamped_data, false)
    }

    /// `match_data` with optional suppression of mismatch warnings.
    ///
    /// Used when a mismatch is expected and the caller will re-run the
    /// imprint computation another way; the diagnostics are the only
    /// difference.
    pub fn match_data_ext(
        &mut self,
        timestamped_data: Option<&SignedDocument>,
        suppress_match_warnings: bool,
    ) -> bool {
        let computed = timestamped_data
            .and_then(|doc| ades_crypto::digest_document(doc, self.message_imprint.algorithm));
        match computed {
            Some(digest) => self.match_imprint_ext(Some(&digest), suppress_match_warnings),
            None => self.match_imprint_ext(None, suppress_match_warnings),
        }
    }

    /// Check whether this token matches a pre-computed message-imprint value
    pub fn match_imprint(&mut self, expected_message_imprint: Option<&[u8]>) -> bool {
        self.match_imprint_ext(expected_message_imprint, false)
    }

    /// `match_imprint` with optional suppression of mismatch warnings
    pub fn match_imprint_ext(
        &mut self,
        expected_message_imprint: Option<&[u8]>,
        suppress_match_warnings: bool,
    ) -> bool {
        let Some(expected) = expected_message_imprint else {
            tracing::warn!("timestamped data not found");
            self.imprint_check = MessageImprintCheck::Performed {
                data_found: false,
                intact: false,
            };
            return false;
        };

        let intact = expected == self.message_imprint.value.as_slice();
        if !intact && !suppress_match_warnings {
            let base64 = base64::engine::general_purpose::STANDARD;
            tracing::warn!(
                "provided digest value for timestamp match_data: {}",
                base64.encode(expected)
            );
            tracing::warn!(
                "digest ({}) present in timestamp token: {}",
                self.message_imprint.algorithm,
                base64.encode(&self.message_imprint.value)
            );
        }
        self.imprint_check = MessageImprintCheck::Performed {
            data_found: true,
            intact,
        };
        intact
    }

    /// The path that produced a VALID signer verification, if any
    pub fn verification_path(&self) -> Option<TimestampVerificationPath> {
        self.verification_path
    }

    /// Archive sub-type, set only for archive timestamps
    pub fn archive_timestamp_type(&self) -> Option<ArchiveTimestampType> {
        self.archive_timestamp_type
    }

    /// Set the archive sub-type
    pub fn set_archive_timestamp_type(&mut self, archive_type: ArchiveTimestampType) {
        self.archive_timestamp_type = Some(archive_type);
    }

    /// Canonicalization method used before digesting (XAdES only)
    pub fn canonicalization_method(&self) -> Option<&str> {
        self.canonicalization_method.as_deref()
    }

    /// Set the canonicalization method (XAdES only)
    pub fn set_canonicalization_method(&mut self, method: impl Into<String>) {
        self.canonicalization_method = Some(method.into());
    }

    /// Include elements (XAdES IndividualDataObjectsTimeStamp only)
    pub fn includes(&self) -> &[TimestampInclude] {
        &self.includes
    }

    /// Set the Include elements
    pub fn set_includes(&mut self, includes: Vec<TimestampInclude>) {
        self.includes = includes;
    }

    /// The manifest covered by this timestamp (ASiC-E CAdES only)
    pub fn manifest_file(&self) -> Option<&ManifestFile> {
        self.manifest_file.as_ref()
    }

    /// Set the covered manifest (ASiC-E CAdES only)
    pub fn set_manifest_file(&mut self, manifest: ManifestFile) {
        self.manifest_file = Some(manifest);
    }

    /// File name of a detached timestamp
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Set the file name of a detached timestamp
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.file_name = Some(file_name.into());
    }

    /// Scopes of a detached timestamp
    pub fn timestamp_scopes(&self) -> &[SignatureScope] {
        &self.timestamp_scopes
    }

    /// Set the scopes of a detached timestamp
    pub fn set_timestamp_scopes(&mut self, scopes: Vec<SignatureScope>) {
        self.timestamp_scopes = scopes;
    }

    /// The PDF revision this timestamp was extracted from (PAdES only)
    pub fn pdf_revision(&self) -> Option<&PdfRevision> {
        self.pdf_revision.as_ref()
    }

    /// DOM identity marker (XAdES only); the computation belongs to the XML
    /// layer
    pub fn dom_hash_code(&self) -> Option<u64> {
        self.dom_hash_code
    }

    /// Set the DOM identity marker (XAdES only)
    pub fn set_dom_hash_code(&mut self, hash_code: u64) {
        self.dom_hash_code = Some(hash_code);
    }

    /// Short rendering: type, identifier and generation time
    pub fn abbreviation(&self) -> String {
        format!(
            "{:?}: {:?}: {}",
            self.timestamp_type,
            self.id,
            self.generation_time.format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// Full RFC 3161 validation of one SignerInfo against the candidate:
    /// profile attributes, TSA certificate constraints and the signature
    /// itself.
    fn validate_strict(
        &self,
        signer_info: &SignerInfo,
        candidate: &CertificateToken,
        key: &VerificationKey,
    ) -> std::result::Result<(), String> {
        let attrs = signer_info
            .signed_attrs
            .as_ref()
            .ok_or("timestamp SignerInfo has no signed attributes")?;

        let content_type = parse::find_attribute(attrs, &OID_CONTENT_TYPE)
            .ok_or("missing content-type signed attribute")?;
        let content_type_oid = parse::attribute_oid(content_type).map_err(|e| e.to_string())?;
        if content_type_oid != OID_TST_INFO {
            return Err(format!(
                "content-type attribute is {content_type_oid}, not id-ct-TSTInfo"
            ));
        }

        self.check_message_digest_attribute(signer_info, attrs)?;
        self.check_ess_signing_certificate(attrs, candidate)?;

        if !candidate.has_extended_key_usage(&ID_KP_TIME_STAMPING) {
            return Err("TSA certificate lacks the timeStamping extended key usage".to_string());
        }
        if !candidate.is_valid_at(self.generation_time) {
            return Err("TSA certificate is not valid at the generation time".to_string());
        }

        let message = parse::signed_attrs_der(attrs).map_err(|e| e.to_string())?;
        key.verify(&message, signer_info.signature.as_bytes())
            .map_err(|e| e.to_string())
    }

    /// Plain CMS verification of the same SignerInfo: only the cryptographic
    /// validity, none of the RFC 3161 profile constraints.
    fn validate_cms(
        &self,
        signer_info: &SignerInfo,
        key: &VerificationKey,
    ) -> std::result::Result<(), String> {
        match signer_info.signed_attrs.as_ref() {
            Some(attrs) => {
                self.check_message_digest_attribute(signer_info, attrs)?;
                let message = parse::signed_attrs_der(attrs).map_err(|e| e.to_string())?;
                key.verify(&message, signer_info.signature.as_bytes())
                    .map_err(|e| e.to_string())
            }
            None => key
                .verify(&self.tst_info_der, signer_info.signature.as_bytes())
                .map_err(|e| e.to_string()),
        }
    }

    fn check_message_digest_attribute(
        &self,
        signer_info: &SignerInfo,
        attrs: &Attributes,
    ) -> std::result::Result<(), String> {
        let attr = parse::find_attribute(attrs, &OID_MESSAGE_DIGEST)
            .ok_or("missing message-digest signed attribute")?;
        let expected = parse::attribute_octet_string(attr).map_err(|e| e.to_string())?;

        let digest_algorithm = DigestAlgorithm::from_oid(&signer_info.digest_alg.oid)
            .map_err(|e| e.to_string())?;
        let computed = ades_crypto::digest(digest_algorithm, &self.tst_info_der);
        if computed != expected {
            return Err("message-digest attribute does not match the TSTInfo".to_string());
        }
        Ok(())
    }

    /// Check the ESS signing-certificate attribute (v2 preferred, v1
    /// accepted) against the candidate's certificate hash
    fn check_ess_signing_certificate(
        &self,
        attrs: &Attributes,
        candidate: &CertificateToken,
    ) -> std::result::Result<(), String> {
        if let Some(attr) = parse::find_attribute(attrs, &OID_SIGNING_CERTIFICATE_V2) {
            let value = parse::attribute_value(attr).map_err(|e| e.to_string())?;
            let signing_certificate: SigningCertificateV2 = value
                .decode_as()
                .map_err(|e| format!("malformed signing-certificate-v2 attribute: {e}"))?;
            let cert_id = signing_certificate
                .certs
                .first()
                .ok_or("signing-certificate-v2 attribute carries no certificate id")?;

            let algorithm = match &cert_id.hash_algorithm {
                Some(identifier) => DigestAlgorithm::from_oid(&identifier.oid)
                    .map_err(|e| e.to_string())?,
                None => DigestAlgorithm::Sha256,
            };
            if candidate.digest(algorithm) != cert_id.cert_hash.as_bytes() {
                return Err(
                    "signing-certificate-v2 hash does not match the candidate certificate"
                        .to_string(),
                );
            }
            return Ok(());
        }

        if let Some(attr) = parse::find_attribute(attrs, &OID_SIGNING_CERTIFICATE) {
            let value = parse::attribute_value(attr).map_err(|e| e.to_string())?;
            let signing_certificate: SigningCertificate = value
                .decode_as()
                .map_err(|e| format!("malformed signing-certificate attribute: {e}"))?;
            let cert_id = signing_certificate
                .certs
                .first()
                .ok_or("signing-certificate attribute carries no certificate id")?;

            if candidate.digest(DigestAlgorithm::Sha1) != cert_id.cert_hash.as_bytes() {
                return Err(
                    "signing-certificate hash does not match the candidate certificate"
                        .to_string(),
                );
            }
            return Ok(());
        }

        Err("missing ESS signing-certificate attribute".to_string())
    }
}

impl Token for TimestampToken {
    fn dss_id(&self) -> DssId {
        self.id
    }

    fn encoded(&self) -> &[u8] {
        &self.der
    }

    fn issuer_dn(&self) -> Option<String> {
        self.status.signer_dn.clone()
    }

    fn creation_date(&self) -> Option<DateTime<Utc>> {
        Some(self.generation_time)
    }

    fn status(&self) -> &TokenStatus {
        &self.status
    }

    fn check_is_signed_by(
        &mut self,
        candidate: &CertificateToken,
    ) -> ades_crypto::Result<SignatureValidity> {
        let Some(signer_info) = parse::find_signer_info(&self.signed_data, candidate) else {
            // No SID match: INVALID without recording the DN
            self.status.validity = SignatureValidity::Invalid;
            self.status.invalidity_reason =
                "no SignerInfo matches the candidate certificate".to_string();
            return Ok(SignatureValidity::Invalid);
        };
        let signer_info = signer_info.clone();

        let digest_algorithm = DigestAlgorithm::from_oid(&signer_info.digest_alg.oid)
            .map_err(|e| ades_crypto::Error::UnsupportedAlgorithm(e.to_string()))?;
        let algorithm = if signer_info.signature_algorithm.oid == ID_RSASSA_PSS {
            match &signer_info.signature_algorithm.parameters {
                Some(parameters) => ades_crypto::decode_pss_parameters(parameters)?,
                None => SignatureAlgorithm::rsa_ssa_pss(digest_algorithm),
            }
        } else {
            let encryption = candidate
                .public_key_algorithm()
                .map_err(|e| ades_crypto::Error::InvalidKey(e.to_string()))?;
            SignatureAlgorithm::new(encryption, digest_algorithm)
        };

        // A verifier that cannot be instantiated is a configuration error,
        // not an evidential outcome
        let spki = candidate
            .spki_der()
            .map_err(|e| ades_crypto::Error::InvalidKey(e.to_string()))?;
        let key = VerificationKey::from_spki(&spki, &algorithm)?;

        // Try full RFC 3161 validation first, then fall back to a plain CMS
        // signature verification over the same SignerInfo
        match self.validate_strict(&signer_info, candidate, &key) {
            Ok(()) => {
                self.record_valid(candidate, algorithm, TimestampVerificationPath::Strict);
            }
            Err(strict_reason) => {
                tracing::debug!("strict timestamp validation failed: {strict_reason}");
                match self.validate_cms(&signer_info, &key) {
                    Ok(()) => {
                        tracing::warn!(
                            "timestamp accepted through plain CMS verification: {strict_reason}"
                        );
                        self.record_valid(
                            candidate,
                            algorithm,
                            TimestampVerificationPath::CmsFallback,
                        );
                    }
                    Err(cms_reason) => {
                        tracing::warn!("unable to validate timestamp token: {cms_reason}");
                        self.status.validity = SignatureValidity::Invalid;
                        self.status.invalidity_reason = strict_reason;
                    }
                }
            }
        }
        Ok(self.status.validity)
    }
}

impl TimestampToken {
    fn record_valid(
        &mut self,
        candidate: &CertificateToken,
        algorithm: SignatureAlgorithm,
        path: TimestampVerificationPath,
    ) {
        self.status.validity = SignatureValidity::Valid;
        self.status.invalidity_reason.clear();
        self.status.signature_algorithm = Some(algorithm);
        self.status.signer_dn = Some(candidate.subject_dn());
        self.verification_path = Some(path);
    }
}

impl std::fmt::Display for TimestampToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimestampToken[signedBy={}, generated: {} / {:?}",
            self.status.signer_dn.as_deref().unwrap_or("?"),
            self.generation_time.format("%Y-%m-%d %H:%M:%S"),
            self.timestamp_type
        )?;
        match self.status.validity {
            SignatureValidity::Valid => write!(f, ", signature VALID")?,
            SignatureValidity::Invalid => write!(
                f,
                ", signature INVALID - {}",
                self.status.invalidity_reason
            )?,
            SignatureValidity::NotEvaluated => {}
        }
        if let MessageImprintCheck::Performed { intact, .. } = self.imprint_check {
            if intact {
                write!(f, ", matches the signed data")?;
            } else {
                write!(f, ", does NOT match the signed data")?;
            }
        }
        write!(f, "]")
    }
}
