//! Signature and timestamp classification enumerations

/// Outcome of a token signer verification.
///
/// Three-state: a token that was never checked stays `NotEvaluated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureValidity {
    /// The check has not been performed
    #[default]
    NotEvaluated,
    /// The signature cryptographically verifies against the candidate
    Valid,
    /// The signature does not verify, or no signer matched
    Invalid,
}

/// Container format of an advanced electronic signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureForm {
    /// XML-DSig based (ETSI EN 319 132)
    Xades,
    /// CMS based (ETSI EN 319 122)
    Cades,
    /// PDF based (ETSI EN 319 142)
    Pades,
}

impl SignatureForm {
    /// The level ladder for this form, simple to complete
    pub fn levels(&self) -> &'static [SignatureLevel; 4] {
        match self {
            SignatureForm::Xades => &[
                SignatureLevel::XadesBaselineB,
                SignatureLevel::XadesBaselineT,
                SignatureLevel::XadesBaselineLt,
                SignatureLevel::XadesBaselineLta,
            ],
            SignatureForm::Cades => &[
                SignatureLevel::CadesBaselineB,
                SignatureLevel::CadesBaselineT,
                SignatureLevel::CadesBaselineLt,
                SignatureLevel::CadesBaselineLta,
            ],
            SignatureForm::Pades => &[
                SignatureLevel::PadesBaselineB,
                SignatureLevel::PadesBaselineT,
                SignatureLevel::PadesBaselineLt,
                SignatureLevel::PadesBaselineLta,
            ],
        }
    }
}

impl std::fmt::Display for SignatureForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SignatureForm::Xades => "XAdES",
            SignatureForm::Cades => "CAdES",
            SignatureForm::Pades => "PAdES",
        };
        write!(f, "{}", name)
    }
}

/// Baseline profile levels, per form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureLevel {
    /// XAdES-BASELINE-B
    XadesBaselineB,
    /// XAdES-BASELINE-T
    XadesBaselineT,
    /// XAdES-BASELINE-LT
    XadesBaselineLt,
    /// XAdES-BASELINE-LTA
    XadesBaselineLta,
    /// CAdES-BASELINE-B
    CadesBaselineB,
    /// CAdES-BASELINE-T
    CadesBaselineT,
    /// CAdES-BASELINE-LT
    CadesBaselineLt,
    /// CAdES-BASELINE-LTA
    CadesBaselineLta,
    /// PAdES-BASELINE-B
    PadesBaselineB,
    /// PAdES-BASELINE-T
    PadesBaselineT,
    /// PAdES-BASELINE-LT
    PadesBaselineLt,
    /// PAdES-BASELINE-LTA
    PadesBaselineLta,
}

impl SignatureLevel {
    /// The form this level belongs to
    pub fn form(&self) -> SignatureForm {
        match self {
            SignatureLevel::XadesBaselineB
            | SignatureLevel::XadesBaselineT
            | SignatureLevel::XadesBaselineLt
            | SignatureLevel::XadesBaselineLta => SignatureForm::Xades,
            SignatureLevel::CadesBaselineB
            | SignatureLevel::CadesBaselineT
            | SignatureLevel::CadesBaselineLt
            | SignatureLevel::CadesBaselineLta => SignatureForm::Cades,
            SignatureLevel::PadesBaselineB
            | SignatureLevel::PadesBaselineT
            | SignatureLevel::PadesBaselineLt
            | SignatureLevel::PadesBaselineLta => SignatureForm::Pades,
        }
    }

    /// Position in the form's ladder (0 = B, 3 = LTA)
    pub fn rank(&self) -> usize {
        self.form()
            .levels()
            .iter()
            .position(|l| l == self)
            .expect("level present in its own ladder")
    }
}

impl std::fmt::Display for SignatureLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let suffix = match self.rank() {
            0 => "B",
            1 => "T",
            2 => "LT",
            _ => "LTA",
        };
        write!(f, "{}-BASELINE-{}", self.form(), suffix)
    }
}

/// Semantic role of a timestamp within a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampType {
    /// Over content prior to signing (CAdES content-time-stamp)
    ContentTimestamp,
    /// XAdES AllDataObjectsTimeStamp
    AllDataObjectsTimestamp,
    /// XAdES IndividualDataObjectsTimeStamp
    IndividualDataObjectsTimestamp,
    /// Over the signature value (AdES-T)
    SignatureTimestamp,
    /// XAdES RefsOnlyTimeStamp (X2)
    ValidationDataRefsOnlyTimestamp,
    /// XAdES SigAndRefsTimeStamp (X1)
    ValidationDataTimestamp,
    /// Over the whole signature plus its validation material (AdES-A)
    ArchiveTimestamp,
    /// PAdES DocTimeStamp revision
    DocumentTimestamp,
}

impl TimestampType {
    /// True for timestamps over content produced before signing
    pub fn is_content_timestamp(&self) -> bool {
        matches!(
            self,
            TimestampType::ContentTimestamp
                | TimestampType::AllDataObjectsTimestamp
                | TimestampType::IndividualDataObjectsTimestamp
        )
    }

    /// True for timestamps covering the signature value
    pub fn covers_signature(&self) -> bool {
        matches!(
            self,
            TimestampType::SignatureTimestamp
                | TimestampType::ValidationDataTimestamp
                | TimestampType::ArchiveTimestamp
        )
    }
}

/// Archive timestamp sub-type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveTimestampType {
    /// XAdES-141 ArchiveTimeStamp
    Xades141,
    /// XAdES (pre-141) ArchiveTimeStamp
    Xades,
    /// CAdES archive-time-stamp-v2
    CadesV2,
    /// CAdES archive-time-stamp-v3
    CadesV3,
    /// CAdES (unversioned)
    Cades,
    /// PAdES document archive
    Pades,
}

/// Where the timestamp was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampLocation {
    /// Inside a CMS structure
    Cades,
    /// Inside an XML signature
    Xades,
    /// Inside a PDF revision
    Pades,
    /// A standalone timestamped document
    Doc,
    /// Inside an ASiC container
    Asic,
}

/// Origin of an artifact collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CertificateSourceType {
    /// Extracted from a signature container
    Signature,
    /// Extracted from a timestamp's CMS
    Timestamp,
    /// Extracted from an OCSP response
    OcspResponse,
    /// Fetched via Authority Information Access
    Aia,
    /// Configured trust store
    TrustedStore,
    /// Anything else
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladders_are_ascending() {
        for form in [SignatureForm::Xades, SignatureForm::Cades, SignatureForm::Pades] {
            let levels = form.levels();
            for (i, level) in levels.iter().enumerate() {
                assert_eq!(level.form(), form);
                assert_eq!(level.rank(), i);
            }
        }
    }

    #[test]
    fn test_level_display() {
        assert_eq!(SignatureLevel::XadesBaselineLta.to_string(), "XAdES-BASELINE-LTA");
        assert_eq!(SignatureLevel::CadesBaselineT.to_string(), "CAdES-BASELINE-T");
    }

    #[test]
    fn test_content_timestamp_predicate() {
        assert!(TimestampType::AllDataObjectsTimestamp.is_content_timestamp());
        assert!(!TimestampType::SignatureTimestamp.is_content_timestamp());
        assert!(TimestampType::ArchiveTimestamp.covers_signature());
    }
}
