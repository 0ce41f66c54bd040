//! Format-agnostic advanced signature abstraction
//!
//! One contract over XAdES, CAdES and PAdES signatures, so validation,
//! policy and reporting logic can be written once. A parsed signature
//! exposes its embedded material as typed sources, its timestamps classified
//! by semantic role, its signing-certificate candidates, and the evidence
//! gathered by the integrity checks. The core gathers evidence only; it
//! never decides trust.

pub mod candidates;
pub mod context;
pub mod error;
pub mod policy;
pub mod properties;
pub mod scope;
pub mod signature;
pub mod timestamp_source;
pub mod verification;

pub use candidates::{CandidateOrigin, CandidatesForSigningCertificate, CertificateValidity};
pub use context::{CollectingValidationContext, ValidationContext};
pub use error::{Error, Result};
pub use policy::{SignaturePolicy, SignaturePolicyProvider};
pub use properties::{
    CommitmentTypeIndication, SignatureDigestReference, SignatureProductionPlace, SignerRole,
    SignerRoleCategory,
};
pub use scope::SignatureScopeFinder;
pub use signature::{AdvancedSignature, CadesData, FormData, PadesData, XadesData};
pub use timestamp_source::TimestampSource;
pub use verification::{
    ReferenceData, ReferenceType, ReferenceValidation, SignatureCryptographicVerification,
};
