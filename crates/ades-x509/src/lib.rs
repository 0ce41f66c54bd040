//! Token contract, certificate tokens and artifact sources
//!
//! Every cryptographic token in the validation core shares one identity and
//! signer-verification protocol, the [`Token`] trait. Certificates are
//! deduplicated through a shared [`CertificatePool`]; certificates, CRLs and
//! OCSP responses extracted from one container are grouped into typed
//! sources with merged views across a signature and its timestamps.

pub mod certificate;
pub mod error;
pub mod pool;
pub mod revocation;
pub mod source;
pub mod token;

pub use certificate::CertificateToken;
pub use error::{Error, Result};
pub use pool::CertificatePool;
pub use revocation::{
    CrlBinary, CrlSource, ListCrlSource, ListOcspSource, OcspResponseBinary, OcspSource,
};
pub use source::{
    CertificateRef, CertificateRefOrigin, CertificateSource, IssuerSerialInfo,
    ListCertificateSource,
};
pub use token::{Token, TokenStatus};
