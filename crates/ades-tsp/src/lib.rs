//! RFC 3161 timestamp token parsing and verification
//!
//! A [`TimestampToken`] wraps one parsed RFC 3161 TimeStampToken embedded in
//! CMS: it exposes the message imprint for matching against arbitrary
//! timestamped content, verifies the TSA's signature against candidate
//! certificates, and carries the certificate and revocation material found
//! in the timestamp's own CMS.

pub mod asn1;
pub mod error;
pub mod parse;
pub mod token;

pub use asn1::{Accuracy, EssCertId, EssCertIdV2, SigningCertificate, SigningCertificateV2, TstInfo};
pub use error::{Error, Result};
pub use token::{TimestampInclude, TimestampToken, TimestampVerificationPath};
