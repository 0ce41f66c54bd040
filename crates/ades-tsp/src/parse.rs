//! CMS helpers shared by timestamp parsing and verification

use crate::asn1::{OID_OCSP_BASIC, OID_SIGNED_DATA, OID_TST_INFO};
use crate::error::{Error, Result};
use ades_x509::CertificateToken;
use cms::cert::CertificateChoices;
use cms::content_info::ContentInfo;
use cms::revocation::RevocationInfoChoice;
use cms::signed_data::{SignedData, SignerInfo};
use const_oid::ObjectIdentifier;
use der::asn1::{OctetString, SetOfVec};
use der::{Any, Decode, Encode};
use x509_cert::attr::{Attribute, Attributes};

/// Parse a DER-encoded TimeStampToken (a CMS ContentInfo carrying
/// SignedData) and return the parsed SignedData together with the canonical
/// DER of the whole token.
pub fn parse_timestamp_content_info(bytes: &[u8]) -> Result<(SignedData, Vec<u8>)> {
    let content_info = ContentInfo::from_der(bytes)
        .map_err(|e| Error::Parse(format!("failed to decode TimeStampToken: {e}")))?;

    if content_info.content_type != OID_SIGNED_DATA {
        return Err(Error::Parse(
            "ContentInfo content type is not SignedData".to_string(),
        ));
    }

    let signed_data_der = content_info
        .content
        .to_der()
        .map_err(|e| Error::Parse(format!("failed to encode SignedData content: {e}")))?;
    let signed_data = SignedData::from_der(&signed_data_der)
        .map_err(|e| Error::Parse(format!("failed to decode SignedData: {e}")))?;

    let token_der = content_info
        .to_der()
        .map_err(|e| Error::Parse(format!("failed to re-encode token: {e}")))?;

    Ok((signed_data, token_der))
}

/// Extract the encapsulated TSTInfo and its DER encoding
pub fn extract_tst_info(signed_data: &SignedData) -> Result<(crate::asn1::TstInfo, Vec<u8>)> {
    if signed_data.encap_content_info.econtent_type != OID_TST_INFO {
        return Err(Error::Parse(
            "encapsulated content type is not TSTInfo".to_string(),
        ));
    }
    let Some(content) = &signed_data.encap_content_info.econtent else {
        return Err(Error::NoTstInfo);
    };

    // The eContent is an OCTET STRING whose value is the TSTInfo DER
    let tst_info_der = content.value().to_vec();
    let tst_info = crate::asn1::TstInfo::from_der(&tst_info_der)
        .map_err(|e| Error::Parse(format!("failed to decode TSTInfo: {e}")))?;

    Ok((tst_info, tst_info_der))
}

/// The first SignerInfo of the SignedData, if any
pub fn first_signer_info(signed_data: &SignedData) -> Option<&SignerInfo> {
    signed_data.signer_infos.0.iter().next()
}

/// Find the SignerInfo whose SID matches the candidate certificate, either
/// by issuer and serial or by subject key identifier
pub fn find_signer_info<'a>(
    signed_data: &'a SignedData,
    candidate: &CertificateToken,
) -> Option<&'a SignerInfo> {
    signed_data
        .signer_infos
        .0
        .iter()
        .find(|si| candidate.matches_signer_identifier(&si.sid))
}

/// Re-encode signed attributes for signature verification.
///
/// RFC 5652: the signed attributes are stored with an IMPLICIT [0] tag in
/// SignerInfo, but the signature is computed over their encoding as a plain
/// SET OF.
pub fn signed_attrs_der(attrs: &Attributes) -> Result<Vec<u8>> {
    let attrs_vec: Vec<Attribute> = attrs.iter().cloned().collect();
    let generic_set = SetOfVec::try_from(attrs_vec)
        .map_err(|e| Error::Parse(format!("failed to rebuild attribute set: {e}")))?;
    generic_set
        .to_der()
        .map_err(|e| Error::Parse(format!("failed to re-encode attributes: {e}")))
}

/// Find an attribute by OID
pub fn find_attribute<'a>(attrs: &'a Attributes, oid: &ObjectIdentifier) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.oid == *oid)
}

/// The single value of an attribute
pub fn attribute_value(attr: &Attribute) -> Result<&Any> {
    if attr.values.len() != 1 {
        return Err(Error::Parse(format!(
            "attribute {} must have exactly one value",
            attr.oid
        )));
    }
    attr.values
        .get(0)
        .ok_or_else(|| Error::Parse(format!("attribute {} has no value", attr.oid)))
}

/// Decode an attribute value as an OCTET STRING
pub fn attribute_octet_string(attr: &Attribute) -> Result<Vec<u8>> {
    let value = attribute_value(attr)?;
    let octets: OctetString = value
        .decode_as()
        .map_err(|e| Error::Parse(format!("attribute {} is not an OCTET STRING: {e}", attr.oid)))?;
    Ok(octets.as_bytes().to_vec())
}

/// Decode an attribute value as an OBJECT IDENTIFIER
pub fn attribute_oid(attr: &Attribute) -> Result<ObjectIdentifier> {
    let value = attribute_value(attr)?;
    value
        .decode_as()
        .map_err(|e| Error::Parse(format!("attribute {} is not an OID: {e}", attr.oid)))
}

/// DER encodings of the X.509 certificates embedded in the SignedData
pub fn extract_certificates(signed_data: &SignedData) -> Vec<Vec<u8>> {
    let mut certificates = Vec::new();
    if let Some(cert_set) = &signed_data.certificates {
        for cert_choice in cert_set.0.iter() {
            match cert_choice {
                CertificateChoices::Certificate(cert) => match cert.to_der() {
                    Ok(der) => certificates.push(der),
                    Err(e) => {
                        tracing::warn!("skipping unencodable embedded certificate: {e}");
                    }
                },
                CertificateChoices::Other(_) => {
                    tracing::debug!("skipping non-standard certificate format");
                }
            }
        }
    }
    certificates
}

/// DER encodings of the CRLs embedded in the SignedData's revocation bag
pub fn extract_crls(signed_data: &SignedData) -> Vec<Vec<u8>> {
    let mut crls = Vec::new();
    if let Some(revocation) = &signed_data.crls {
        for choice in revocation.0.iter() {
            if let RevocationInfoChoice::Crl(crl) = choice {
                match crl.to_der() {
                    Ok(der) => crls.push(der),
                    Err(e) => tracing::warn!("skipping unencodable embedded CRL: {e}"),
                }
            }
        }
    }
    crls
}

/// DER encodings of the basic OCSP responses embedded in the SignedData's
/// revocation bag
pub fn extract_ocsp_responses(signed_data: &SignedData) -> Vec<Vec<u8>> {
    let mut responses = Vec::new();
    if let Some(revocation) = &signed_data.crls {
        for choice in revocation.0.iter() {
            if let RevocationInfoChoice::Other(other) = choice {
                if other.other_format.oid == OID_OCSP_BASIC {
                    match other.other.to_der() {
                        Ok(der) => responses.push(der),
                        Err(e) => {
                            tracing::warn!("skipping unencodable embedded OCSP response: {e}");
                        }
                    }
                }
            }
        }
    }
    responses
}
