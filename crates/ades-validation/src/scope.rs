//! Signature scope discovery

use crate::signature::AdvancedSignature;
use ades_types::SignatureScope;

/// Strategy producing what-was-signed descriptors for one signature.
///
/// Implementations inspect the payload references of the concrete format;
/// the core only stores their result.
pub trait SignatureScopeFinder {
    /// Find the scopes covered by the signature
    fn find_signature_scope(&self, signature: &AdvancedSignature) -> Vec<SignatureScope>;
}
