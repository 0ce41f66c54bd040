//! References attested by a timestamp

/// Category of an object covered by a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampedObjectType {
    /// A signature
    Signature,
    /// A certificate token
    Certificate,
    /// A CRL or OCSP artifact
    Revocation,
    /// Another timestamp
    Timestamp,
    /// Signed data itself
    SignedData,
}

/// One object a timestamp attests to, by identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedReference {
    /// Identifier of the covered object
    pub object_id: String,
    /// Category of the covered object
    pub category: TimestampedObjectType,
}

impl TimestampedReference {
    /// Create a new reference
    pub fn new(object_id: impl Into<String>, category: TimestampedObjectType) -> Self {
        Self {
            object_id: object_id.into(),
            category,
        }
    }
}
