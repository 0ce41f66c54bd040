//! Digest value paired with its algorithm

use crate::algorithms::DigestAlgorithm;

/// A digest output together with the algorithm that produced it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest {
    /// The algorithm used to produce this digest
    pub algorithm: DigestAlgorithm,
    /// The digest bytes
    pub value: Vec<u8>,
}

impl Digest {
    /// Create a new digest
    pub fn new(algorithm: DigestAlgorithm, value: Vec<u8>) -> Self {
        Self { algorithm, value }
    }

    /// Get the digest as a hex string
    pub fn to_hex(&self) -> String {
        hex::encode(&self.value)
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let digest = Digest::new(DigestAlgorithm::Sha256, vec![0xab, 0xcd]);
        assert_eq!(digest.to_string(), "SHA256:abcd");
    }
}
