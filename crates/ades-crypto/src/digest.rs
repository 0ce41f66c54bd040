//! Digest engine
//!
//! Computes digests for every algorithm the signature formats may reference.
//! The verification backend supports fewer algorithms than the digest engine;
//! message imprints over legacy hashes still need to be recomputable here.

use ades_types::{DigestAlgorithm, SignedDocument};
use digest::{Digest as _, DynDigest};
use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use whirlpool::Whirlpool;

/// Hash data with the given algorithm
pub fn digest(algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
        DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        DigestAlgorithm::Sha3_224 => Sha3_224::digest(data).to_vec(),
        DigestAlgorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
        DigestAlgorithm::Sha3_384 => Sha3_384::digest(data).to_vec(),
        DigestAlgorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
        DigestAlgorithm::Ripemd160 => Ripemd160::digest(data).to_vec(),
        DigestAlgorithm::Whirlpool => Whirlpool::digest(data).to_vec(),
        DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
    }
}

/// Hash a document with the given algorithm.
///
/// Returns `None` when the document is digest-only and does not carry a
/// pre-computed digest for this algorithm.
pub fn digest_document(document: &SignedDocument, algorithm: DigestAlgorithm) -> Option<Vec<u8>> {
    if let Some(bytes) = document.bytes() {
        return Some(digest(algorithm, bytes));
    }
    document
        .known_digest(algorithm)
        .map(|d| d.value.clone())
}

/// Incremental digest over streamed content
pub struct StreamingDigest {
    algorithm: DigestAlgorithm,
    inner: Box<dyn DynDigest>,
}

impl StreamingDigest {
    /// Create a new streaming digest for the given algorithm
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        let inner: Box<dyn DynDigest> = match algorithm {
            DigestAlgorithm::Sha1 => Box::new(Sha1::new()),
            DigestAlgorithm::Sha224 => Box::new(Sha224::new()),
            DigestAlgorithm::Sha256 => Box::new(Sha256::new()),
            DigestAlgorithm::Sha384 => Box::new(Sha384::new()),
            DigestAlgorithm::Sha512 => Box::new(Sha512::new()),
            DigestAlgorithm::Sha3_224 => Box::new(Sha3_224::new()),
            DigestAlgorithm::Sha3_256 => Box::new(Sha3_256::new()),
            DigestAlgorithm::Sha3_384 => Box::new(Sha3_384::new()),
            DigestAlgorithm::Sha3_512 => Box::new(Sha3_512::new()),
            DigestAlgorithm::Ripemd160 => Box::new(Ripemd160::new()),
            DigestAlgorithm::Whirlpool => Box::new(Whirlpool::new()),
            DigestAlgorithm::Md5 => Box::new(Md5::new()),
        };
        Self { algorithm, inner }
    }

    /// The algorithm this digest computes
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Update with more data
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalize and get the digest
    pub fn finalize(self) -> Vec<u8> {
        self.inner.finalize().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ades_types::Digest;

    #[test]
    fn test_sha256_known_vector() {
        let hash = digest(DigestAlgorithm::Sha256, b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_sha1_known_vector() {
        let hash = digest(DigestAlgorithm::Sha1, b"abc");
        let expected = hex::decode("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_md5_known_vector() {
        let hash = digest(DigestAlgorithm::Md5, b"abc");
        let expected = hex::decode("900150983cd24fb0d6963f7d28e17f72").unwrap();
        assert_eq!(hash, expected);
    }

    #[test]
    fn test_digest_sizes_match_declared() {
        for algorithm in [
            DigestAlgorithm::Sha1,
            DigestAlgorithm::Sha224,
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
            DigestAlgorithm::Sha3_224,
            DigestAlgorithm::Sha3_256,
            DigestAlgorithm::Sha3_384,
            DigestAlgorithm::Sha3_512,
            DigestAlgorithm::Ripemd160,
            DigestAlgorithm::Whirlpool,
            DigestAlgorithm::Md5,
        ] {
            assert_eq!(
                digest(algorithm, b"data").len(),
                algorithm.digest_size(),
                "size mismatch for {}",
                algorithm
            );
        }
    }

    #[test]
    fn test_streaming_matches_one_shot() {
        let mut hasher = StreamingDigest::new(DigestAlgorithm::Sha256);
        hasher.update(b"hel");
        hasher.update(b"lo");
        assert_eq!(hasher.finalize(), digest(DigestAlgorithm::Sha256, b"hello"));
    }

    #[test]
    fn test_digest_document() {
        let doc = SignedDocument::from_bytes(b"hello".to_vec());
        assert_eq!(
            digest_document(&doc, DigestAlgorithm::Sha256).unwrap(),
            digest(DigestAlgorithm::Sha256, b"hello")
        );

        let known = Digest::new(DigestAlgorithm::Sha256, vec![7; 32]);
        let hash_only = SignedDocument::digest_only(None, vec![known.clone()]);
        assert_eq!(
            digest_document(&hash_only, DigestAlgorithm::Sha256).unwrap(),
            known.value
        );
        assert!(digest_document(&hash_only, DigestAlgorithm::Sha512).is_none());
    }
}
