//! Shared certificate pool
//!
//! One pool may be shared across every signature of a validation session;
//! the same physical certificate bytes never produce two distinct entries.
//! Mutations are serialized behind a single mutex; the pool is not on a hot
//! path.

use crate::certificate::CertificateToken;
use crate::token::Token;
use ades_types::{CertificateSourceType, DssId};
use cms::signed_data::SignerIdentifier;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

struct PoolEntry {
    token: Arc<CertificateToken>,
    sources: BTreeSet<CertificateSourceType>,
}

/// Deduplicating certificate registry keyed by [`DssId`]
#[derive(Default)]
pub struct CertificatePool {
    entries: Mutex<HashMap<DssId, PoolEntry>>,
}

impl CertificatePool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a certificate, recording which kind of source contributed
    /// it, and return the canonical shared instance.
    pub fn add(
        &self,
        token: CertificateToken,
        source: CertificateSourceType,
    ) -> Arc<CertificateToken> {
        let id = token.dss_id();
        let mut entries = self.entries.lock().expect("pool lock poisoned");
        let entry = entries.entry(id).or_insert_with(|| PoolEntry {
            token: Arc::new(token),
            sources: BTreeSet::new(),
        });
        entry.sources.insert(source);
        Arc::clone(&entry.token)
    }

    /// Look up a certificate by identifier
    pub fn by_id(&self, id: &DssId) -> Option<Arc<CertificateToken>> {
        let entries = self.entries.lock().expect("pool lock poisoned");
        entries.get(id).map(|e| Arc::clone(&e.token))
    }

    /// The kinds of sources that contributed a certificate
    pub fn sources_of(&self, id: &DssId) -> Vec<CertificateSourceType> {
        let entries = self.entries.lock().expect("pool lock poisoned");
        entries
            .get(id)
            .map(|e| e.sources.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All certificates matching a CMS SignerIdentifier
    pub fn find_by_signer_identifier(
        &self,
        sid: &SignerIdentifier,
    ) -> Vec<Arc<CertificateToken>> {
        let entries = self.entries.lock().expect("pool lock poisoned");
        entries
            .values()
            .filter(|e| e.token.matches_signer_identifier(sid))
            .map(|e| Arc::clone(&e.token))
            .collect()
    }

    /// Every certificate in the pool
    pub fn all(&self) -> Vec<Arc<CertificateToken>> {
        let entries = self.entries.lock().expect("pool lock poisoned");
        entries.values().map(|e| Arc::clone(&e.token)).collect()
    }

    /// Number of distinct certificates
    pub fn len(&self) -> usize {
        self.entries.lock().expect("pool lock poisoned").len()
    }

    /// True when the pool holds no certificates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
