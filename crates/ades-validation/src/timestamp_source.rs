//! Per-signature timestamp aggregation and classification

use crate::error::{Error, Result};
use ades_tsp::TimestampToken;
use ades_types::{DssId, TimestampType};
use ades_x509::Token;
use std::collections::HashSet;

/// Every timestamp attached to one signature, classified by semantic role.
///
/// Buckets keep insertion order; the union view deduplicates by token
/// identity.
#[derive(Default)]
pub struct TimestampSource {
    content_timestamps: Vec<TimestampToken>,
    signature_timestamps: Vec<TimestampToken>,
    timestamps_x1: Vec<TimestampToken>,
    timestamps_x2: Vec<TimestampToken>,
    archive_timestamps: Vec<TimestampToken>,
    document_timestamps: Vec<TimestampToken>,
}

impl TimestampSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a timestamp into the bucket matching its type
    pub fn add(&mut self, timestamp: TimestampToken) {
        match timestamp.timestamp_type() {
            TimestampType::ContentTimestamp
            | TimestampType::AllDataObjectsTimestamp
            | TimestampType::IndividualDataObjectsTimestamp => {
                self.content_timestamps.push(timestamp)
            }
            TimestampType::SignatureTimestamp => self.signature_timestamps.push(timestamp),
            TimestampType::ValidationDataTimestamp => self.timestamps_x1.push(timestamp),
            TimestampType::ValidationDataRefsOnlyTimestamp => self.timestamps_x2.push(timestamp),
            TimestampType::ArchiveTimestamp => self.archive_timestamps.push(timestamp),
            TimestampType::DocumentTimestamp => self.document_timestamps.push(timestamp),
        }
    }

    /// Attach a caller-constructed timestamp, typically when extending a
    /// signature with a fresh archive timestamp. The timestamp must have
    /// been processed (`match_data`) before.
    pub fn add_external_timestamp(&mut self, timestamp: TimestampToken) -> Result<()> {
        if !timestamp.is_processed() {
            return Err(Error::IllegalState(
                "external timestamps must be matched against their data before being attached"
                    .to_string(),
            ));
        }
        self.add(timestamp);
        Ok(())
    }

    /// Timestamps over content prior to signing
    pub fn content_timestamps(&self) -> &[TimestampToken] {
        &self.content_timestamps
    }

    /// Timestamps over the signature value
    pub fn signature_timestamps(&self) -> &[TimestampToken] {
        &self.signature_timestamps
    }

    /// SigAndRefs timestamps (X1)
    pub fn timestamps_x1(&self) -> &[TimestampToken] {
        &self.timestamps_x1
    }

    /// RefsOnly timestamps (X2)
    pub fn timestamps_x2(&self) -> &[TimestampToken] {
        &self.timestamps_x2
    }

    /// Archive timestamps
    pub fn archive_timestamps(&self) -> &[TimestampToken] {
        &self.archive_timestamps
    }

    /// PAdES DocTimeStamp revisions
    pub fn document_timestamps(&self) -> &[TimestampToken] {
        &self.document_timestamps
    }

    /// Every timestamp, content first, deduplicated by identity
    pub fn all_timestamps(&self) -> Vec<&TimestampToken> {
        let mut seen: HashSet<DssId> = HashSet::new();
        self.iter_all()
            .filter(|ts| seen.insert(ts.dss_id()))
            .collect()
    }

    /// Iterate every bucket in classification order, without deduplication
    pub fn iter_all(&self) -> impl Iterator<Item = &TimestampToken> {
        self.content_timestamps
            .iter()
            .chain(self.signature_timestamps.iter())
            .chain(self.timestamps_x1.iter())
            .chain(self.timestamps_x2.iter())
            .chain(self.archive_timestamps.iter())
            .chain(self.document_timestamps.iter())
    }

    /// Mutable iteration, for running `match_data` and signer checks
    pub fn iter_all_mut(&mut self) -> impl Iterator<Item = &mut TimestampToken> {
        self.content_timestamps
            .iter_mut()
            .chain(self.signature_timestamps.iter_mut())
            .chain(self.timestamps_x1.iter_mut())
            .chain(self.timestamps_x2.iter_mut())
            .chain(self.archive_timestamps.iter_mut())
            .chain(self.document_timestamps.iter_mut())
    }

    /// Number of distinct timestamps
    pub fn len(&self) -> usize {
        self.all_timestamps().len()
    }

    /// True when no timestamp is attached
    pub fn is_empty(&self) -> bool {
        self.iter_all().next().is_none()
    }
}
