//! Centralized Testing Utilities
//!
//! Segment builders and store fixtures shared by this crate's tests and
//! downstream test suites. Available with the `test-utils` feature.

use crate::adapters::{InMemoryKVStore, ManualTimeSource};
use crate::domain::StoreConfig;
use crate::service::{BeaconStore, BeaconStoreDependencies, PqaBackend};
use shared_types::{
    AsEntry, Beacon, Direction, HopField, IfId, PathSegment, PqaExtension, QualityId,
    SegmentInfo, Timestamp, IA,
};
use std::sync::Arc;

/// Hop-field expiry used by [`SegmentBuilder`] unless overridden (6 hours).
pub const DEFAULT_EXP_TIME: u8 = 63;

/// Builds path segments hop by hop.
///
/// # Example
///
/// ```rust,ignore
/// let beacon = SegmentBuilder::new(1_000)
///     .hop(IA::new(1, 10), 0, 2)
///     .hop(IA::new(1, 11), 5, 3)
///     .beacon(7);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentBuilder {
    info: SegmentInfo,
    entries: Vec<AsEntry>,
    exp_time: u8,
}

impl SegmentBuilder {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            info: SegmentInfo {
                timestamp,
                segment_id: 1,
            },
            entries: Vec::new(),
            exp_time: DEFAULT_EXP_TIME,
        }
    }

    /// Builder method: set the segment id of the info field.
    pub fn segment_id(mut self, segment_id: u16) -> Self {
        self.info.segment_id = segment_id;
        self
    }

    /// Builder method: relative expiry of hops added afterwards.
    pub fn exp_time(mut self, exp_time: u8) -> Self {
        self.exp_time = exp_time;
        self
    }

    /// Appends an AS entry.
    pub fn hop(mut self, local: IA, ingress: IfId, egress: IfId) -> Self {
        if let Some(prev) = self.entries.last_mut() {
            prev.next = local;
        }
        self.entries.push(AsEntry {
            local,
            next: IA::default(),
            hop_field: HopField {
                cons_ingress: ingress,
                cons_egress: egress,
                exp_time: self.exp_time,
                mac: [0; 6],
            },
            ingress_mtu: 1472,
            mtu: 1472,
            pqa_extension: None,
            signature: Vec::new(),
        });
        self
    }

    /// Marks the first entry with a PQA extension.
    pub fn pqa(mut self, quality: QualityId, direction: Direction, uniquifier: u32) -> Self {
        if let Some(first) = self.entries.first_mut() {
            first.pqa_extension = Some(PqaExtension {
                quality,
                direction,
                uniquifier,
            });
        }
        self
    }

    pub fn build(self) -> PathSegment {
        PathSegment::new(self.info).with_entries(self.entries)
    }

    /// The segment as a beacon received on `in_if_id`.
    pub fn beacon(self, in_if_id: IfId) -> Beacon {
        Beacon::new(self.build(), in_if_id)
    }
}

/// A beacon through `hops` ASes of ISD 1, starting at `origin`'s AS number.
pub fn chain_beacon(origin: IA, hops: u64, timestamp: Timestamp, in_if_id: IfId) -> Beacon {
    let mut builder = SegmentBuilder::new(timestamp);
    for i in 0..hops {
        let ia = IA::new(origin.isd.0, origin.asn.0 + i);
        let ingress = if i == 0 { 0 } else { 10 + i as IfId };
        builder = builder.hop(ia, ingress, 20 + i as IfId);
    }
    builder.beacon(in_if_id)
}

/// In-memory backend driven by a manual clock.
pub type TestBackend = PqaBackend<InMemoryKVStore, Arc<ManualTimeSource>>;

/// In-memory backend with its clock at `now`.
pub fn in_memory_backend(now: Timestamp) -> (TestBackend, Arc<ManualTimeSource>) {
    let time = Arc::new(ManualTimeSource::new(now));
    let store = BeaconStore::new(
        BeaconStoreDependencies {
            kv_store: InMemoryKVStore::new(),
            time_source: time.clone(),
        },
        StoreConfig::default(),
    );
    (PqaBackend::new(store), time)
}
