//! # Stored Beacon Records
//!
//! The persisted row of the beacon table and the decoded view handed back to
//! callers.

use crate::domain::usage::Usage;
use serde::{Deserialize, Serialize};
use shared_types::{Beacon, Hash, IfId, PathSegment, SegmentError, Timestamp, IA};

/// Integer identity of a persisted beacon row. Never reused.
pub type RowId = u64;

/// One row of the beacon table.
///
/// `seg_id` is unique across all live rows. `packed_segment` is the output of
/// [`PathSegment::pack`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBeaconRecord {
    pub row_id: RowId,
    pub seg_id: Hash,
    pub full_id: Hash,
    pub start_ia: IA,
    pub in_if_id: IfId,
    pub hops: usize,
    pub info_time: Timestamp,
    pub expiration_time: Timestamp,
    /// Nanoseconds since epoch of the last insert or refresh.
    pub last_updated: u64,
    pub usage: Usage,
    pub packed_segment: Vec<u8>,
}

impl StoredBeaconRecord {
    /// Builds a fresh row for `beacon`.
    ///
    /// The segment must have at least one AS entry (callers validate this).
    pub fn new(
        row_id: RowId,
        beacon: &Beacon,
        usage: Usage,
        last_updated: u64,
    ) -> Result<Self, SegmentError> {
        let segment = &beacon.segment;
        Ok(Self {
            row_id,
            seg_id: segment.id(),
            full_id: segment.full_id(),
            start_ia: segment.first_ia().unwrap_or_default(),
            in_if_id: beacon.in_if_id,
            hops: segment.hops(),
            info_time: segment.info.timestamp,
            expiration_time: segment.max_expiry(),
            last_updated,
            usage,
            packed_segment: segment.pack()?,
        })
    }

    /// Replaces the row's contents with a newer copy of the same segment.
    ///
    /// `seg_id` and `row_id` are kept; `last_updated` never goes backwards.
    pub fn refresh(
        &mut self,
        beacon: &Beacon,
        usage: Usage,
        now_nanos: u64,
    ) -> Result<(), SegmentError> {
        let segment = &beacon.segment;
        self.packed_segment = segment.pack()?;
        self.full_id = segment.full_id();
        self.in_if_id = beacon.in_if_id;
        self.hops = segment.hops();
        self.info_time = segment.info.timestamp;
        self.expiration_time = segment.max_expiry();
        self.last_updated = self.last_updated.max(now_nanos);
        self.usage = usage;
        Ok(())
    }

    /// Whether the row has expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expiration_time < now
    }

    /// Decodes the row back into a beacon.
    pub fn decode(&self) -> Result<StoredBeacon, SegmentError> {
        Ok(StoredBeacon {
            row_id: self.row_id,
            beacon: Beacon::new(PathSegment::unpack(&self.packed_segment)?, self.in_if_id),
            usage: self.usage,
            last_updated: self.last_updated,
        })
    }
}

/// A beacon read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBeacon {
    pub row_id: RowId,
    pub beacon: Beacon,
    pub usage: Usage,
    pub last_updated: u64,
}

/// Outcome of one insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertStats {
    pub inserted: usize,
    pub updated: usize,
}

impl InsertStats {
    pub const INSERTED: InsertStats = InsertStats {
        inserted: 1,
        updated: 0,
    };
    pub const UPDATED: InsertStats = InsertStats {
        inserted: 0,
        updated: 1,
    };
    pub const UNCHANGED: InsertStats = InsertStats {
        inserted: 0,
        updated: 0,
    };

    /// Whether the insert left the store untouched.
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0
    }
}
