//! # Beacon Queries
//!
//! Filters for [`BeaconDb::get_beacons`](crate::ports::inbound::BeaconDb::get_beacons).
//! Each non-empty list is an OR over its elements; the lists are ANDed.

use crate::domain::record::StoredBeaconRecord;
use crate::domain::usage::Usage;
use shared_types::{IfId, Timestamp, IA};

/// Query over stored beacons. The default query matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Segment-id prefixes.
    pub seg_ids: Vec<Vec<u8>>,
    /// Origin ASes. A zero ISD or AS component matches any value; a fully
    /// zero entry is ignored.
    pub starts_at: Vec<IA>,
    /// Ingress interfaces the beacon was received on.
    pub ingress_interfaces: Vec<IfId>,
    /// Usage masks a row must fully contain. Zero masks are ignored.
    pub usages: Vec<Usage>,
    /// Only rows valid at this time (`info_time <= t <= expiration_time`).
    pub valid_at: Option<Timestamp>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a segment-id prefix.
    pub fn with_seg_id(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.seg_ids.push(prefix.into());
        self
    }

    /// Builder method: add an origin AS.
    pub fn with_start(mut self, ia: IA) -> Self {
        self.starts_at.push(ia);
        self
    }

    /// Builder method: add an ingress interface.
    pub fn with_ingress(mut self, if_id: IfId) -> Self {
        self.ingress_interfaces.push(if_id);
        self
    }

    /// Builder method: add a usage mask.
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usages.push(usage);
        self
    }

    /// Builder method: only rows valid at `time`.
    pub fn valid_at(mut self, time: Timestamp) -> Self {
        self.valid_at = Some(time);
        self
    }

    /// Whether `record` passes every filter.
    pub fn matches(&self, record: &StoredBeaconRecord) -> bool {
        if !self.seg_ids.is_empty()
            && !self
                .seg_ids
                .iter()
                .any(|prefix| record.seg_id.starts_with(prefix))
        {
            return false;
        }

        let starts: Vec<&IA> = self.starts_at.iter().filter(|ia| !ia.is_zero()).collect();
        if !starts.is_empty() && !starts.iter().any(|ia| ia.matches(&record.start_ia)) {
            return false;
        }

        if !self.ingress_interfaces.is_empty()
            && !self.ingress_interfaces.contains(&record.in_if_id)
        {
            return false;
        }

        let usages: Vec<Usage> = self.usages.iter().copied().filter(|u| !u.is_none()).collect();
        if !usages.is_empty() && !usages.iter().any(|mask| record.usage.contains(*mask)) {
            return false;
        }

        match self.valid_at {
            Some(time) => record.info_time <= time && time <= record.expiration_time,
            None => true,
        }
    }
}
