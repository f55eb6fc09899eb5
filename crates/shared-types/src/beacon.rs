//! # Beacon Entity
//!
//! A beacon is a path segment plus the local interface it arrived on. The
//! egress interface is only assigned while the beacon is being extended for
//! propagation out of a specific interface.

use crate::entities::{IfId, IA};
use crate::errors::SegmentError;
use crate::segment::PathSegment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A received (or about-to-be-propagated) path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beacon {
    /// The path segment.
    pub segment: PathSegment,
    /// Interface the beacon was received on.
    pub in_if_id: IfId,
    /// Interface the beacon is being propagated on, if any.
    pub eg_if_id: Option<IfId>,
}

impl Beacon {
    /// Creates a received beacon.
    pub fn new(segment: PathSegment, in_if_id: IfId) -> Self {
        Self {
            segment,
            in_if_id,
            eg_if_id: None,
        }
    }

    /// Link diversity towards `other`.
    ///
    /// Counts the links `(local IA, ingress interface)` of this beacon that
    /// do not appear in `other`. Not symmetric: `a.diversity(b)` and
    /// `b.diversity(a)` generally differ. Returns 0 if either segment has no
    /// entries.
    pub fn diversity(&self, other: &Beacon) -> usize {
        if self.segment.as_entries.is_empty() || other.segment.as_entries.is_empty() {
            return 0;
        }
        self.segment
            .as_entries
            .iter()
            .filter(|entry| {
                let link = entry.link();
                !other.segment.as_entries.iter().any(|o| o.link() == link)
            })
            .count()
    }

    /// Independent copy through a full encode/decode of the segment.
    pub fn deep_copy(&self) -> Result<Beacon, SegmentError> {
        let packed = self.segment.pack()?;
        Ok(Beacon {
            segment: PathSegment::unpack(&packed)?,
            in_if_id: self.in_if_id,
            eg_if_id: self.eg_if_id,
        })
    }

    /// Whether sending this beacon to `next` would create a forwarding loop.
    pub fn would_loop(&self, next: &IA) -> bool {
        self.segment.traverses(next) || self.segment.has_as_loop()
    }
}

impl fmt::Display for Beacon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ingress: {} Segment: [ {} ]", self.in_if_id, self.segment)
    }
}
