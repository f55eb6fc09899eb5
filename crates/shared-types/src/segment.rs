//! # Path Segments
//!
//! A path segment is the ordered chain of AS-level hop entries a beacon
//! carries. Entries are appended by each AS on the way (extension); once
//! appended they are never modified.
//!
//! ## Identity
//!
//! - [`PathSegment::id`]: SHA-256 over `(local IA, cons_ingress, cons_egress)`
//!   of every entry. Two receptions of the same path share this id even if
//!   they were originated at different times.
//! - [`PathSegment::full_id`]: `id` plus the segment info (timestamp and
//!   segment id), unique per origination.
//!
//! ## Wire Format
//!
//! Segments are packed with `bincode` for storage. The packed form is
//! opaque to the store; only this module interprets it.

use crate::entities::{Direction, Hash, IfId, QualityId, TargetKey, Timestamp, IA};
use crate::errors::SegmentError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Seconds covered by one unit of the relative hop-field expiry.
const EXP_TIME_UNIT_SECS: u64 = 86_400 / 256;

/// Hop field of an AS entry, in construction direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopField {
    /// Interface the beacon entered the AS on (0 at the origin).
    pub cons_ingress: IfId,
    /// Interface the beacon left the AS on.
    pub cons_egress: IfId,
    /// Relative expiry, in units of 86400/256 seconds minus one.
    pub exp_time: u8,
    /// Hop authenticator.
    pub mac: [u8; 6],
}

impl HopField {
    /// Absolute lifetime of this hop field in seconds.
    pub fn lifetime_secs(&self) -> u64 {
        (1 + u64::from(self.exp_time)) * EXP_TIME_UNIT_SECS
    }
}

/// Path-quality-aware beaconing extension carried by the originating entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PqaExtension {
    /// Ranking strategy the originator asks for.
    pub quality: QualityId,
    /// Direction class of the intended paths.
    pub direction: Direction,
    /// Originator-chosen disambiguator.
    pub uniquifier: u32,
}

impl PqaExtension {
    /// The target these beacons serve when originated by `origin`.
    pub fn target_key(&self, origin: IA) -> TargetKey {
        TargetKey {
            quality: self.quality,
            direction: self.direction,
            uniquifier: self.uniquifier,
            ia: origin,
        }
    }
}

/// One AS-level entry of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsEntry {
    /// The AS that created this entry.
    pub local: IA,
    /// The AS the beacon was sent to next.
    pub next: IA,
    /// Hop field of this AS.
    pub hop_field: HopField,
    /// MTU of the ingress link.
    pub ingress_mtu: u16,
    /// AS-internal MTU.
    pub mtu: u16,
    /// PQA extension (only meaningful on the first entry).
    pub pqa_extension: Option<PqaExtension>,
    /// Opaque signature over the entry. Never interpreted here.
    pub signature: Vec<u8>,
}

impl AsEntry {
    /// The link `(local IA, ingress interface)` this entry represents.
    pub fn link(&self) -> (IA, IfId) {
        (self.local, self.hop_field.cons_ingress)
    }
}

/// Origination metadata of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    /// Origination time.
    pub timestamp: Timestamp,
    /// Random segment identifier chosen by the originator.
    pub segment_id: u16,
}

/// An ordered chain of AS entries plus origination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Origination metadata.
    pub info: SegmentInfo,
    /// AS entries in construction order.
    pub as_entries: Vec<AsEntry>,
}

impl PathSegment {
    /// Creates an empty segment (no AS entries yet).
    pub fn new(info: SegmentInfo) -> Self {
        Self {
            info,
            as_entries: Vec::new(),
        }
    }

    /// Builder method: set AS entries.
    pub fn with_entries(mut self, as_entries: Vec<AsEntry>) -> Self {
        self.as_entries = as_entries;
        self
    }

    /// Content-derived identity, stable across re-originations.
    pub fn id(&self) -> Hash {
        let mut hasher = Sha256::new();
        self.hash_entries(&mut hasher);
        finalize(hasher)
    }

    /// Identity including origination metadata.
    pub fn full_id(&self) -> Hash {
        let mut hasher = Sha256::new();
        self.hash_entries(&mut hasher);
        hasher.update(self.info.timestamp.to_be_bytes());
        hasher.update(self.info.segment_id.to_be_bytes());
        finalize(hasher)
    }

    fn hash_entries(&self, hasher: &mut Sha256) {
        for entry in &self.as_entries {
            hasher.update(entry.local.isd.0.to_be_bytes());
            hasher.update(entry.local.asn.0.to_be_bytes());
            hasher.update(entry.hop_field.cons_ingress.to_be_bytes());
            hasher.update(entry.hop_field.cons_egress.to_be_bytes());
        }
    }

    /// Originating AS, if the segment has any entry.
    pub fn first_ia(&self) -> Option<IA> {
        self.as_entries.first().map(|e| e.local)
    }

    /// Number of AS entries.
    pub fn hops(&self) -> usize {
        self.as_entries.len()
    }

    /// Latest expiry over all hop fields.
    pub fn max_expiry(&self) -> Timestamp {
        let lifetime = self
            .as_entries
            .iter()
            .map(|e| e.hop_field.lifetime_secs())
            .max()
            .unwrap_or(0);
        self.info.timestamp.saturating_add(lifetime)
    }

    /// PQA extension of the originating entry.
    pub fn pqa_extension(&self) -> Option<&PqaExtension> {
        self.as_entries.first()?.pqa_extension.as_ref()
    }

    /// Whether any entry was created by `ia`.
    pub fn traverses(&self, ia: &IA) -> bool {
        self.as_entries.iter().any(|e| e.local == *ia)
    }

    /// Whether some AS appears more than once.
    pub fn has_as_loop(&self) -> bool {
        self.as_entries
            .iter()
            .enumerate()
            .any(|(i, e)| self.as_entries[i + 1..].iter().any(|o| o.local == e.local))
    }

    /// Encodes the segment for storage.
    pub fn pack(&self) -> Result<Vec<u8>, SegmentError> {
        bincode::serialize(self).map_err(|e| SegmentError::Encode(e.to_string()))
    }

    /// Decodes a packed segment.
    pub fn unpack(data: &[u8]) -> Result<Self, SegmentError> {
        bincode::deserialize(data).map_err(|e| SegmentError::Decode(e.to_string()))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ts={} id={} ", self.info.timestamp, self.info.segment_id)?;
        for (i, entry) in self.as_entries.iter().enumerate() {
            if i > 0 {
                write!(f, " > ")?;
            }
            write!(
                f,
                "{}#{},{}",
                entry.local, entry.hop_field.cons_ingress, entry.hop_field.cons_egress
            )?;
        }
        Ok(())
    }
}

fn finalize(hasher: Sha256) -> Hash {
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
