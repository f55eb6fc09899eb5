//! # Core Domain Entities
//!
//! Addressing and target identity types shared by the beacon store and the
//! propagation engine.
//!
//! ## Clusters
//!
//! - **Addressing**: `Isd`, `Asn`, `IA`, `IfId`
//! - **Propagation intent**: `QualityId`, `Direction`, `TargetKey`

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Local interface identifier. `0` is never assigned to a real interface.
pub type IfId = u16;

// =============================================================================
// CLUSTER A: ADDRESSING
// =============================================================================

/// Isolation domain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Isd(pub u16);

/// Autonomous system number (48 bits used).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Asn(pub u64);

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // BGP-compatible numbers print in decimal, the rest as three hex groups.
        if self.0 <= u64::from(u32::MAX) {
            return write!(f, "{}", self.0);
        }
        write!(
            f,
            "{:x}:{:x}:{:x}",
            (self.0 >> 32) & 0xffff,
            (self.0 >> 16) & 0xffff,
            self.0 & 0xffff
        )
    }
}

/// An ISD-AS pair identifying one network.
///
/// A zero component acts as a wildcard in store queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct IA {
    /// Isolation domain.
    pub isd: Isd,
    /// AS number inside the isolation domain.
    pub asn: Asn,
}

impl IA {
    /// Creates an IA from raw numbers.
    pub const fn new(isd: u16, asn: u64) -> Self {
        Self {
            isd: Isd(isd),
            asn: Asn(asn),
        }
    }

    /// Both components unset.
    pub fn is_zero(&self) -> bool {
        self.isd.0 == 0 && self.asn.0 == 0
    }

    /// Wildcard match: a zero ISD or AS in `self` matches any value in `other`.
    pub fn matches(&self, other: &IA) -> bool {
        (self.isd.0 == 0 || self.isd == other.isd) && (self.asn.0 == 0 || self.asn == other.asn)
    }
}

impl fmt::Display for IA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.isd.0, self.asn)
    }
}

// =============================================================================
// CLUSTER B: PROPAGATION INTENT
// =============================================================================

/// Identifier of a path-quality ranking strategy.
///
/// Only identifies the strategy. The ranking behaviour itself is resolved
/// by the propagation engine through its quality registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QualityId(pub u8);

impl QualityId {
    /// Fewest AS hops.
    pub const HOP_COUNT: QualityId = QualityId(0);
    /// Most recently originated.
    pub const FRESHNESS: QualityId = QualityId(1);
}

impl fmt::Display for QualityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Which way a target's beacons are meant to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Paths are used in construction direction.
    Forward,
    /// Paths are used against construction direction.
    Backward,
    /// Paths must be good in both directions.
    Symmetric,
}

/// Identity of a propagation target.
///
/// Two targets are the same iff all four fields match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetKey {
    /// Ranking strategy.
    pub quality: QualityId,
    /// Eligible egress direction class.
    pub direction: Direction,
    /// Disambiguates concurrent targets with the same quality and direction.
    pub uniquifier: u32,
    /// Network the target's beacons originate from.
    pub ia: IA,
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{:?}/{}",
            self.ia, self.quality, self.direction, self.uniquifier
        )
    }
}
