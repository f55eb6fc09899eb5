//! # MAC Extender
//!
//! Appends the local AS entry to a segment. The hop MAC is HMAC-SHA256 over
//! the segment info, the hop's interfaces and expiry, and the previous
//! hop's MAC, truncated to 6 bytes. Entries are left unsigned.

use crate::domain::ExtensionError;
use crate::ports::SegmentExtender;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared_types::{AsEntry, Context, HopField, IfId, PathSegment, IA};
use std::collections::BTreeMap;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Default relative hop expiry (6 hours).
pub const DEFAULT_HOP_EXP_TIME: u8 = 63;

/// Default AS-internal MTU.
pub const DEFAULT_MTU: u16 = 1472;

/// Segment extender for the local AS.
pub struct MacExtender {
    local: IA,
    key: Vec<u8>,
    exp_time: u8,
    mtu: u16,
    neighbours: BTreeMap<IfId, IA>,
}

impl MacExtender {
    pub fn new(local: IA, key: impl Into<Vec<u8>>) -> Self {
        Self {
            local,
            key: key.into(),
            exp_time: DEFAULT_HOP_EXP_TIME,
            mtu: DEFAULT_MTU,
            neighbours: BTreeMap::new(),
        }
    }

    /// Builder method: the AS behind `if_id`.
    pub fn with_neighbour(mut self, if_id: IfId, remote: IA) -> Self {
        self.neighbours.insert(if_id, remote);
        self
    }

    /// Builder method: relative expiry of created hop fields.
    pub fn with_exp_time(mut self, exp_time: u8) -> Self {
        self.exp_time = exp_time;
        self
    }

    /// Builder method: AS-internal MTU.
    pub fn with_mtu(mut self, mtu: u16) -> Self {
        self.mtu = mtu;
        self
    }

    fn hop_mac(
        &self,
        segment: &PathSegment,
        ingress: IfId,
        egress: IfId,
    ) -> Result<[u8; 6], ExtensionError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| ExtensionError::Rejected(format!("invalid MAC key: {}", e)))?;
        mac.update(&segment.info.timestamp.to_be_bytes());
        mac.update(&segment.info.segment_id.to_be_bytes());
        mac.update(&[self.exp_time]);
        mac.update(&ingress.to_be_bytes());
        mac.update(&egress.to_be_bytes());
        if let Some(prev) = segment.as_entries.last() {
            mac.update(&prev.hop_field.mac);
        }

        let digest = mac.finalize().into_bytes();
        let mut out = [0u8; 6];
        out.copy_from_slice(&digest[..6]);
        Ok(out)
    }
}

impl fmt::Debug for MacExtender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacExtender")
            .field("local", &self.local)
            .field("exp_time", &self.exp_time)
            .field("mtu", &self.mtu)
            .field("neighbours", &self.neighbours)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SegmentExtender for MacExtender {
    async fn extend(
        &self,
        _ctx: &Context,
        segment: &mut PathSegment,
        ingress: IfId,
        egress: IfId,
        _peers: &[IfId],
    ) -> Result<(), ExtensionError> {
        if segment.as_entries.last().map(|e| e.local) == Some(self.local) {
            return Err(ExtensionError::Rejected(format!(
                "segment already ends at {}",
                self.local
            )));
        }
        let next = match egress {
            0 => IA::default(),
            id => *self.neighbours.get(&id).ok_or_else(|| {
                ExtensionError::Rejected(format!("unknown egress interface {}", id))
            })?,
        };

        let mac = self.hop_mac(segment, ingress, egress)?;
        segment.as_entries.push(AsEntry {
            local: self.local,
            next,
            hop_field: HopField {
                cons_ingress: ingress,
                cons_egress: egress,
                exp_time: self.exp_time,
                mac,
            },
            ingress_mtu: self.mtu,
            mtu: self.mtu,
            pqa_extension: None,
            signature: Vec::new(),
        });
        Ok(())
    }
}
