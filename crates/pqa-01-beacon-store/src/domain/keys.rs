//! # Key Layout
//!
//! The beacon table lives in a flat key-value store:
//!
//! | Key | Value |
//! |-----|-------|
//! | `r:` + row id (big-endian) | bincode [`StoredBeaconRecord`](crate::domain::record::StoredBeaconRecord) |
//! | `s:` + segment id | row id (big-endian) |
//! | `m:next_row_id` | next row id to allocate (big-endian) |

use crate::domain::record::RowId;
use shared_types::Hash;

/// Key prefixes for different data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// Beacon rows by row id.
    Record,
    /// Segment id to row id.
    SegId,
    /// Store metadata.
    Meta,
}

impl KeyPrefix {
    /// Get the byte prefix for this key type.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            KeyPrefix::Record => b"r:",
            KeyPrefix::SegId => b"s:",
            KeyPrefix::Meta => b"m:",
        }
    }

    /// Create a full key with this prefix.
    pub fn key(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = self.as_bytes().to_vec();
        key.extend_from_slice(suffix);
        key
    }
}

pub fn record_key(row_id: RowId) -> Vec<u8> {
    KeyPrefix::Record.key(&row_id.to_be_bytes())
}

pub fn seg_key(seg_id: &Hash) -> Vec<u8> {
    KeyPrefix::SegId.key(seg_id)
}

pub fn next_row_id_key() -> Vec<u8> {
    KeyPrefix::Meta.key(b"next_row_id")
}

/// Decodes a big-endian row id value.
pub fn decode_row_id(bytes: &[u8]) -> Option<RowId> {
    let raw: [u8; 8] = bytes.try_into().ok()?;
    Some(RowId::from_be_bytes(raw))
}
