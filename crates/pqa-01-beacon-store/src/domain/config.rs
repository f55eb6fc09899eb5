//! # Store Configuration

use serde::{Deserialize, Serialize};

/// Configuration for the beacon store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Largest packed segment accepted by `insert_beacon`.
    pub max_packed_segment_bytes: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_packed_segment_bytes: 64 * 1024,
        }
    }
}

impl StoreConfig {
    /// Builder method: set the packed segment size limit.
    pub fn with_max_packed_segment_bytes(mut self, bytes: usize) -> Self {
        self.max_packed_segment_bytes = bytes;
        self
    }
}
