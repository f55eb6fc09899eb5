//! # Target Index
//!
//! In-memory association of propagation targets to the beacon rows that
//! serve them. It is rebuilt from incoming beacons and is not persisted.

use crate::domain::record::RowId;
use parking_lot::RwLock;
use shared_types::{TargetKey, IA};
use std::collections::{BTreeMap, BTreeSet};

/// Target to row-id associations.
///
/// Row ids come back in ascending order, targets in [`TargetKey`] order.
#[derive(Debug, Default)]
pub struct TargetIndex {
    associations: RwLock<BTreeMap<TargetKey, BTreeSet<RowId>>>,
}

impl TargetIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `row_id` serves `target`. Idempotent.
    pub fn associate_beacon(&self, row_id: RowId, target: TargetKey) {
        self.associations
            .write()
            .entry(target)
            .or_default()
            .insert(row_id);
    }

    /// Row ids associated with `target`; empty for an unknown target.
    pub fn get_beacon_ids_for_target(&self, target: &TargetKey) -> Vec<RowId> {
        self.associations
            .read()
            .get(target)
            .map(|rows| rows.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Targets with at least one associated beacon whose origin is `source`.
    pub fn get_active_targets(&self, source: &IA) -> Vec<TargetKey> {
        self.associations
            .read()
            .iter()
            .filter(|(key, rows)| key.ia == *source && !rows.is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    /// Drops `rows` from every target, removing targets left empty.
    ///
    /// Returns the number of associations removed.
    pub fn forget_rows(&self, rows: &[RowId]) -> usize {
        if rows.is_empty() {
            return 0;
        }
        let mut associations = self.associations.write();
        let mut removed = 0;
        associations.retain(|_, ids| {
            for row in rows {
                if ids.remove(row) {
                    removed += 1;
                }
            }
            !ids.is_empty()
        });
        removed
    }

    /// Number of targets currently tracked.
    pub fn target_count(&self) -> usize {
        self.associations.read().len()
    }
}
