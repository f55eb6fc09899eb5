//! Centralized Testing Utilities
//!
//! Mock ports for the propagation engine. Available with the `test-utils`
//! feature.

use crate::domain::{ExtensionError, SendError};
use crate::ports::{BatchSender, CandidateSource, PropagationBatch, SegmentExtender};
use async_trait::async_trait;
use parking_lot::Mutex;
use pqa_01_beacon_store::{RowId, StoreError};
use shared_types::{
    AsEntry, Beacon, Context, HopField, IfId, PathSegment, TargetKey, IA,
};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Extender that appends a bare entry for `local` and records every call.
#[derive(Debug, Default)]
pub struct MockExtender {
    pub local: IA,
    /// Egress interface whose extensions fail.
    pub fail_on_egress: Option<IfId>,
    /// Delay before each extension completes.
    pub delay: Option<Duration>,
    calls: Mutex<Vec<(IfId, IfId)>>,
}

impl MockExtender {
    pub fn new(local: IA) -> Self {
        Self {
            local,
            ..Default::default()
        }
    }

    /// Builder method: fail every extension out of `egress`.
    pub fn failing_on(mut self, egress: IfId) -> Self {
        self.fail_on_egress = Some(egress);
        self
    }

    /// Builder method: stall each extension for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `(ingress, egress)` of every call, in call order.
    pub fn calls(&self) -> Vec<(IfId, IfId)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SegmentExtender for MockExtender {
    async fn extend(
        &self,
        _ctx: &Context,
        segment: &mut PathSegment,
        ingress: IfId,
        egress: IfId,
        _peers: &[IfId],
    ) -> Result<(), ExtensionError> {
        self.calls.lock().push((ingress, egress));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_on_egress == Some(egress) {
            return Err(ExtensionError::Rejected("Mock failure".to_string()));
        }

        segment.as_entries.push(AsEntry {
            local: self.local,
            next: IA::default(),
            hop_field: HopField {
                cons_ingress: ingress,
                cons_egress: egress,
                exp_time: 63,
                mac: [0; 6],
            },
            ingress_mtu: 1472,
            mtu: 1472,
            pqa_extension: None,
            signature: Vec::new(),
        });
        Ok(())
    }
}

/// Sender that keeps every batch it is handed.
#[derive(Debug, Default)]
pub struct RecordingSender {
    /// Should fail?
    pub should_fail: bool,
    batches: Mutex<Vec<PropagationBatch>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn batches(&self) -> Vec<PropagationBatch> {
        self.batches.lock().clone()
    }
}

#[async_trait]
impl BatchSender for RecordingSender {
    async fn send(&self, _ctx: &Context, batch: PropagationBatch) -> Result<(), SendError> {
        if self.should_fail {
            return Err(SendError("Mock failure".to_string()));
        }
        self.batches.lock().push(batch);
        Ok(())
    }
}

/// Candidate source over fixed rows, optionally failing every read.
#[derive(Debug, Default)]
pub struct MockCandidateSource {
    pub targets: BTreeMap<TargetKey, Vec<RowId>>,
    pub rows: BTreeMap<RowId, Beacon>,
    /// Should fail?
    pub should_fail: bool,
}

impl MockCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: store `beacon` as `row_id` serving `target`.
    pub fn with_beacon(mut self, target: TargetKey, row_id: RowId, beacon: Beacon) -> Self {
        self.targets.entry(target).or_default().push(row_id);
        self.rows.insert(row_id, beacon);
        self
    }

    /// Builder method: fail every read.
    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    fn fail(&self) -> Result<(), StoreError> {
        if self.should_fail {
            return Err(StoreError::Read {
                context: "mock",
                message: "Mock failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CandidateSource for MockCandidateSource {
    fn beacon_ids_for_target(&self, target: &TargetKey) -> Vec<RowId> {
        self.targets.get(target).cloned().unwrap_or_default()
    }

    fn active_targets(&self, source: &IA) -> Vec<TargetKey> {
        self.targets
            .keys()
            .filter(|key| key.ia == *source)
            .copied()
            .collect()
    }

    async fn fetch_beacons(
        &self,
        ctx: &Context,
        row_ids: &[RowId],
    ) -> Result<Vec<Beacon>, StoreError> {
        ctx.check()?;
        self.fail()?;
        Ok(row_ids
            .iter()
            .filter_map(|id| self.rows.get(id).cloned())
            .collect())
    }

    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError> {
        ctx.check()?;
        self.fail()?;
        Ok(self
            .targets
            .keys()
            .map(|key| key.ia)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect())
    }
}
