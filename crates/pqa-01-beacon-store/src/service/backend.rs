//! # PQA Backend
//!
//! The beacon store plus the target index. Inserting a beacon that carries
//! a PQA extension also records which target it serves; expiry sweeps drop
//! the index entries of removed rows.
//!
//! Insert+associate and delete+forget run under one index lock, so a sweep
//! never lands between a row write and its association.

use super::BeaconStore;
use crate::domain::{InsertStats, QueryParams, RowId, StoreError, StoredBeacon, TargetIndex, Usage};
use crate::ports::inbound::BeaconDb;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Beacon, Context, TargetKey, Timestamp, IA};

#[cfg(feature = "tracing-log")]
use tracing::debug;

/// Beacon store with target bookkeeping.
pub struct PqaBackend<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    store: BeaconStore<KV, TS>,
    targets: TargetIndex,
    index_lock: Mutex<()>,
}

impl<KV, TS> PqaBackend<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    pub fn new(store: BeaconStore<KV, TS>) -> Self {
        Self {
            store,
            targets: TargetIndex::new(),
            index_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &BeaconStore<KV, TS> {
        &self.store
    }

    pub fn targets(&self) -> &TargetIndex {
        &self.targets
    }

    /// Row ids serving `target`.
    pub fn get_beacon_ids_for_target(&self, target: &TargetKey) -> Vec<RowId> {
        self.targets.get_beacon_ids_for_target(target)
    }

    /// Targets originated by `source` that have stored beacons.
    pub fn get_active_targets(&self, source: &IA) -> Vec<TargetKey> {
        self.targets.get_active_targets(source)
    }

    /// Removes expired rows and their target associations.
    pub fn prune_expired(&self, ctx: &Context, now: Timestamp) -> Result<usize, StoreError> {
        let (rows, forgotten) = {
            let _guard = self.index_lock.lock();
            let rows = self.store.delete_expired_rows(ctx, now)?;
            let forgotten = self.targets.forget_rows(&rows);
            (rows, forgotten)
        };

        #[cfg(feature = "tracing-log")]
        if !rows.is_empty() {
            debug!(
                "[pqa-01] Pruned {} rows, {} target associations",
                rows.len(),
                forgotten
            );
        }
        #[cfg(not(feature = "tracing-log"))]
        let _ = forgotten;

        Ok(rows.len())
    }

    /// Upserts `beacon` and records its target in one step.
    pub fn insert_indexed(
        &self,
        ctx: &Context,
        beacon: &Beacon,
        usage: Usage,
    ) -> Result<InsertStats, StoreError> {
        let target = match (beacon.segment.pqa_extension(), beacon.segment.first_ia()) {
            (Some(extension), Some(origin)) => Some(extension.target_key(origin)),
            _ => None,
        };

        let _guard = self.index_lock.lock();
        let (stats, row_id) = self.store.upsert_beacon(ctx, beacon, usage)?;
        if let Some(target) = target {
            self.targets.associate_beacon(row_id, target);

            #[cfg(feature = "tracing-log")]
            debug!("[pqa-01] Row {} serves target {}", row_id, target);
        }

        Ok(stats)
    }
}

#[async_trait]
impl<KV, TS> BeaconDb for PqaBackend<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    async fn insert_beacon(
        &self,
        ctx: &Context,
        beacon: &Beacon,
        usage: Usage,
    ) -> Result<InsertStats, StoreError> {
        self.insert_indexed(ctx, beacon, usage)
    }

    async fn get_beacons(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        self.store.get_beacons(ctx, params).await
    }

    async fn get_beacon_by_id(&self, ctx: &Context, row_id: RowId) -> Result<Beacon, StoreError> {
        self.store.get_beacon_by_id(ctx, row_id).await
    }

    async fn beacon_row_id(&self, ctx: &Context, beacon: &Beacon) -> Result<RowId, StoreError> {
        self.store.beacon_row_id(ctx, beacon).await
    }

    async fn get_beacons_by_id(
        &self,
        ctx: &Context,
        row_ids: &[RowId],
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        self.store.get_beacons_by_id(ctx, row_ids).await
    }

    async fn candidate_beacons(
        &self,
        ctx: &Context,
        set_size: usize,
        usage: Usage,
        src: IA,
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        self.store.candidate_beacons(ctx, set_size, usage, src).await
    }

    async fn delete_expired_beacons(
        &self,
        ctx: &Context,
        now: Timestamp,
    ) -> Result<usize, StoreError> {
        self.prune_expired(ctx, now)
    }

    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError> {
        self.store.beacon_sources(ctx).await
    }
}
