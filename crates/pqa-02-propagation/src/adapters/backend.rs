//! Candidate source backed by [`PqaBackend`].

use crate::ports::CandidateSource;
use async_trait::async_trait;
use pqa_01_beacon_store::{BeaconDb, KeyValueStore, PqaBackend, RowId, StoreError, TimeSource};
use shared_types::{Beacon, Context, TargetKey, IA};

#[async_trait]
impl<KV, TS> CandidateSource for PqaBackend<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    fn beacon_ids_for_target(&self, target: &TargetKey) -> Vec<RowId> {
        self.get_beacon_ids_for_target(target)
    }

    fn active_targets(&self, source: &IA) -> Vec<TargetKey> {
        self.get_active_targets(source)
    }

    async fn fetch_beacons(
        &self,
        ctx: &Context,
        row_ids: &[RowId],
    ) -> Result<Vec<Beacon>, StoreError> {
        let stored = self.get_beacons_by_id(ctx, row_ids).await?;
        Ok(stored.into_iter().map(|s| s.beacon).collect())
    }

    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError> {
        BeaconDb::beacon_sources(self, ctx).await
    }
}
