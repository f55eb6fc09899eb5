//! `BeaconDb` implementation.

use super::BeaconStore;
use crate::domain::keys::{next_row_id_key, record_key, seg_key};
use crate::domain::{
    InsertStats, QueryParams, RowId, StoreError, StoredBeacon, StoredBeaconRecord, Usage,
};
use crate::ports::inbound::BeaconDb;
use crate::ports::outbound::{BatchOperation, KeyValueStore, TimeSource};
use async_trait::async_trait;
use shared_types::{Beacon, Context, Timestamp, IA};
use std::collections::BTreeSet;

#[cfg(feature = "tracing-log")]
use tracing::debug;

impl<KV, TS> BeaconStore<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    /// Removes every row with `expiration_time < now` and returns their ids.
    pub fn delete_expired_rows(
        &self,
        ctx: &Context,
        now: Timestamp,
    ) -> Result<Vec<RowId>, StoreError> {
        ctx.check()?;
        let mut kv = self.kv_store.write();
        ctx.check()?;

        let expired: Vec<StoredBeaconRecord> = Self::scan_records(&kv)?
            .into_iter()
            .filter(|record| record.is_expired(now))
            .collect();
        if expired.is_empty() {
            return Ok(Vec::new());
        }

        let ops = expired
            .iter()
            .flat_map(|record| {
                [
                    BatchOperation::delete(record_key(record.row_id)),
                    BatchOperation::delete(seg_key(&record.seg_id)),
                ]
            })
            .collect();
        kv.atomic_batch_write(ops)
            .map_err(StoreError::write("delete expired"))?;

        #[cfg(feature = "tracing-log")]
        debug!("[pqa-01] Removed {} expired beacons", expired.len());

        Ok(expired.into_iter().map(|record| record.row_id).collect())
    }

    /// Inserts or refreshes `beacon` and returns the row it lives in.
    ///
    /// The row id is resolved under the same write lock as the upsert.
    pub fn upsert_beacon(
        &self,
        ctx: &Context,
        beacon: &Beacon,
        usage: Usage,
    ) -> Result<(InsertStats, RowId), StoreError> {
        ctx.check()?;
        self.validate(beacon)?;
        let seg_id = beacon.segment.id();

        let mut kv = self.kv_store.write();
        ctx.check()?;
        let now = self.time_source.now_nanos();

        match Self::lookup_row_id(&kv, &seg_id)? {
            Some(row_id) => {
                let mut record =
                    Self::load_record(&kv, row_id)?.ok_or_else(|| StoreError::Data {
                        row_id,
                        message: "segment index points at a missing row".to_string(),
                    })?;
                if beacon.segment.info.timestamp <= record.info_time {
                    return Ok((InsertStats::UNCHANGED, row_id));
                }

                record
                    .refresh(beacon, usage, now)
                    .map_err(|e| StoreError::InputData(e.to_string()))?;
                self.check_packed_size(&record)?;
                let value = Self::encode_record(&record)?;
                kv.atomic_batch_write(vec![BatchOperation::put(record_key(row_id), value)])
                    .map_err(StoreError::write("update beacon"))?;

                #[cfg(feature = "tracing-log")]
                debug!("[pqa-01] Refreshed beacon row {} ({})", row_id, usage);

                Ok((InsertStats::UPDATED, row_id))
            }
            None => {
                let row_id = Self::next_row_id(&kv)?;
                let record = StoredBeaconRecord::new(row_id, beacon, usage, now)
                    .map_err(|e| StoreError::InputData(e.to_string()))?;
                self.check_packed_size(&record)?;
                let value = Self::encode_record(&record)?;
                kv.atomic_batch_write(vec![
                    BatchOperation::put(record_key(row_id), value),
                    BatchOperation::put(seg_key(&seg_id), row_id.to_be_bytes().to_vec()),
                    BatchOperation::put(next_row_id_key(), (row_id + 1).to_be_bytes().to_vec()),
                ])
                .map_err(StoreError::write("insert beacon"))?;

                #[cfg(feature = "tracing-log")]
                debug!("[pqa-01] Inserted beacon row {} ({})", row_id, usage);

                Ok((InsertStats::INSERTED, row_id))
            }
        }
    }

    fn validate(&self, beacon: &Beacon) -> Result<(), StoreError> {
        if beacon.segment.as_entries.is_empty() {
            return Err(StoreError::InputData(
                "segment has no AS entries".to_string(),
            ));
        }
        Ok(())
    }

    fn check_packed_size(&self, record: &StoredBeaconRecord) -> Result<(), StoreError> {
        let limit = self.config.max_packed_segment_bytes;
        if record.packed_segment.len() > limit {
            return Err(StoreError::InputData(format!(
                "packed segment is {} bytes, limit {}",
                record.packed_segment.len(),
                limit
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl<KV, TS> BeaconDb for BeaconStore<KV, TS>
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
        self.upsert_beacon(ctx, beacon, usage).map(|(stats, _)| stats)
    }

    async fn get_beacons(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        ctx.check()?;
        let kv = self.kv_store.read();

        let mut records: Vec<StoredBeaconRecord> = Self::scan_records(&kv)?
            .into_iter()
            .filter(|record| params.matches(record))
            .collect();
        drop(kv);

        records.sort_by(|a, b| {
            b.last_updated
                .cmp(&a.last_updated)
                .then(b.row_id.cmp(&a.row_id))
        });
        records
            .iter()
            .map(|record| record.decode().map_err(StoreError::data(record.row_id)))
            .collect()
    }

    async fn get_beacon_by_id(&self, ctx: &Context, row_id: RowId) -> Result<Beacon, StoreError> {
        ctx.check()?;
        let record = Self::load_record(&self.kv_store.read(), row_id)?
            .ok_or_else(|| StoreError::NotFound(format!("row {}", row_id)))?;
        record
            .decode()
            .map(|stored| stored.beacon)
            .map_err(StoreError::data(row_id))
    }

    async fn beacon_row_id(&self, ctx: &Context, beacon: &Beacon) -> Result<RowId, StoreError> {
        ctx.check()?;
        let seg_id = beacon.segment.id();
        Self::lookup_row_id(&self.kv_store.read(), &seg_id)?
            .ok_or_else(|| StoreError::NotFound(format!("segment {}", beacon.segment)))
    }

    async fn get_beacons_by_id(
        &self,
        ctx: &Context,
        row_ids: &[RowId],
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        ctx.check()?;
        let kv = self.kv_store.read();

        let mut beacons = Vec::with_capacity(row_ids.len());
        for &row_id in row_ids {
            match Self::load_record(&kv, row_id)? {
                Some(record) => {
                    beacons.push(record.decode().map_err(StoreError::data(row_id))?);
                }
                None => {
                    #[cfg(feature = "tracing-log")]
                    debug!("[pqa-01] Skipping missing beacon row {}", row_id);
                }
            }
        }
        Ok(beacons)
    }

    async fn candidate_beacons(
        &self,
        ctx: &Context,
        set_size: usize,
        usage: Usage,
        src: IA,
    ) -> Result<Vec<StoredBeacon>, StoreError> {
        ctx.check()?;
        let now = self.time_source.now();
        let kv = self.kv_store.read();

        let mut records: Vec<StoredBeaconRecord> = Self::scan_records(&kv)?
            .into_iter()
            .filter(|record| record.usage.contains(usage))
            .filter(|record| src.is_zero() || record.start_ia == src)
            .filter(|record| !record.is_expired(now))
            .collect();
        drop(kv);

        records.sort_by(|a, b| a.hops.cmp(&b.hops).then(a.row_id.cmp(&b.row_id)));
        records
            .iter()
            .take(set_size)
            .map(|record| record.decode().map_err(StoreError::data(record.row_id)))
            .collect()
    }

    async fn delete_expired_beacons(
        &self,
        ctx: &Context,
        now: Timestamp,
    ) -> Result<usize, StoreError> {
        self.delete_expired_rows(ctx, now).map(|rows| rows.len())
    }

    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError> {
        ctx.check()?;
        let sources: BTreeSet<IA> = Self::scan_records(&self.kv_store.read())?
            .into_iter()
            .map(|record| record.start_ia)
            .collect();
        Ok(sources.into_iter().collect())
    }
}
