//! Row access over a locked backend.

use super::{BeaconStore, KeyValueStore, TimeSource};
use crate::domain::keys::{decode_row_id, next_row_id_key, record_key, seg_key, KeyPrefix};
use crate::domain::{RowId, StoreError, StoredBeaconRecord};
use shared_types::Hash;

impl<KV, TS> BeaconStore<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    pub(crate) fn lookup_row_id(kv: &KV, seg_id: &Hash) -> Result<Option<RowId>, StoreError> {
        let Some(raw) = kv
            .get(&seg_key(seg_id))
            .map_err(StoreError::read("segment index lookup"))?
        else {
            return Ok(None);
        };
        decode_row_id(&raw)
            .map(Some)
            .ok_or_else(|| StoreError::Read {
                context: "segment index lookup",
                message: format!("malformed row id ({} bytes)", raw.len()),
            })
    }

    pub(crate) fn load_record(
        kv: &KV,
        row_id: RowId,
    ) -> Result<Option<StoredBeaconRecord>, StoreError> {
        let Some(raw) = kv
            .get(&record_key(row_id))
            .map_err(StoreError::read("row lookup"))?
        else {
            return Ok(None);
        };
        Self::decode_record(row_id, &raw).map(Some)
    }

    pub(crate) fn scan_records(kv: &KV) -> Result<Vec<StoredBeaconRecord>, StoreError> {
        kv.prefix_scan(KeyPrefix::Record.as_bytes())
            .map_err(StoreError::read("row scan"))?
            .into_iter()
            .map(|(key, raw)| {
                let row_id = decode_row_id(&key[KeyPrefix::Record.as_bytes().len()..])
                    .unwrap_or_default();
                Self::decode_record(row_id, &raw)
            })
            .collect()
    }

    pub(crate) fn next_row_id(kv: &KV) -> Result<RowId, StoreError> {
        match kv
            .get(&next_row_id_key())
            .map_err(StoreError::read("row id counter"))?
        {
            Some(raw) => decode_row_id(&raw).ok_or_else(|| StoreError::Read {
                context: "row id counter",
                message: format!("malformed counter ({} bytes)", raw.len()),
            }),
            None => Ok(1),
        }
    }

    pub(crate) fn encode_record(record: &StoredBeaconRecord) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(record).map_err(|e| StoreError::InputData(e.to_string()))
    }

    fn decode_record(row_id: RowId, raw: &[u8]) -> Result<StoredBeaconRecord, StoreError> {
        bincode::deserialize(raw).map_err(|e| StoreError::Data {
            row_id,
            message: e.to_string(),
        })
    }
}
