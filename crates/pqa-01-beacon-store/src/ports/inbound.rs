//! # Inbound Ports
//!
//! The beacon database API.

use crate::domain::{InsertStats, QueryParams, RowId, StoreError, StoredBeacon, Usage};
use async_trait::async_trait;
use shared_types::{Beacon, Context, Timestamp, IA};

/// Beacon database - inbound port.
///
/// Every call takes a [`Context`]; once it fires the call fails with
/// [`StoreError::Cancelled`] and leaves the store unchanged.
#[async_trait]
pub trait BeaconDb: Send + Sync {
    /// Inserts `beacon`, or refreshes the existing row with the same segment
    /// id when `beacon` was originated later. A stale or equal-time copy is
    /// a no-op.
    async fn insert_beacon(
        &self,
        ctx: &Context,
        beacon: &Beacon,
        usage: Usage,
    ) -> Result<InsertStats, StoreError>;

    /// Rows matching `params`, most recently updated first.
    async fn get_beacons(
        &self,
        ctx: &Context,
        params: &QueryParams,
    ) -> Result<Vec<StoredBeacon>, StoreError>;

    /// The beacon stored under `row_id`.
    async fn get_beacon_by_id(&self, ctx: &Context, row_id: RowId) -> Result<Beacon, StoreError>;

    /// Row id of the stored beacon with the same segment id as `beacon`.
    async fn beacon_row_id(&self, ctx: &Context, beacon: &Beacon) -> Result<RowId, StoreError>;

    /// Beacons for `row_ids`, in the given order. Ids without a row are
    /// skipped.
    async fn get_beacons_by_id(
        &self,
        ctx: &Context,
        row_ids: &[RowId],
    ) -> Result<Vec<StoredBeacon>, StoreError>;

    /// Up to `set_size` live beacons whose usage contains `usage`, fewest
    /// hops first. A zero `src` matches any origin.
    async fn candidate_beacons(
        &self,
        ctx: &Context,
        set_size: usize,
        usage: Usage,
        src: IA,
    ) -> Result<Vec<StoredBeacon>, StoreError>;

    /// Removes every row with `expiration_time < now`.
    async fn delete_expired_beacons(&self, ctx: &Context, now: Timestamp)
        -> Result<usize, StoreError>;

    /// Distinct origin ASes across all rows.
    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError>;
}
