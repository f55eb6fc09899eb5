//! # Beacon Store (pqa-01)
//!
//! Persistent store of received beacons for path-quality-aware beaconing,
//! plus the in-memory index of which beacons serve which propagation target.
//!
//! ## Table Semantics
//!
//! | Rule | Description |
//! |------|-------------|
//! | Unique segment | At most one row per segment id |
//! | Refresh | A newer origination of a stored segment replaces its row in place |
//! | Stale copies | Older or equal-time copies are ignored |
//! | Expiry | Rows with `expiration_time < now` are removed by sweeps |
//! | Atomicity | Every insert, refresh and sweep applies fully or not at all |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Rows, queries, usage masks, key layout, target index
//! - `ports/` - `BeaconDb` (inbound), `KeyValueStore` and `TimeSource` (outbound)
//! - `adapters/` - In-memory, file and RocksDB backends; clocks
//! - `service/` - `BeaconStore`, `PqaBackend` and the expiry sweeper
//!
//! ## Usage
//!
//! ```ignore
//! use pqa_01_beacon_store::{BeaconDb, BeaconStore, BeaconStoreDependencies, PqaBackend};
//!
//! let store = BeaconStore::new(
//!     BeaconStoreDependencies {
//!         kv_store: InMemoryKVStore::new(),
//!         time_source: SystemTimeSource,
//!     },
//!     StoreConfig::default(),
//! );
//! let backend = PqaBackend::new(store);
//! backend.insert_beacon(&ctx, &beacon, Usage::PROP).await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use adapters::{FileBackedKVStore, InMemoryKVStore, ManualTimeSource, SystemTimeSource};
pub use domain::{
    InsertStats, KVStoreError, QueryParams, RowId, StoreConfig, StoreError, StoredBeacon,
    StoredBeaconRecord, TargetIndex, Usage,
};
pub use ports::{BatchOperation, BeaconDb, KeyValueStore, TimeSource};
pub use service::{spawn_expiry_sweeper, BeaconStore, BeaconStoreDependencies, PqaBackend};

#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbStore};
