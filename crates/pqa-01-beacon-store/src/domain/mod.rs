//! # Domain Layer
//!
//! Beacon rows, query filters, the key layout over the KV store and the
//! in-memory target index.

pub mod config;
pub mod errors;
pub mod keys;
pub mod query;
pub mod record;
pub mod target_index;
pub mod usage;

pub use config::StoreConfig;
pub use errors::{KVStoreError, StoreError};
pub use keys::KeyPrefix;
pub use query::QueryParams;
pub use record::{InsertStats, RowId, StoredBeacon, StoredBeaconRecord};
pub use target_index::TargetIndex;
pub use usage::Usage;
