//! # Beacon Store Service
//!
//! A single table of beacons keyed by segment id, persisted through the
//! [`KeyValueStore`] port.
//!
//! ## Concurrency
//!
//! One reader-writer lock guards the backend: inserts and expiry sweeps take
//! it exclusively, every query takes it shared. Multi-key changes go through
//! `atomic_batch_write`, so a failed write leaves no partial row behind.

mod api;
mod backend;
mod helpers;
mod sweeper;

pub use backend::PqaBackend;
pub use sweeper::spawn_expiry_sweeper;

use crate::domain::StoreConfig;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use parking_lot::RwLock;

/// Dependencies for [`BeaconStore`].
pub struct BeaconStoreDependencies<KV, TS> {
    pub kv_store: KV,
    pub time_source: TS,
}

/// The beacon store.
pub struct BeaconStore<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    pub(crate) kv_store: RwLock<KV>,
    pub(crate) time_source: TS,
    pub(crate) config: StoreConfig,
}

impl<KV, TS> BeaconStore<KV, TS>
where
    KV: KeyValueStore,
    TS: TimeSource,
{
    pub fn new(deps: BeaconStoreDependencies<KV, TS>, config: StoreConfig) -> Self {
        Self {
            kv_store: RwLock::new(deps.kv_store),
            time_source: deps.time_source,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn time_source(&self) -> &TS {
        &self.time_source
    }
}
