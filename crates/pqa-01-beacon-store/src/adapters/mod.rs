//! # Adapters Layer
//!
//! Concrete implementations of the outbound ports.

pub mod infra;
pub mod storage;

pub use infra::{ManualTimeSource, SystemTimeSource};
pub use storage::{FileBackedKVStore, InMemoryKVStore};

#[cfg(feature = "rocksdb")]
pub use storage::{RocksDbConfig, RocksDbStore};
