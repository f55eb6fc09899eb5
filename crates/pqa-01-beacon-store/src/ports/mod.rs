//! # Ports Layer
//!
//! - `inbound`: the beacon database API the store offers.
//! - `outbound`: what the store needs from its host (KV backend, clock).

pub mod inbound;
pub mod outbound;

pub use inbound::BeaconDb;
pub use outbound::{BatchOperation, KeyValueStore, ScanResult, TimeSource};
