//! Shared fixtures for scenarios and benchmarks.
//!
//! The local AS is `1-500`. Interface 1 faces the origin `1-100`,
//! interfaces 2 and 4 face `1-600`, interface 3 faces `1-700`. All four
//! form one hop-count/forward group.

use pqa_01_beacon_store::testing::SegmentBuilder;
use pqa_02_propagation::{Interface, StaticTopology};
use rand::Rng;
use shared_types::{Beacon, Direction, IfId, QualityId, TargetKey, Timestamp, IA};

pub const LOCAL: IA = IA::new(1, 500);
pub const ORIGIN: IA = IA::new(1, 100);
pub const PEER_A: IA = IA::new(1, 600);
pub const PEER_B: IA = IA::new(1, 700);

pub fn topology() -> StaticTopology {
    StaticTopology::new()
        .with_interface(Interface::new(1, ORIGIN))
        .with_interface(Interface::new(2, PEER_A))
        .with_interface(Interface::new(3, PEER_B))
        .with_interface(Interface::new(4, PEER_A))
        .with_group(QualityId::HOP_COUNT, Direction::Forward, &[1, 2, 3, 4])
}

pub fn target(origin: IA, uniquifier: u32) -> TargetKey {
    TargetKey {
        quality: QualityId::HOP_COUNT,
        direction: Direction::Forward,
        uniquifier,
        ia: origin,
    }
}

/// A hop-count beacon from `origin` through `hops` ASes, received on
/// interface 1. `variant` picks the egress interfaces so that beacons of
/// equal length stay distinct.
pub fn pqa_beacon(
    origin: IA,
    uniquifier: u32,
    hops: u64,
    variant: IfId,
    timestamp: Timestamp,
) -> Beacon {
    let mut builder = SegmentBuilder::new(timestamp);
    for i in 0..hops {
        let ingress = if i == 0 { 0 } else { 10 };
        builder = builder.hop(IA::new(origin.isd.0, origin.asn.0 + i), ingress, 100 + variant);
    }
    builder
        .pqa(QualityId::HOP_COUNT, Direction::Forward, uniquifier)
        .beacon(1)
}

/// `count` distinct beacons from `ORIGIN` with 1 to `max_hops` hops.
pub fn random_beacons(count: usize, max_hops: u64, timestamp: Timestamp) -> Vec<Beacon> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let hops = rng.gen_range(1..=max_hops);
            pqa_beacon(ORIGIN, 0, hops, i as IfId, timestamp)
        })
        .collect()
}

/// Installs a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
