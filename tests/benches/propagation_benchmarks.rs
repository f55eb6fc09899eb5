//! # PQA Beaconing Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | pqa-01 Beacon Store | Upsert, candidate fetch by target |
//! | pqa-02 Propagation | N-best ranking, full batch construction |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pqa_01_beacon_store::testing::in_memory_backend;
use pqa_01_beacon_store::{BeaconDb, Usage};
use pqa_02_propagation::algorithms::rank_and_truncate;
use pqa_02_propagation::testing::MockExtender;
use pqa_02_propagation::{
    CandidateSource, HopCountQuality, Interface, InterfaceGroup, PropagationConfig,
    PropagationEngine, QualityRegistry, Target,
};
use pqa_tests::fixtures::{random_beacons, target, topology, LOCAL, ORIGIN, PEER_A};
use shared_types::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

const T0: u64 = 10_000;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

// ============================================================================
// pqa-01: Beacon Store
// ============================================================================

fn bench_store(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("pqa-01-beacon-store");
    group.measurement_time(Duration::from_secs(5));

    for size in [100usize, 1_000] {
        let beacons = random_beacons(size, 8, T0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), &beacons, |b, beacons| {
            b.iter(|| {
                let (backend, _time) = in_memory_backend(T0);
                let ctx = Context::new();
                rt.block_on(async {
                    for beacon in beacons {
                        black_box(backend.insert_beacon(&ctx, beacon, Usage::PROP).await.unwrap());
                    }
                });
            })
        });

        let (backend, _time) = in_memory_backend(T0);
        let ctx = Context::new();
        rt.block_on(async {
            for beacon in &beacons {
                backend.insert_beacon(&ctx, beacon, Usage::PROP).await.unwrap();
            }
        });
        let ids = backend.beacon_ids_for_target(&target(ORIGIN, 0));
        group.bench_with_input(BenchmarkId::new("fetch_for_target", size), &ids, |b, ids| {
            b.iter(|| black_box(rt.block_on(backend.fetch_beacons(&ctx, ids)).unwrap()))
        });
    }

    group.finish();
}

// ============================================================================
// pqa-02: Propagation
// ============================================================================

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("pqa-02-ranking");
    let policy = Target::new(target(ORIGIN, 0), Arc::new(HopCountQuality::default()));

    for size in [100usize, 1_000, 10_000] {
        let beacons = random_beacons(size, 16, T0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("n_best_20", size), &beacons, |b, beacons| {
            b.iter(|| black_box(rank_and_truncate(&policy, beacons.clone(), 20)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("pqa-02-batch");
    group.measurement_time(Duration::from_secs(5));

    for size in [50usize, 500] {
        let (backend, _time) = in_memory_backend(T0);
        let ctx = Context::new();
        rt.block_on(async {
            for beacon in random_beacons(size, 8, T0) {
                backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();
            }
        });
        let engine = PropagationEngine::new(
            PropagationConfig::default(),
            QualityRegistry::with_builtin(),
            Arc::new(backend),
            Arc::new(MockExtender::new(LOCAL)),
            Arc::new(topology()),
        )
        .unwrap();
        let target = engine.resolve_target(&target(ORIGIN, 0)).unwrap();
        let egress = InterfaceGroup::new(vec![Interface::new(2, PEER_A), Interface::new(4, PEER_A)]);

        group.bench_function(BenchmarkId::new("build_propagation_batch", size), |b| {
            b.iter(|| {
                black_box(
                    rt.block_on(engine.build_propagation_batch(&ctx, &target, &egress, &PEER_A, &ORIGIN))
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_store, bench_ranking, bench_batch);
criterion_main!(benches);
