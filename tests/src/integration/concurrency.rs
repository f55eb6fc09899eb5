//! # Concurrent Access
//!
//! Inserts, rounds and sweeps racing on one shared backend.

#[cfg(test)]
mod tests {
    use crate::fixtures::{random_beacons, topology, LOCAL, ORIGIN};
    use pqa_01_beacon_store::testing::in_memory_backend;
    use pqa_01_beacon_store::{BeaconDb, QueryParams, Usage};
    use pqa_02_propagation::testing::{MockExtender, RecordingSender};
    use pqa_02_propagation::{PropagationConfig, PropagationEngine, QualityRegistry};
    use shared_types::Context;
    use std::sync::Arc;

    const T0: u64 = 10_000;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_inserts_and_rounds_interleave() {
        let (backend, _time) = in_memory_backend(T0);
        let backend = Arc::new(backend);
        let engine = Arc::new(
            PropagationEngine::new(
                PropagationConfig::default().with_n_best(4),
                QualityRegistry::with_builtin(),
                backend.clone(),
                Arc::new(MockExtender::new(LOCAL)),
                Arc::new(topology()),
            )
            .unwrap(),
        );
        let beacons = random_beacons(64, 6, T0);

        let mut handles = Vec::new();
        for chunk in beacons.chunks(16) {
            let backend = backend.clone();
            let chunk = chunk.to_vec();
            handles.push(tokio::spawn(async move {
                let ctx = Context::new();
                for beacon in chunk {
                    backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();
                }
            }));
        }
        for _ in 0..4 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                let sender = RecordingSender::new();
                engine.run_round(&Context::new(), &sender).await.unwrap();
                for batch in sender.batches() {
                    assert!(batch.beacons.len() <= 4);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let ctx = Context::new();
        let rows = backend.get_beacons(&ctx, &QueryParams::new()).await.unwrap();
        assert_eq!(rows.len(), 64);
        assert_eq!(backend.get_beacon_ids_for_target(&crate::fixtures::target(ORIGIN, 0)).len(), 64);
        assert_eq!(engine.metrics().extension_failures, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_duplicate_inserts_store_one_row() {
        let (backend, _time) = in_memory_backend(T0);
        let backend = Arc::new(backend);
        let beacon = random_beacons(1, 3, T0).remove(0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let backend = backend.clone();
                let beacon = beacon.clone();
                tokio::spawn(async move {
                    backend
                        .insert_beacon(&Context::new(), &beacon, Usage::PROP)
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut inserted = 0;
        for handle in handles {
            inserted += handle.await.unwrap().inserted;
        }
        assert_eq!(inserted, 1);
        assert_eq!(
            backend
                .get_beacons(&Context::new(), &QueryParams::new())
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
