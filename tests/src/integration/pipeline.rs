//! # Store → Engine → Sender
//!
//! Beacons enter through `insert_beacon`, get selected and extended by the
//! engine with the MAC extender, and leave through the batch sender.

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        init_tracing, pqa_beacon, random_beacons, target, topology, LOCAL, ORIGIN, PEER_A, PEER_B,
    };
    use pqa_01_beacon_store::{
        BeaconDb, BeaconStore, BeaconStoreDependencies, FileBackedKVStore, InsertStats,
        ManualTimeSource, PqaBackend, QueryParams, StoreConfig, Usage,
    };
    use pqa_02_propagation::testing::RecordingSender;
    use pqa_02_propagation::{
        MacExtender, PropagationConfig, PropagationEngine, QualityRegistry, StaticTopology,
    };
    use shared_types::{Context, IA};
    use std::path::Path;
    use std::sync::Arc;

    const T0: u64 = 10_000;

    type FileBackend = PqaBackend<FileBackedKVStore, Arc<ManualTimeSource>>;
    type Engine = PropagationEngine<FileBackend, MacExtender, StaticTopology>;

    fn open_backend(path: &Path) -> FileBackend {
        let store = BeaconStore::new(
            BeaconStoreDependencies {
                kv_store: FileBackedKVStore::open(path).unwrap(),
                time_source: Arc::new(ManualTimeSource::new(T0)),
            },
            StoreConfig::default(),
        );
        PqaBackend::new(store)
    }

    fn extender() -> MacExtender {
        MacExtender::new(LOCAL, b"integration-key".to_vec())
            .with_neighbour(1, ORIGIN)
            .with_neighbour(2, PEER_A)
            .with_neighbour(3, PEER_B)
            .with_neighbour(4, PEER_A)
    }

    fn engine(backend: Arc<FileBackend>, config: PropagationConfig) -> Engine {
        PropagationEngine::new(
            config,
            QualityRegistry::with_builtin(),
            backend,
            Arc::new(extender()),
            Arc::new(topology()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_round_extends_and_ships_stored_beacons() {
        init_tracing();
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(open_backend(&dir.path().join("beacons.db")));
        let ctx = Context::new();
        for (i, hops) in [3u64, 1, 2].iter().enumerate() {
            backend
                .insert_beacon(&ctx, &pqa_beacon(ORIGIN, 0, *hops, i as u16, T0), Usage::PROP)
                .await
                .unwrap();
        }

        let engine = engine(backend, PropagationConfig::default());
        let sender = RecordingSender::new();
        let stats = engine.run_round(&ctx, &sender).await.unwrap();

        assert_eq!(stats.batches_sent, 2);
        let batches = sender.batches();
        let towards_a = &batches[0];
        assert_eq!(towards_a.neighbour, PEER_A);
        assert_eq!(towards_a.target, target(ORIGIN, 0));
        assert_eq!(towards_a.beacons.len(), 6);

        let hops: Vec<usize> = towards_a.beacons.iter().map(|b| b.segment.hops()).collect();
        assert_eq!(hops, vec![2, 2, 3, 3, 4, 4]);
        for beacon in &towards_a.beacons {
            let entry = beacon.segment.as_entries.last().unwrap();
            assert_eq!(entry.local, LOCAL);
            assert_eq!(entry.next, PEER_A);
            assert_eq!(Some(entry.hop_field.cons_egress), beacon.eg_if_id);
            assert_ne!(entry.hop_field.mac, [0; 6]);
        }

        assert_eq!(batches[1].neighbour, PEER_B);
        assert_eq!(batches[1].beacons.len(), 3);
    }

    #[tokio::test]
    async fn test_rows_survive_reopen_and_replay_rebuilds_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beacons.db");
        let ctx = Context::new();
        let beacon = pqa_beacon(ORIGIN, 3, 2, 0, T0);

        {
            let backend = open_backend(&path);
            backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();
        }

        let backend = open_backend(&path);
        let rows = backend.get_beacons(&ctx, &QueryParams::new()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].beacon, beacon);

        // The target index is in-memory only.
        assert!(backend.get_active_targets(&ORIGIN).is_empty());

        let stats = backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();
        assert_eq!(stats, InsertStats::UNCHANGED);
        assert_eq!(backend.get_active_targets(&ORIGIN), vec![target(ORIGIN, 3)]);
        assert_eq!(
            backend.get_beacon_ids_for_target(&target(ORIGIN, 3)),
            vec![rows[0].row_id]
        );
    }

    #[tokio::test]
    async fn test_refreshed_beacon_propagates_newest_copy() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(open_backend(&dir.path().join("beacons.db")));
        let ctx = Context::new();
        backend
            .insert_beacon(&ctx, &pqa_beacon(ORIGIN, 0, 2, 0, T0), Usage::PROP)
            .await
            .unwrap();
        let stats = backend
            .insert_beacon(&ctx, &pqa_beacon(ORIGIN, 0, 2, 0, T0 + 30), Usage::PROP)
            .await
            .unwrap();
        assert_eq!(stats, InsertStats::UPDATED);

        let sender = RecordingSender::new();
        engine(backend, PropagationConfig::default())
            .run_round(&ctx, &sender)
            .await
            .unwrap();

        let batches = sender.batches();
        assert!(!batches.is_empty());
        assert!(batches
            .iter()
            .flat_map(|batch| batch.beacons.iter())
            .all(|b| b.segment.info.timestamp == T0 + 30));
    }

    #[tokio::test]
    async fn test_batches_stay_bounded_and_ranked() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(open_backend(&dir.path().join("beacons.db")));
        let ctx = Context::new();
        for beacon in random_beacons(40, 8, T0) {
            backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();
        }

        let sender = RecordingSender::new();
        engine(backend, PropagationConfig::default().with_n_best(5))
            .run_round(&ctx, &sender)
            .await
            .unwrap();

        let batches = sender.batches();
        assert_eq!(batches.len(), 2);
        for batch in batches {
            assert!(batch.beacons.len() <= 5);
            let hops: Vec<usize> = batch.beacons.iter().map(|b| b.segment.hops()).collect();
            assert!(hops.windows(2).all(|w| w[0] <= w[1]));
            assert!(batch
                .beacons
                .iter()
                .all(|b| !b.segment.as_entries[..b.segment.hops() - 1]
                    .iter()
                    .any(|e| e.local == batch.neighbour)));
        }
    }

    #[tokio::test]
    async fn test_other_origins_get_their_own_targets() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(open_backend(&dir.path().join("beacons.db")));
        let ctx = Context::new();
        let other = IA::new(2, 100);
        backend
            .insert_beacon(&ctx, &pqa_beacon(ORIGIN, 0, 1, 0, T0), Usage::PROP)
            .await
            .unwrap();
        backend
            .insert_beacon(&ctx, &pqa_beacon(ORIGIN, 1, 1, 1, T0), Usage::PROP)
            .await
            .unwrap();
        backend
            .insert_beacon(&ctx, &pqa_beacon(other, 0, 1, 0, T0), Usage::PROP)
            .await
            .unwrap();

        let sender = RecordingSender::new();
        let stats = engine(backend, PropagationConfig::default())
            .run_round(&ctx, &sender)
            .await
            .unwrap();

        assert_eq!(stats.targets, 3);
        let mut targets: Vec<_> = sender.batches().iter().map(|b| b.target).collect();
        targets.dedup();
        assert_eq!(
            targets,
            vec![target(ORIGIN, 0), target(ORIGIN, 1), target(other, 0)]
        );
    }
}
