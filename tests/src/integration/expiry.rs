//! # Expiry and Propagation
//!
//! Expired beacons leave the store and the target index together, and
//! stop being propagated.

#[cfg(test)]
mod tests {
    use crate::fixtures::{pqa_beacon, target, topology, LOCAL, ORIGIN};
    use pqa_01_beacon_store::testing::{in_memory_backend, TestBackend};
    use pqa_01_beacon_store::{spawn_expiry_sweeper, BeaconDb, QueryParams, Usage};
    use pqa_02_propagation::testing::{MockExtender, RecordingSender};
    use pqa_02_propagation::{
        PropagationConfig, PropagationEngine, QualityRegistry, StaticTopology,
    };
    use shared_types::Context;
    use std::sync::Arc;
    use std::time::Duration;

    const T0: u64 = 10_000;

    fn engine(
        backend: Arc<TestBackend>,
    ) -> PropagationEngine<TestBackend, MockExtender, StaticTopology> {
        PropagationEngine::new(
            PropagationConfig::default(),
            QualityRegistry::with_builtin(),
            backend,
            Arc::new(MockExtender::new(LOCAL)),
            Arc::new(topology()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_expired_beacons_stop_propagating() {
        let (backend, time) = in_memory_backend(T0);
        let backend = Arc::new(backend);
        let ctx = Context::new();
        let old = pqa_beacon(ORIGIN, 0, 2, 0, T0);
        backend.insert_beacon(&ctx, &old, Usage::PROP).await.unwrap();

        let engine = engine(backend.clone());
        let sender = RecordingSender::new();
        assert_eq!(engine.run_round(&ctx, &sender).await.unwrap().batches_sent, 2);

        let expiry = old.segment.max_expiry();
        time.set(expiry + 1);
        let removed = backend.delete_expired_beacons(&ctx, expiry + 1).await.unwrap();
        assert_eq!(removed, 1);
        assert!(backend.get_active_targets(&ORIGIN).is_empty());

        let sender = RecordingSender::new();
        let stats = engine.run_round(&ctx, &sender).await.unwrap();
        assert_eq!(stats.targets, 0);
        assert!(sender.batches().is_empty());

        // A fresh origination brings the target back.
        let fresh = pqa_beacon(ORIGIN, 0, 2, 0, expiry);
        backend.insert_beacon(&ctx, &fresh, Usage::PROP).await.unwrap();
        let stats = engine.run_round(&ctx, &sender).await.unwrap();
        assert_eq!(stats.batches_sent, 2);
        assert_eq!(backend.get_active_targets(&ORIGIN), vec![target(ORIGIN, 0)]);
    }

    #[tokio::test]
    async fn test_beacon_at_expiry_boundary_is_kept() {
        let (backend, _time) = in_memory_backend(T0);
        let ctx = Context::new();
        let beacon = pqa_beacon(ORIGIN, 0, 1, 0, T0);
        backend.insert_beacon(&ctx, &beacon, Usage::PROP).await.unwrap();

        let expiry = beacon.segment.max_expiry();
        assert_eq!(backend.delete_expired_beacons(&ctx, expiry).await.unwrap(), 0);
        assert_eq!(
            backend.get_beacons(&ctx, &QueryParams::new()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_prunes_expired_targets() {
        let (backend, time) = in_memory_backend(T0);
        let backend = Arc::new(backend);
        let ctx = Context::new();
        let short = pqa_beacon(ORIGIN, 0, 1, 0, T0);
        let long = pqa_beacon(ORIGIN, 1, 1, 1, T0 + 3_600);
        backend.insert_beacon(&ctx, &short, Usage::PROP).await.unwrap();
        backend.insert_beacon(&ctx, &long, Usage::PROP).await.unwrap();

        let sweeper_ctx = ctx.child();
        let handle = spawn_expiry_sweeper(
            backend.clone(),
            PropagationConfig::default().expiry_sweep_interval(),
            sweeper_ctx.clone(),
        );

        time.set(short.segment.max_expiry() + 1);
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(backend.get_active_targets(&ORIGIN), vec![target(ORIGIN, 1)]);

        sweeper_ctx.cancel();
        handle.await.unwrap();
    }
}
