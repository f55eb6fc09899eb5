//! Periodic expiry sweeps.

use super::PqaBackend;
use crate::ports::outbound::{KeyValueStore, TimeSource};
use shared_types::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Removes expired beacons every `period` until `ctx` fires.
///
/// A failed sweep is logged and retried on the next tick.
pub fn spawn_expiry_sweeper<KV, TS>(
    backend: Arc<PqaBackend<KV, TS>>,
    period: Duration,
    ctx: Context,
) -> JoinHandle<()>
where
    KV: KeyValueStore + 'static,
    TS: TimeSource + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ctx.done() => break,
                _ = ticker.tick() => {}
            }

            let now = backend.store().time_source().now();
            if let Err(_e) = backend.prune_expired(&ctx, now) {
                #[cfg(feature = "tracing-log")]
                tracing::warn!("[pqa-01] Expiry sweep failed: {}", _e);
            }
        }

        #[cfg(feature = "tracing-log")]
        tracing::debug!("[pqa-01] Expiry sweeper stopped");
    })
}
