//! Propagation rounds.

use super::PropagationEngine;
use crate::algorithms::{interface_subgroups, neighbouring_ases};
use crate::domain::{PropagationError, RoundStats, Target};
use crate::ports::{BatchSender, CandidateSource, InterfaceTopology, PropagationBatch, SegmentExtender};
use pqa_01_beacon_store::StoreError;
use shared_types::{Context, IA};
use tracing::{error, info, warn};

impl<B, E, T> PropagationEngine<B, E, T>
where
    B: CandidateSource,
    E: SegmentExtender,
    T: InterfaceTopology,
{
    /// One pass over every beacon source, active target and neighbour.
    ///
    /// A batch is built per non-empty egress subgroup and handed to
    /// `sender` if it has beacons. Failures of single targets or batches are
    /// logged and counted; only cancellation ends the round early.
    pub async fn run_round<S>(&self, ctx: &Context, sender: &S) -> Result<RoundStats, PropagationError>
    where
        S: BatchSender + ?Sized,
    {
        let mut stats = RoundStats::default();

        let sources = match self.candidates.beacon_sources(ctx).await {
            Ok(sources) => sources,
            Err(StoreError::Cancelled(reason)) => return Err(reason.into()),
            Err(e) => {
                error!("[pqa-02] Listing beacon sources failed: {}", e);
                Vec::new()
            }
        };
        let neighbours = neighbouring_ases(self.topology.as_ref());

        for source in &sources {
            for key in self.candidates.active_targets(source) {
                ctx.check()?;
                stats.targets += 1;

                let target = match self.resolve_target(&key) {
                    Ok(target) => target,
                    Err(e) => {
                        warn!("[pqa-02] Skipping target {}: {}", key, e);
                        continue;
                    }
                };

                for neighbour in &neighbours {
                    self.propagate_towards(ctx, sender, &target, neighbour, source, &mut stats)
                        .await?;
                }
            }
        }

        info!(
            "[pqa-02] Round done: {} targets, {} batches ({} beacons) sent, {} failed",
            stats.targets, stats.batches_sent, stats.beacons_sent, stats.batches_failed
        );
        Ok(stats)
    }

    async fn propagate_towards<S>(
        &self,
        ctx: &Context,
        sender: &S,
        target: &Target,
        neighbour: &IA,
        source: &IA,
        stats: &mut RoundStats,
    ) -> Result<(), PropagationError>
    where
        S: BatchSender + ?Sized,
    {
        for egress in interface_subgroups(self.topology.as_ref(), &target.key, neighbour) {
            if egress.is_empty() {
                continue;
            }

            let beacons = match self
                .build_propagation_batch(ctx, target, &egress, neighbour, source)
                .await
            {
                Ok(beacons) => beacons,
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    warn!(
                        "[pqa-02] Building batch for {} towards {} failed: {}",
                        target, neighbour, e
                    );
                    stats.batches_failed += 1;
                    continue;
                }
            };
            if beacons.is_empty() {
                continue;
            }

            let count = beacons.len();
            let batch = PropagationBatch {
                target: target.key,
                neighbour: *neighbour,
                egress,
                beacons,
            };
            match sender.send(ctx, batch).await {
                Ok(()) => {
                    self.metrics.write().batches_sent += 1;
                    stats.batches_sent += 1;
                    stats.beacons_sent += count;
                }
                Err(e) => {
                    warn!("[pqa-02] Sending batch towards {} failed: {}", neighbour, e);
                    self.metrics.write().send_failures += 1;
                    stats.batches_failed += 1;
                }
            }
        }
        Ok(())
    }
}
