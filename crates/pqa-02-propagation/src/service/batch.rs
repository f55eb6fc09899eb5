//! Best-set selection and batch construction.

use super::PropagationEngine;
use crate::algorithms::{interface_groups, rank_and_truncate, select_n_best};
use crate::domain::{ExtensionError, InterfaceGroup, PropagationError, Target};
use crate::ports::{CandidateSource, InterfaceTopology, SegmentExtender};
use pqa_01_beacon_store::StoreError;
use shared_types::{Beacon, Context, IfId, IA};
use tracing::{debug, error, warn};

impl<B, E, T> PropagationEngine<B, E, T>
where
    B: CandidateSource,
    E: SegmentExtender,
    T: InterfaceTopology,
{
    /// Up to N beacons of `target` that entered through `ingress` and would
    /// not loop when sent to `exclude_looping`, best first.
    ///
    /// Read failures yield an empty set (and bump
    /// `candidate_read_failures`) unless `fail_on_candidate_read_error` is
    /// set. Cancellation always propagates.
    pub async fn get_n_bests_for_group(
        &self,
        ctx: &Context,
        source: &IA,
        target: &Target,
        ingress: &InterfaceGroup,
        exclude_looping: &IA,
    ) -> Result<Vec<Beacon>, PropagationError> {
        ctx.check()?;

        let row_ids = self.candidates.beacon_ids_for_target(&target.key);
        if row_ids.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = match self.candidates.fetch_beacons(ctx, &row_ids).await {
            Ok(beacons) => beacons,
            Err(StoreError::Cancelled(reason)) => return Err(reason.into()),
            Err(e) if self.config.fail_on_candidate_read_error => return Err(e.into()),
            Err(e) => {
                warn!(
                    "[pqa-02] Reading candidates of {} from {} failed, treating as empty: {}",
                    target, source, e
                );
                self.metrics.write().candidate_read_failures += 1;
                return Ok(Vec::new());
            }
        };

        Ok(select_n_best(
            target,
            candidates,
            ingress,
            exclude_looping,
            self.config.n_best,
        ))
    }

    /// Builds the batch of `target`'s beacons to send out of `egress`
    /// towards `neighbour`.
    ///
    /// Every eligible interface group of the target is used as an ingress
    /// group. Each selected beacon is copied, extended once per egress
    /// interface, filtered again, and the union is re-ranked and cut to N.
    /// An extension failure discards the whole batch.
    pub async fn build_propagation_batch(
        &self,
        ctx: &Context,
        target: &Target,
        egress: &InterfaceGroup,
        neighbour: &IA,
        source: &IA,
    ) -> Result<Vec<Beacon>, PropagationError> {
        ctx.check()?;
        if egress.is_empty() {
            return Ok(Vec::new());
        }

        let mut batch = Vec::new();
        let mut extended = 0u64;

        for ingress in interface_groups(self.topology.as_ref(), &target.key) {
            let candidates = self
                .get_n_bests_for_group(ctx, source, target, &ingress, neighbour)
                .await?;
            if candidates.is_empty() {
                continue;
            }

            for interface in &egress.interfaces {
                if interface.id == 0 {
                    error!(
                        "[pqa-02] Egress interface 0 towards {} for target {}",
                        interface.remote_ia, target
                    );
                    self.metrics.write().zero_egress_anomalies += 1;
                }

                for candidate in &candidates {
                    let mut beacon = candidate.deep_copy()?;
                    beacon.eg_if_id = Some(interface.id);
                    self.extend_beacon(ctx, &mut beacon, interface.id).await?;
                    extended += 1;

                    if target.should_consider(&beacon) {
                        batch.push(beacon);
                    }
                }
            }
        }

        let batch = rank_and_truncate(target, batch, self.config.n_best);
        {
            let mut metrics = self.metrics.write();
            metrics.batches_built += 1;
            metrics.beacons_extended += extended;
        }

        debug!(
            "[pqa-02] Batch for {} towards {} has {} beacons",
            target,
            neighbour,
            batch.len()
        );
        for beacon in &batch {
            debug!(
                "[pqa-02]   metric={} hops={} egress={:?} segment=[{}]",
                target.metric(beacon),
                beacon.segment.hops(),
                beacon.eg_if_id,
                beacon.segment
            );
        }

        Ok(batch)
    }

    /// Runs the extender within the configured budget.
    ///
    /// A fired `ctx` is reported as cancellation; an exhausted budget or an
    /// extender error as [`PropagationError::Extension`].
    async fn extend_beacon(
        &self,
        ctx: &Context,
        beacon: &mut Beacon,
        egress: IfId,
    ) -> Result<(), PropagationError> {
        let ingress = beacon.in_if_id;
        let budget = ctx.child().with_timeout(self.config.extension_timeout());

        let outcome = budget
            .run(
                self.extender
                    .extend(&budget, &mut beacon.segment, ingress, egress, &[]),
            )
            .await;

        let source = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(e)) => e,
            Err(_) => {
                ctx.check()?;
                ExtensionError::Timeout(self.config.extension_timeout_ms)
            }
        };

        self.metrics.write().extension_failures += 1;
        error!(
            "[pqa-02] Extending beacon failed (ingress {}, egress {}): {}",
            ingress, egress, source
        );
        Err(PropagationError::Extension {
            ingress,
            egress,
            segment: beacon.segment.to_string(),
            source,
        })
    }
}
