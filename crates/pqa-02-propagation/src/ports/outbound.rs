//! # Outbound Ports
//!
//! - [`CandidateSource`]: stored beacons and the target index.
//! - [`SegmentExtender`]: appends the local AS entry to a segment.
//! - [`InterfaceTopology`]: local interfaces and their groups.
//! - [`BatchSender`]: ships finished batches downstream.

use crate::domain::{ExtensionError, Interface, InterfaceGroup, SendError};
use async_trait::async_trait;
use pqa_01_beacon_store::{RowId, StoreError};
use shared_types::{Beacon, Context, Direction, IfId, PathSegment, QualityId, TargetKey, IA};

/// Read access to stored beacons and target associations.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Row ids associated with `target`.
    fn beacon_ids_for_target(&self, target: &TargetKey) -> Vec<RowId>;

    /// Targets originated by `source` with associated beacons.
    fn active_targets(&self, source: &IA) -> Vec<TargetKey>;

    /// Beacons for `row_ids` in the given order; unknown ids are skipped.
    async fn fetch_beacons(&self, ctx: &Context, row_ids: &[RowId])
        -> Result<Vec<Beacon>, StoreError>;

    /// Distinct origin ASes of stored beacons.
    async fn beacon_sources(&self, ctx: &Context) -> Result<Vec<IA>, StoreError>;
}

/// Appends this AS's entry to a segment.
#[async_trait]
pub trait SegmentExtender: Send + Sync {
    /// Extends `segment` for a beacon received on `ingress` and sent out on
    /// `egress`. `peers` lists peering interfaces to include, if any.
    async fn extend(
        &self,
        ctx: &Context,
        segment: &mut PathSegment,
        ingress: IfId,
        egress: IfId,
        peers: &[IfId],
    ) -> Result<(), ExtensionError>;
}

/// Local interface inventory.
pub trait InterfaceTopology: Send + Sync {
    /// Groups of interfaces eligible for `(quality, direction)`.
    fn interface_groups(&self, quality: QualityId, direction: Direction) -> Vec<InterfaceGroup>;

    /// Every known interface.
    fn interfaces(&self) -> Vec<Interface>;
}

/// A finished batch addressed to one neighbour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationBatch {
    pub target: TargetKey,
    pub neighbour: IA,
    pub egress: InterfaceGroup,
    pub beacons: Vec<Beacon>,
}

/// Downstream transport.
#[async_trait]
pub trait BatchSender: Send + Sync {
    async fn send(&self, ctx: &Context, batch: PropagationBatch) -> Result<(), SendError>;
}
