//! # Propagation Service
//!
//! [`PropagationEngine`] selects, extends and batches stored beacons for
//! each target and neighbour.
//!
//! ## Dependencies
//!
//! - `B: CandidateSource` - stored beacons and the target index
//! - `E: SegmentExtender` - appends the local AS entry
//! - `T: InterfaceTopology` - local interfaces and groups
//!
//! ## Thread Safety
//!
//! The engine is shareable across tasks via `Arc`. It holds no state
//! besides its counters, which live behind a `RwLock`.

mod batch;
mod round;


use crate::domain::{PropagationConfig, PropagationError, PropagationMetrics, QualityRegistry, Target};
use crate::ports::{CandidateSource, InterfaceTopology, SegmentExtender};
use parking_lot::RwLock;
use shared_types::TargetKey;
use std::sync::Arc;

/// Propagation engine.
pub struct PropagationEngine<B, E, T>
where
    B: CandidateSource,
    E: SegmentExtender,
    T: InterfaceTopology,
{
    config: PropagationConfig,
    qualities: QualityRegistry,
    candidates: Arc<B>,
    extender: Arc<E>,
    topology: Arc<T>,
    metrics: RwLock<PropagationMetrics>,
}

impl<B, E, T> PropagationEngine<B, E, T>
where
    B: CandidateSource,
    E: SegmentExtender,
    T: InterfaceTopology,
{
    /// Creates an engine after validating `config`.
    pub fn new(
        config: PropagationConfig,
        qualities: QualityRegistry,
        candidates: Arc<B>,
        extender: Arc<E>,
        topology: Arc<T>,
    ) -> Result<Self, PropagationError> {
        config.validate()?;
        Ok(Self {
            config,
            qualities,
            candidates,
            extender,
            topology,
            metrics: RwLock::new(PropagationMetrics::default()),
        })
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    /// Snapshot of the counters.
    pub fn metrics(&self) -> PropagationMetrics {
        self.metrics.read().clone()
    }

    /// Pairs `key` with the policy registered for its quality.
    pub fn resolve_target(&self, key: &TargetKey) -> Result<Target, PropagationError> {
        self.qualities
            .resolve(key.quality)
            .map(|quality| Target::new(*key, quality))
            .ok_or(PropagationError::UnknownQuality(key.quality))
    }
}
