//! # Beacon Propagation (pqa-02)
//!
//! Selects the best stored beacons per propagation target, extends them
//! with the local AS entry and batches them per neighbouring AS.
//!
//! ## Batch Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Bound | A candidate set and a batch hold at most N beacons |
//! | Loop-free | Beacons that traverse the neighbour are never sent to it |
//! | Stable rank | Equal metrics keep retrieval order |
//! | All or nothing | One failed extension discards the whole batch |
//! | Copy on extend | Stored beacons are never mutated |
//!
//! ## Crate Structure
//!
//! - `domain/` - Targets, quality policies, interfaces, config, metrics
//! - `algorithms/` - Interface grouping and N-best selection
//! - `ports/` - Candidate source, extender, topology and sender ports
//! - `adapters/` - Backend candidate source, MAC extender, static topology,
//!   TOML config
//! - `service/` - `PropagationEngine`
//!
//! ## Usage
//!
//! ```ignore
//! use pqa_02_propagation::{PropagationConfig, PropagationEngine, QualityRegistry};
//!
//! let engine = PropagationEngine::new(
//!     PropagationConfig::default(),
//!     QualityRegistry::with_builtin(),
//!     Arc::new(backend),
//!     Arc::new(MacExtender::new(local_ia, key)),
//!     Arc::new(topology),
//! )?;
//! let stats = engine.run_round(&ctx, &sender).await?;
//! ```

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use adapters::{load_config, parse_config, MacExtender, StaticTopology};
pub use domain::{
    ConfigError, ExtensionError, FreshnessQuality, HopCountQuality, Interface, InterfaceGroup,
    PropagationConfig, PropagationError, PropagationMetrics, QualityPolicy, QualityRegistry,
    RoundStats, SendError, Target, DEFAULT_N_BEST,
};
pub use ports::{BatchSender, CandidateSource, InterfaceTopology, PropagationBatch, SegmentExtender};
pub use service::PropagationEngine;
