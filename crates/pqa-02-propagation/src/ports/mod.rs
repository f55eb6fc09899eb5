//! # Ports Layer
//!
//! Collaborators the engine depends on. The engine exposes its own API as
//! inherent methods on [`PropagationEngine`](crate::service::PropagationEngine).

pub mod outbound;

pub use outbound::{BatchSender, CandidateSource, InterfaceTopology, PropagationBatch, SegmentExtender};
