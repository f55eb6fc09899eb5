//! # Adapters Layer
//!
//! - `backend`: [`CandidateSource`](crate::ports::CandidateSource) over the
//!   PQA beacon backend.
//! - `extender`: HMAC-based [`SegmentExtender`](crate::ports::SegmentExtender).
//! - `topology`: static interface inventory.
//! - `config`: TOML configuration loading.

pub mod backend;
pub mod config;
pub mod extender;
pub mod topology;

pub use config::{load_config, parse_config};
pub use extender::MacExtender;
pub use topology::StaticTopology;
