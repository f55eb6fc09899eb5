//! # Shared Types Crate
//!
//! Types shared by the beacon store (`pqa-01`) and the propagation engine
//! (`pqa-02`): addressing, path segments, the beacon entity, and the
//! request [`Context`].
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: segment identity and packing live here, so
//!   the store and the engine can never disagree on what "the same beacon" is.
//! - **No I/O**: everything in this crate is pure apart from the timers in
//!   [`Context`].

pub mod beacon;
pub mod context;
pub mod entities;
pub mod errors;
pub mod segment;

pub use beacon::Beacon;
pub use context::Context;
pub use entities::*;
pub use errors::*;
pub use segment::{AsEntry, HopField, PathSegment, PqaExtension, SegmentInfo};
