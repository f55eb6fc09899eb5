//! # Integration Scenarios
//!
//! The beacon store and the propagation engine wired together the way a
//! control service would run them.

pub mod concurrency;
pub mod expiry;
pub mod pipeline;
