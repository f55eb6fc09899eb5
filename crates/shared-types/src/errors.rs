//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors encoding or decoding a path segment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    /// Segment could not be packed.
    #[error("Segment encode failed: {0}")]
    Encode(String),

    /// Packed bytes are not a valid segment.
    #[error("Segment decode failed: {0}")]
    Decode(String),
}

/// The caller's context fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Cancelled {
    /// Explicit cancellation.
    #[error("Operation cancelled")]
    Cancelled,

    /// Deadline passed.
    #[error("Deadline exceeded")]
    DeadlineExceeded,
}
