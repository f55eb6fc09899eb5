//! # Error Types

use pqa_01_beacon_store::StoreError;
use shared_types::{Cancelled, IfId, QualityId, SegmentError};
use thiserror::Error;

/// Propagation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropagationError {
    /// The extension port failed; the batch in progress is discarded.
    #[error("Extending beacon failed (ingress {ingress}, egress {egress}, segment [{segment}]): {source}")]
    Extension {
        ingress: IfId,
        egress: IfId,
        segment: String,
        #[source]
        source: ExtensionError,
    },

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Segment copy failed: {0}")]
    Segment(#[from] SegmentError),

    /// No policy is registered for the target's quality.
    #[error("Unknown quality: {0}")]
    UnknownQuality(QualityId),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl From<StoreError> for PropagationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Cancelled(reason) => PropagationError::Cancelled(reason),
            other => PropagationError::Store(other),
        }
    }
}

impl PropagationError {
    /// Whether the caller's context fired.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PropagationError::Cancelled(_))
    }
}

/// Errors reported by a segment extender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("Extension rejected: {0}")]
    Rejected(String),

    #[error("Extension timed out after {0} ms")]
    Timeout(u64),
}

/// Errors reported by a batch sender.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Sending batch failed: {0}")]
pub struct SendError(pub String);

/// Configuration loading errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
