//! # Error Types
//!
//! Errors surfaced by the beacon store and its key-value backends.

use crate::domain::record::RowId;
use shared_types::{Cancelled, SegmentError};
use thiserror::Error;

/// Beacon store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A backend read failed.
    #[error("Read failed ({context}): {message}")]
    Read {
        context: &'static str,
        message: String,
    },

    /// A backend write failed; nothing from the operation was applied.
    #[error("Write failed ({context}): {message}")]
    Write {
        context: &'static str,
        message: String,
    },

    /// A persisted row could not be decoded.
    #[error("Corrupt beacon row {row_id}: {message}")]
    Data { row_id: RowId, message: String },

    /// The caller supplied a beacon that cannot be stored.
    #[error("Invalid beacon: {0}")]
    InputData(String),

    /// No row matches the lookup.
    #[error("Beacon not found: {0}")]
    NotFound(String),

    /// The caller's context fired before the operation completed.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl StoreError {
    pub(crate) fn read(context: &'static str) -> impl FnOnce(KVStoreError) -> StoreError {
        move |err| StoreError::Read {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn write(context: &'static str) -> impl FnOnce(KVStoreError) -> StoreError {
        move |err| StoreError::Write {
            context,
            message: err.to_string(),
        }
    }

    pub(crate) fn data(row_id: RowId) -> impl FnOnce(SegmentError) -> StoreError {
        move |err| StoreError::Data {
            row_id,
            message: err.to_string(),
        }
    }
}

/// Key-value backend errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },

    /// Data corruption in the store.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
}
