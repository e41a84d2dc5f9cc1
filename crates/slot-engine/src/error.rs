//! Error types for slot-engine operations.

use thiserror::Error;

/// Failures reported by an [`AvailabilityStore`](crate::store::AvailabilityStore)
/// implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Failed to decode store record: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum SlotError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
