//! # Framework Errors
//!
//! Errors raised by the collection layer and the actor plumbing. Entity-specific failures
//! travel inside [`FrameworkError::EntityError`] and are recovered by the domain clients.

use crate::store::StoreError;

/// Errors that can occur within the ledger framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    /// An index beyond the collection length, an undecodable record, or a ref absent after a
    /// full scan.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The length counter of a collection is missing or not a decimal integer.
    #[error("Corrupt counter {key}: {reason}")]
    CorruptCounter { key: String, reason: String },
    #[error("Record encoding failed: {0}")]
    Codec(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
