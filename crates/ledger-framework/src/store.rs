//! # State Store Adapter
//!
//! The byte-keyed persistence boundary every collection is built on. A store offers exactly
//! three primitives: point reads, point writes and event publication. There are no range
//! scans, no secondary indexes and no multi-key transactions; everything above this trait
//! has to be expressed in terms of `get`, `put` and `publish_event`.

use std::sync::Arc;

/// Errors reported by a [`StateStore`] backend.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A lock guarding an in-process backend was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Shared handle to a store, cloned into every actor and component that needs it.
pub type SharedStore = Arc<dyn StateStore>;

/// Byte-keyed key-value ledger with an event side channel.
///
/// Implementations must be linearizable per call. Nothing stronger is assumed: two
/// consecutive calls may be interleaved with calls from other tasks.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    fn put(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;

    /// Publish `payload` on the named event channel.
    fn publish_event(&self, name: &str, payload: Vec<u8>) -> Result<(), StoreError>;
}
