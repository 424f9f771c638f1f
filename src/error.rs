//! # Ledger Errors
//!
//! The error every public ledger operation returns. Component errors ([`ProductError`],
//! [`OrderError`], [`FrameworkError`], [`StoreError`]) convert into it with `?`.
//!
//! Every error aborts only the call that produced it. Writes made before the failure stay
//! applied; nothing is retried or rolled back.

use crate::order_ledger::OrderError;
use crate::product_catalog::ProductError;
use ledger_framework::{FrameworkError, StoreError};
use thiserror::Error;

/// Error categories exposed to callers of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    CorruptCounter,
    MalformedPayload,
    InsufficientStock,
    Store,
    Unavailable,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Wrong argument count, unknown function or unparsable numeric field.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing key, or a reference absent after a full scan.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A collection length key is missing or not numeric.
    #[error("Corrupt counter {key}: {reason}")]
    CorruptCounter { key: String, reason: String },

    /// An embedded product/quantity/package payload is not well-formed.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Insufficient stock for {reference}: requested {requested}, available {available}")]
    InsufficientStock {
        reference: String,
        requested: i64,
        available: i64,
    },

    /// The state store rejected a read, write or event.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A collection actor is gone (system shutting down or crashed).
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::CorruptCounter { .. } => ErrorKind::CorruptCounter,
            LedgerError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            LedgerError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            LedgerError::Store(_) => ErrorKind::Store,
            LedgerError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }
}

impl From<FrameworkError> for LedgerError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(what) => LedgerError::NotFound(what),
            FrameworkError::CorruptCounter { key, reason } => {
                LedgerError::CorruptCounter { key, reason }
            }
            FrameworkError::Store(e) => LedgerError::Store(e),
            FrameworkError::Codec(reason) => LedgerError::MalformedPayload(reason),
            other @ (FrameworkError::ActorClosed
            | FrameworkError::ActorDropped
            | FrameworkError::EntityError(_)) => LedgerError::Unavailable(other.to_string()),
        }
    }
}

impl From<ProductError> for LedgerError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(what) => LedgerError::NotFound(what),
            ProductError::InvalidArgument(reason) => LedgerError::InvalidArgument(reason),
            ProductError::InsufficientStock {
                reference,
                requested,
                available,
            } => LedgerError::InsufficientStock {
                reference,
                requested,
                available,
            },
            ProductError::Framework(e) => e.into(),
        }
    }
}

impl From<OrderError> for LedgerError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(what) => LedgerError::NotFound(what),
            OrderError::InvalidArgument(reason) => LedgerError::InvalidArgument(reason),
            OrderError::MalformedPayload(reason) => LedgerError::MalformedPayload(reason),
            OrderError::Directory(e) => LedgerError::Store(e),
            OrderError::Framework(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_errors_keep_their_kind() {
        let stock: LedgerError = ProductError::InsufficientStock {
            reference: "P1".into(),
            requested: 10,
            available: 10,
        }
        .into();
        assert_eq!(stock.kind(), ErrorKind::InsufficientStock);

        let payload: LedgerError = OrderError::MalformedPayload("quantities".into()).into();
        assert_eq!(payload.kind(), ErrorKind::MalformedPayload);
    }

    #[test]
    fn test_framework_errors_map_to_taxonomy() {
        let missing: LedgerError = ProductError::Framework(FrameworkError::NotFound("x".into())).into();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let counter: LedgerError = FrameworkError::CorruptCounter {
            key: "productsLength".into(),
            reason: "missing".into(),
        }
        .into();
        assert_eq!(counter.kind(), ErrorKind::CorruptCounter);

        let closed: LedgerError = FrameworkError::ActorClosed.into();
        assert_eq!(closed.kind(), ErrorKind::Unavailable);
    }
}
