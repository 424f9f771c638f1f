//! Error types for the Order ledger.

use ledger_framework::{FrameworkError, StoreError};
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No order carries the requested reference.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A scalar argument could not be parsed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An embedded JSON payload (products, quantities, package info) is not well-formed.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// The user directory could not be read.
    #[error("Directory lookup failed: {0}")]
    Directory(StoreError),

    /// The collection or the actor behind it failed.
    #[error(transparent)]
    Framework(FrameworkError),
}
