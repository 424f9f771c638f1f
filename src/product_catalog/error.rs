//! Error types for the Product catalog.

use ledger_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// No product carries the requested reference.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// A numeric argument could not be parsed or is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stock on hand does not strictly exceed the requested quantity.
    #[error("Insufficient stock for {reference}: requested {requested}, available {available}")]
    InsufficientStock {
        reference: String,
        requested: i64,
        available: i64,
    },

    /// The collection or the actor behind it failed.
    #[error(transparent)]
    Framework(FrameworkError),
}
