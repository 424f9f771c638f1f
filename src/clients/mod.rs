//! Type-safe wrappers around [`CollectionClient`](ledger_framework::CollectionClient).

pub mod order_client;
pub mod product_client;

pub use order_client::*;
pub use product_client::*;

use ledger_framework::FrameworkError;

/// Unboxes an entity error of type `E`, or wraps anything else with `wrap`.
pub(crate) fn recover_entity_error<E>(e: FrameworkError, wrap: fn(FrameworkError) -> E) -> E
where
    E: std::error::Error + Send + Sync + 'static,
{
    match e {
        FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
            Ok(domain) => *domain,
            Err(other) => wrap(FrameworkError::EntityError(other)),
        },
        other => wrap(other),
    }
}
