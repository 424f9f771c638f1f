//! # Order Ledger
//!
//! The `order` collection: one [`Order`] per index under `order<i>`, counted by
//! `ordersLength`, plus the lifecycle updates applied to it.
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerEntity`](ledger_framework::LedgerEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`actions`] - [`OrderAction`] used by the depletion engine
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Context Injection
//!
//! The order actor is started with a [`Resolver`](crate::directory::Resolver) so it can turn
//! client and carrier identifiers into hashes:
//!
//! ```rust,ignore
//! let (actor, client) = order_ledger::new(store.clone(), 32);
//! tokio::spawn(actor.run(Arc::new(UserDirectory::new(store))));
//! ```
//!
//! ## State Changes
//!
//! | Operation | Effect on `state` |
//! |-----------|-------------------|
//! | create | `Created` |
//! | `SetTracking` | always `Shipped` |
//! | `SetTransport` | unchanged |
//! | `SetState(n)` | `n`, unchecked |
//! | `Confirm` action | `Confirmed` |

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use ledger_framework::{CollectionActor, CollectionClient, SharedStore};

/// Creates a new Order ledger actor over `store` and its client.
pub fn new(store: SharedStore, capacity: usize) -> (CollectionActor<Order>, CollectionClient<Order>) {
    CollectionActor::new(store, capacity)
}
