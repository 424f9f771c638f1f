//! # Product Catalog
//!
//! The `product` collection: one [`Product`] per index under `product<i>`, counted by
//! `productsLength`.
//!
//! ## Structure
//!
//! - [`entity`] - [`LedgerEntity`](ledger_framework::LedgerEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] for stock depletion
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use ledger_framework::{Collection, LedgerClient, LedgerEntity, MemoryStore, SharedStore};
//! use stock_ledger::clients::ProductClient;
//! use stock_ledger::model::{Product, ProductCreate};
//! use stock_ledger::product_catalog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store: SharedStore = Arc::new(MemoryStore::new());
//!     Collection::<Product>::new(store.clone(), Product::KIND).initialize()?;
//!
//!     let (actor, generic_client) = product_catalog::new(store, 32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     client
//!         .add_product(ProductCreate {
//!             reference: "P1".into(),
//!             description: "Widget".into(),
//!             price: 2.5,
//!             quantity: 10,
//!             critical: 3,
//!         })
//!         .await?;
//!
//!     let depletion = client.deplete("P1", 4).await?;
//!     assert_eq!(depletion.remaining, 6);
//!     assert_eq!(client.find("P1").await?.record.quantity, 6);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use ledger_framework::{CollectionActor, CollectionClient, SharedStore};

/// Creates a new Product catalog actor over `store` and its client.
pub fn new(store: SharedStore, capacity: usize) -> (CollectionActor<Product>, CollectionClient<Product>) {
    CollectionActor::new(store, capacity)
}
