//! # Ledger Framework
//!
//! Building blocks for counter-indexed record collections kept in a flat key-value state
//! store, served by Tokio actors.
//!
//! ## Storage Model
//!
//! A collection is a family of keys sharing a prefix plus one counter key:
//!
//! ```text
//! productsLength = "2"
//! product0       = {"ref":"P1", ...}
//! product1       = {"ref":"P2", ...}
//! ```
//!
//! Records are appended at index `length` and the counter is bumped afterwards. Nothing is
//! ever deleted, so indices are permanent. Records are addressed by a caller-visible
//! reference, resolved with an ascending first-match scan (see [`reference`]).
//!
//! ## Architecture Overview
//!
//! 1. **Store Layer** ([`StateStore`]) - the host key-value store and its event sink
//! 2. **Collection Layer** ([`Collection`]) - counter bookkeeping and record codec
//! 3. **Entity Layer** ([`LedgerEntity`]) - your record type and its hooks
//! 4. **Runtime Layer** ([`CollectionActor`]) - sequential processing per collection
//! 5. **Interface Layer** ([`CollectionClient`], [`LedgerClient`]) - typed async access
//!
//! ## Example
//!
//! ```rust
//! use ledger_framework::{
//!     Collection, CollectionActor, CollectionKind, LedgerEntity, MemoryStore, Referenced,
//!     SharedStore, StateStore,
//! };
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//! use std::sync::Arc;
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Note { r#ref: String, body: String }
//!
//! #[derive(Debug)] struct NoteCreate { r#ref: String, body: String }
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl Referenced for Note { fn reference(&self) -> &str { &self.r#ref } }
//!
//! #[async_trait]
//! impl LedgerEntity for Note {
//!     const KIND: CollectionKind = CollectionKind::new("note", "notesLength");
//!     type Create = NoteCreate; type Update = String; type Action = NoteAction;
//!     type ActionResult = (); type Context = (); type Error = NoteError;
//!
//!     async fn from_create_params(p: NoteCreate, _: &()) -> Result<Self, NoteError> {
//!         Ok(Self { r#ref: p.r#ref, body: p.body })
//!     }
//!     async fn on_update(&mut self, body: String, _: &()) -> Result<(), NoteError> {
//!         self.body = body;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), NoteError> {
//!         match a {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let store: SharedStore = Arc::new(MemoryStore::new());
//!     // Deploy: the counter must exist before the first append
//!     Collection::<Note>::new(store.clone(), Note::KIND).initialize().unwrap();
//!
//!     let (actor, client) = CollectionActor::<Note>::new(store.clone(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     let index = client
//!         .create(NoteCreate { r#ref: "n1".into(), body: "hello".into() })
//!         .await
//!         .unwrap();
//!     assert_eq!(index, 0);
//!     assert_eq!(store.get(b"notesLength").unwrap(), Some(b"1".to_vec()));
//!
//!     client.update("n1", "bye".into()).await.unwrap();
//!     assert_eq!(client.get("n1").await.unwrap().record.body, "bye");
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each collection actor runs in its own Tokio task
//! - Requests are processed **sequentially** within a collection
//! - Different collections run in **parallel** and share no transaction
//!
//! ## Testing
//!
//! [`MemoryStore`] is a complete in-process store for tests, with event capture and fault
//! injection. [`mock::MockClient`] answers client requests from canned expectations.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod collection;
pub mod entity;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;
pub mod reference;
pub mod store;
pub mod telemetry;

// Re-export core types for convenience
pub use actor::CollectionActor;
pub use client::CollectionClient;
pub use client_trait::LedgerClient;
pub use collection::{read_counter, write_counter, Collection, CollectionKind};
pub use entity::LedgerEntity;
pub use error::FrameworkError;
pub use memory::{MemoryStore, PublishedEvent};
pub use message::{CollectionRequest, Response};
pub use reference::{Indexed, Referenced};
pub use store::{SharedStore, StateStore, StoreError};
