//! # LedgerEntity Trait
//!
//! The contract a record type implements to be managed by a [`CollectionActor`](crate::CollectionActor).
//!
//! An entity declares where it lives in the store ([`LedgerEntity::KIND`]), how it is built
//! from a creation payload, how it reacts to updates and which domain actions it supports.
//! The actor takes care of locating the record by reference, running the hook and writing
//! the result back at the same index.
//!
//! # Hooks
//! All hooks are `async` and receive the actor's `Context`, so an entity can consult other
//! components (for example a user directory) while it is being created or updated. The
//! context is injected when the actor starts running, not when it is constructed.
//!
//! A hook that returns `Err` leaves the stored record untouched: the actor only persists the
//! mutated copy after the hook succeeds.

use crate::collection::CollectionKind;
use crate::reference::Referenced;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

#[async_trait]
pub trait LedgerEntity:
    Referenced + Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static
{
    /// Store layout of the collection holding this entity.
    const KIND: CollectionKind;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Enum representing record-specific operations (e.g. `Deplete`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum covers every hook of the entity; callers recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) by downcasting.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the record from its creation payload. Runs before the record is appended, so a
    /// failure here never consumes an index.
    async fn from_create_params(
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self, Self::Error>;

    /// Applies an update to the record in place.
    async fn on_update(&mut self, update: Self::Update, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Handles a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
