//! # Collection Actor
//!
//! The server side of a collection. One `CollectionActor` owns one counter-backed
//! collection and processes every request against it sequentially, in arrival order.
//!
//! The collection primitives are plain read-then-write sequences over the store (read the
//! counter, write the record, write the counter). Running them inside a single actor loop is
//! what keeps two appends from claiming the same index: within a collection, no two requests
//! ever interleave. Requests against *different* collections run in parallel and are not
//! coordinated.

use crate::client::CollectionClient;
use crate::collection::Collection;
use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::message::CollectionRequest;
use crate::reference::Indexed;
use crate::store::SharedStore;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that serializes access to one collection.
///
/// # Operations
///
/// * **Create**: builds the record with [`LedgerEntity::from_create_params`], then appends it
///   and returns the new index. A failed build appends nothing.
/// * **Get** / **GetAt** / **Length**: read-only lookups.
/// * **Update**: finds the record by reference, runs [`LedgerEntity::on_update`] on a copy and
///   writes the copy back at the same index.
/// * **Action**: same as update, with [`LedgerEntity::handle_action`]. The copy is only written
///   back when the action succeeds.
pub struct CollectionActor<T: LedgerEntity> {
    receiver: mpsc::Receiver<CollectionRequest<T>>,
    collection: Collection<T>,
}

impl<T: LedgerEntity> CollectionActor<T> {
    /// Creates a new `CollectionActor` over `store` and its associated `CollectionClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. If the channel is full, calls
    /// to the client wait until there is space.
    pub fn new(store: SharedStore, buffer_size: usize) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            collection: Collection::new(store, T::KIND),
        };
        (actor, CollectionClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = T::KIND.record_prefix;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(index) => info!(entity_type, index, "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Get {
                    reference,
                    respond_to,
                } => {
                    let result = self.collection.find_by_ref(&reference);
                    debug!(entity_type, %reference, found = result.is_ok(), "Get");
                    let _ = respond_to.send(result);
                }
                CollectionRequest::GetAt { index, respond_to } => {
                    let result = self.collection.get(index);
                    debug!(entity_type, index, found = result.is_ok(), "GetAt");
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Length { respond_to } => {
                    let _ = respond_to.send(self.collection.length());
                }
                CollectionRequest::Update {
                    reference,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %reference, ?update, "Update");
                    let result = self.update(&reference, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %reference, "Updated"),
                        Err(e) => warn!(entity_type, %reference, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                CollectionRequest::Action {
                    reference,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %reference, ?action, "Action");
                    let result = self.act(&reference, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %reference, "Action ok"),
                        Err(e) => warn!(entity_type, %reference, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        let size = self.collection.length().unwrap_or_default();
        info!(entity_type, size, "Shutdown");
    }

    async fn create(&self, params: T::Create, context: &T::Context) -> Result<u64, FrameworkError> {
        let record = T::from_create_params(params, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.collection.append(&record)
    }

    async fn update(
        &self,
        reference: &str,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let Indexed { index, mut record } = self.collection.find_by_ref(reference)?;
        record
            .on_update(update, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.collection.replace(index, &record)?;
        Ok(record)
    }

    async fn act(
        &self,
        reference: &str,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let Indexed { index, mut record } = self.collection.find_by_ref(reference)?;
        let outcome = record
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.collection.replace(index, &record)?;
        Ok(outcome)
    }
}
