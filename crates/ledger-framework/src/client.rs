//! # Generic Client
//!
//! This module defines the generic client for communicating with collection actors.

use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::message::CollectionRequest;
use crate::reference::Indexed;
use tokio::sync::{mpsc, oneshot};

/// ## CollectionClient
///
/// The `CollectionClient<T>` provides an async API for interacting with a
/// `CollectionActor<T>`. It forwards requests over a Tokio mpsc channel and returns results via
/// oneshot channels. It holds only a sender, so cloning is cheap.
#[derive(Clone)]
pub struct CollectionClient<T: LedgerEntity> {
    sender: mpsc::Sender<CollectionRequest<T>>,
}

impl<T: LedgerEntity> CollectionClient<T> {
    pub fn new(sender: mpsc::Sender<CollectionRequest<T>>) -> Self {
        Self { sender }
    }

    /// Appends a new record and returns its index.
    pub async fn create(&self, params: T::Create) -> Result<u64, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Create { params, respond_to })
            .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Finds the first record with the given reference.
    pub async fn get(&self, reference: impl Into<String>) -> Result<Indexed<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Get {
            reference: reference.into(),
            respond_to,
        })
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn get_at(&self, index: u64) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::GetAt { index, respond_to })
            .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn length(&self) -> Result<u64, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Length { respond_to }).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn update(
        &self,
        reference: impl Into<String>,
        update: T::Update,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Update {
            reference: reference.into(),
            update,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        reference: impl Into<String>,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.send(CollectionRequest::Action {
            reference: reference.into(),
            action,
            respond_to,
        })
        .await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    async fn send(&self, request: CollectionRequest<T>) -> Result<(), FrameworkError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| FrameworkError::ActorClosed)
    }
}
