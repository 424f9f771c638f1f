//! # Collection Messages
//!
//! Requests sent from a [`CollectionClient`](crate::CollectionClient) to its
//! [`CollectionActor`](crate::CollectionActor).

use crate::entity::LedgerEntity;
use crate::error::FrameworkError;
use crate::reference::Indexed;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// Records are addressed by their caller-visible reference; the actor resolves it to an
/// index with a first-match scan. Only `GetAt` addresses a slot directly. There is no
/// delete: records are permanent.
#[derive(Debug)]
pub enum CollectionRequest<T: LedgerEntity> {
    Create {
        params: T::Create,
        respond_to: Response<u64>,
    },
    Get {
        reference: String,
        respond_to: Response<Indexed<T>>,
    },
    GetAt {
        index: u64,
        respond_to: Response<T>,
    },
    Length {
        respond_to: Response<u64>,
    },
    Update {
        reference: String,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        reference: String,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
