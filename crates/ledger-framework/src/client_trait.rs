//! # LedgerClient Trait
//!
//! Common interface for domain clients, adding provided lookup methods on top of a generic
//! `CollectionClient`.
use crate::{CollectionClient, FrameworkError, Indexed, LedgerEntity};
use async_trait::async_trait;

/// Trait for domain clients to inherit the standard collection lookups.
///
/// Implementors supply the inner client and an error mapping; `find`, `get_at` and `length`
/// come for free.
///
/// # Example
///
/// ```rust
/// use ledger_framework::{CollectionClient, CollectionKind, FrameworkError, LedgerClient, LedgerEntity, Referenced};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Tag { r#ref: String }
/// #[derive(Debug)] struct TagCreate;
/// #[derive(Debug)] enum TagAction {}
/// #[derive(Debug, thiserror::Error)] #[error("tag error: {0}")] struct TagError(String);
///
/// impl Referenced for Tag {
///     fn reference(&self) -> &str { &self.r#ref }
/// }
///
/// #[async_trait]
/// impl LedgerEntity for Tag {
///     const KIND: CollectionKind = CollectionKind::new("tag", "tagsLength");
///     type Create = TagCreate; type Update = (); type Action = TagAction;
///     type ActionResult = (); type Context = (); type Error = TagError;
///     async fn from_create_params(_: TagCreate, _: &()) -> Result<Self, TagError> {
///         Ok(Self { r#ref: "t".into() })
///     }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
///     async fn handle_action(&mut self, _: TagAction, _: &()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: CollectionClient<Tag> }
///
/// #[async_trait]
/// impl LedgerClient<Tag> for TagClient {
///     type Error = TagError;
///     fn inner(&self) -> &CollectionClient<Tag> { &self.inner }
///     fn map_error(e: FrameworkError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // find(), get_at() and length() are provided automatically!
///     let _ = client.find("t").await;
///     let _ = client.length().await;
/// }
/// ```
#[async_trait]
pub trait LedgerClient<T: LedgerEntity>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic CollectionClient.
    fn inner(&self) -> &CollectionClient<T>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Find the first record carrying `reference`, with its index.
    #[tracing::instrument(skip(self))]
    async fn find(&self, reference: &str) -> Result<Indexed<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(reference).await.map_err(Self::map_error)
    }

    /// Fetch the record stored at `index`.
    #[tracing::instrument(skip(self))]
    async fn get_at(&self, index: u64) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get_at(index).await.map_err(Self::map_error)
    }

    /// Number of records in the collection.
    #[tracing::instrument(skip(self))]
    async fn length(&self) -> Result<u64, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().length().await.map_err(Self::map_error)
    }
}
