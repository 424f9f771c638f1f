//! # Product Client
//!
//! Provides a high‑level API for interacting with the Product catalog actor.
//! It wraps a `CollectionClient<Product>` and exposes domain‑specific methods.
use super::recover_entity_error;
use crate::model::{Depletion, Product, ProductCreate, ProductUpdate};
use crate::product_catalog::{ProductAction, ProductError};
use async_trait::async_trait;
use ledger_framework::{CollectionClient, FrameworkError, LedgerClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product catalog actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: CollectionClient<Product>,
}

impl ProductClient {
    pub fn new(inner: CollectionClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LedgerClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &CollectionClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(what) => ProductError::NotFound(what),
            other => recover_entity_error(other, ProductError::Framework),
        }
    }
}

impl ProductClient {
    /// Appends a product and returns its index.
    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<u64, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Sets the replenishment amount of the first product carrying `reference`.
    #[instrument(skip(self))]
    pub async fn set_provision(
        &self,
        reference: &str,
        provision: i64,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(reference, ProductUpdate::SetProvision(provision))
            .await
            .map_err(Self::map_error)
    }

    /// Removes `quantity` units from the first product carrying `reference`.
    ///
    /// The product is only rewritten when the depletion succeeds.
    #[instrument(skip(self))]
    pub async fn deplete(&self, reference: &str, quantity: i64) -> Result<Depletion, ProductError> {
        debug!("Depleting {} units of {}", quantity, reference);
        self.inner
            .perform_action(reference, ProductAction::Deplete(quantity))
            .await
            .map_err(Self::map_error)
    }
}
