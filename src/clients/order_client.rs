//! # Order Client
//!
//! Provides a high‑level API for interacting with the Order ledger actor.
//! It wraps a `CollectionClient<Order>`; client and carrier resolution happen inside the
//! actor, in the Order entity hooks.
use super::recover_entity_error;
use crate::model::{Order, OrderCreate, OrderState, OrderUpdate, PackageInfo};
use crate::order_ledger::{OrderAction, OrderError};
use async_trait::async_trait;
use ledger_framework::{CollectionClient, FrameworkError, LedgerClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order ledger actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
}

impl OrderClient {
    pub fn new(inner: CollectionClient<Order>) -> Self {
        Self { inner }
    }

    /// Appends an order and returns its index.
    #[instrument(skip(self, params), fields(order_ref = %params.reference))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<u64, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Attaches `tracking_id`. The order is moved to `Shipped` whatever its current state.
    #[instrument(skip(self))]
    pub async fn set_tracking_id(
        &self,
        order_ref: &str,
        tracking_id: &str,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.update(order_ref, OrderUpdate::SetTracking(tracking_id.to_string()))
            .await
    }

    /// Records package info and the carrier resolved from `carrier_ref`.
    #[instrument(skip(self))]
    pub async fn set_transport(
        &self,
        order_ref: &str,
        package: PackageInfo,
        carrier_ref: &str,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.update(
            order_ref,
            OrderUpdate::SetTransport {
                package,
                carrier_ref: carrier_ref.to_string(),
            },
        )
        .await
    }

    /// Overwrites the state code without any transition check.
    #[instrument(skip(self))]
    pub async fn update_state(&self, order_ref: &str, state: i64) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.update(order_ref, OrderUpdate::SetState(state)).await
    }

    /// Moves the order to `Confirmed` and returns the new state.
    #[instrument(skip(self))]
    pub async fn confirm(&self, order_ref: &str) -> Result<OrderState, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(order_ref, OrderAction::Confirm)
            .await
            .map_err(Self::map_error)
    }

    async fn update(&self, order_ref: &str, update: OrderUpdate) -> Result<Order, OrderError> {
        self.inner
            .update(order_ref, update)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl LedgerClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(what) => OrderError::NotFound(what),
            other => recover_entity_error(other, OrderError::Framework),
        }
    }
}
