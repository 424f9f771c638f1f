//! [`LedgerEntity`] implementation for [`Order`].
//!
//! The order actor runs with the user directory as its context: client and carrier
//! identifiers are turned into opaque hashes while the record is written.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::directory::Resolver;
use crate::model::{Order, OrderCreate, OrderState, OrderUpdate, PackageInfo, Transition};
use async_trait::async_trait;
use ledger_framework::{CollectionKind, LedgerEntity, Referenced};

impl Referenced for Order {
    fn reference(&self) -> &str {
        &self.reference
    }
}

/// Resolves `identifier` to the text of its hash; an unknown identifier yields `""`.
fn resolve_hash(directory: &Resolver, identifier: &str) -> Result<String, OrderError> {
    let hash = directory
        .resolve(identifier)
        .map_err(OrderError::Directory)?;
    Ok(String::from_utf8_lossy(&hash).into_owned())
}

#[async_trait]
impl LedgerEntity for Order {
    const KIND: CollectionKind = CollectionKind::new("order", "ordersLength");
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderState;
    type Context = Resolver;
    type Error = OrderError;

    /// Creates a new Order in state `Created` with unset package info.
    ///
    /// A client missing from the directory is not an error: the order stores an empty hash.
    async fn from_create_params(params: OrderCreate, ctx: &Resolver) -> Result<Self, OrderError> {
        params.validate()?;
        let client_hash = resolve_hash(ctx, &params.client_ref)?;
        Ok(Order {
            reference: params.reference,
            client_hash,
            carrier_hash: String::new(),
            products: params.products,
            quantities: params.quantities,
            total_price: params.total_price,
            package: PackageInfo::unset(),
            tracking_id: String::new(),
            state: OrderState::Created,
        })
    }

    async fn on_update(&mut self, update: OrderUpdate, ctx: &Resolver) -> Result<(), OrderError> {
        match update {
            OrderUpdate::SetTracking(tracking_id) => {
                self.tracking_id = tracking_id;
                self.state = self.state.apply(Transition::AssignTracking);
            }
            OrderUpdate::SetTransport {
                package,
                carrier_ref,
            } => {
                self.carrier_hash = resolve_hash(ctx, &carrier_ref)?;
                self.package = package;
            }
            OrderUpdate::SetState(code) => {
                self.state = self.state.apply(Transition::Overwrite(code));
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Resolver,
    ) -> Result<OrderState, OrderError> {
        match action {
            OrderAction::Confirm => {
                self.state = self.state.apply(Transition::Confirm);
                Ok(self.state)
            }
        }
    }
}
