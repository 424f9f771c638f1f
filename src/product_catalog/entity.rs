//! [`LedgerEntity`] implementation for [`Product`].

use super::actions::ProductAction;
use super::error::ProductError;
use crate::model::{Depletion, Product, ProductCreate, ProductUpdate};
use async_trait::async_trait;
use ledger_framework::{CollectionKind, LedgerEntity, Referenced};

impl Referenced for Product {
    fn reference(&self) -> &str {
        &self.reference
    }
}

#[async_trait]
impl LedgerEntity for Product {
    const KIND: CollectionKind = CollectionKind::new("product", "productsLength");
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = Depletion;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product with `provision = 0`.
    async fn from_create_params(params: ProductCreate, _ctx: &()) -> Result<Self, ProductError> {
        params.validate()?;
        Ok(Product::new(
            params.reference,
            params.description,
            params.price,
            params.quantity,
            params.critical,
        ))
    }

    async fn on_update(&mut self, update: ProductUpdate, _ctx: &()) -> Result<(), ProductError> {
        match update {
            ProductUpdate::SetProvision(provision) => self.provision = provision,
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<Depletion, ProductError> {
        match action {
            ProductAction::Deplete(requested) => self.deplete(requested),
        }
    }
}
