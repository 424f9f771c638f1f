//! Order records and their lifecycle state.

use crate::model::Product;
use crate::order_ledger::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Lifecycle state of an order, stored as a bare integer.
///
/// `1`, `2` and `3` are the known states. Any other integer written through
/// [`Transition::Overwrite`] is kept verbatim as `Unrecognized` so it round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum OrderState {
    #[default]
    Created,
    Confirmed,
    Shipped,
    Unrecognized(i64),
}

/// The ways an order's state can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stock was depleted for the order.
    Confirm,
    /// A tracking number was attached. Always lands on `Shipped`, whatever the current state.
    AssignTracking,
    /// Raw state write. No transition table is consulted.
    Overwrite(i64),
}

impl OrderState {
    pub fn code(self) -> i64 {
        self.into()
    }

    /// Applies `transition`. Every transition is accepted from every state.
    pub fn apply(self, transition: Transition) -> OrderState {
        match transition {
            Transition::Confirm => OrderState::Confirmed,
            Transition::AssignTracking => OrderState::Shipped,
            Transition::Overwrite(code) => OrderState::from(code),
        }
    }
}

impl From<i64> for OrderState {
    fn from(code: i64) -> Self {
        match code {
            1 => OrderState::Created,
            2 => OrderState::Confirmed,
            3 => OrderState::Shipped,
            other => OrderState::Unrecognized(other),
        }
    }
}

impl From<OrderState> for i64 {
    fn from(state: OrderState) -> Self {
        match state {
            OrderState::Created => 1,
            OrderState::Confirmed => 2,
            OrderState::Shipped => 3,
            OrderState::Unrecognized(code) => code,
        }
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderState::Created => write!(f, "created"),
            OrderState::Confirmed => write!(f, "confirmed"),
            OrderState::Shipped => write!(f, "shipped"),
            OrderState::Unrecognized(code) => write!(f, "state {code}"),
        }
    }
}

/// Shipping dimensions attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub dimension: String,
    #[serde(alias = "poids", default = "unset_weight")]
    pub weight: f64,
}

fn unset_weight() -> f64 {
    -1.0
}

impl PackageInfo {
    /// The value every new order starts with.
    pub fn unset() -> Self {
        Self {
            dimension: String::new(),
            weight: unset_weight(),
        }
    }

    pub fn is_unset(&self) -> bool {
        self.dimension.is_empty() && self.weight == unset_weight()
    }

    /// Parses the JSON object passed to `setTransport`.
    pub fn parse(json: &str) -> Result<Self, OrderError> {
        serde_json::from_str(json)
            .map_err(|e| OrderError::MalformedPayload(format!("package info: {e}")))
    }
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self::unset()
    }
}

/// An order, stored as JSON under `order<index>`.
///
/// `products` holds snapshots taken when the order was placed; later catalog changes do not
/// reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "clienthash", default)]
    pub client_hash: String,
    #[serde(rename = "carrierhash", default)]
    pub carrier_hash: String,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub quantities: Vec<i64>,
    #[serde(rename = "totalprice", default)]
    pub total_price: f64,
    #[serde(alias = "collis", default)]
    pub package: PackageInfo,
    #[serde(rename = "trackingid", default)]
    pub tracking_id: String,
    #[serde(default)]
    pub state: OrderState,
}

/// DTO for Order creation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    /// Directory key of the client; resolved to `client_hash` on creation.
    pub client_ref: String,
    pub products: Vec<Product>,
    pub quantities: Vec<i64>,
    pub total_price: f64,
    /// Caller-supplied order reference.
    pub reference: String,
}

impl OrderCreate {
    /// Builds the payload from raw invocation arguments.
    ///
    /// `products_json` is a JSON array of product objects, `quantities_json` a JSON array of
    /// integers of the same length.
    pub fn parse(
        client_ref: &str,
        products_json: &str,
        quantities_json: &str,
        total_price: &str,
        reference: &str,
    ) -> Result<Self, OrderError> {
        let products: Vec<Product> = serde_json::from_str(products_json)
            .map_err(|e| OrderError::MalformedPayload(format!("products: {e}")))?;
        let quantities: Vec<i64> = serde_json::from_str(quantities_json)
            .map_err(|e| OrderError::MalformedPayload(format!("quantities: {e}")))?;
        let total_price = total_price.trim().parse::<f64>().map_err(|_| {
            OrderError::InvalidArgument(format!("total price {total_price:?} is not a number"))
        })?;

        let create = Self {
            client_ref: client_ref.to_string(),
            products,
            quantities,
            total_price,
            reference: reference.to_string(),
        };
        create.validate()?;
        Ok(create)
    }

    /// Products and quantities are parallel arrays and must line up.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.products.len() != self.quantities.len() {
            return Err(OrderError::MalformedPayload(format!(
                "{} products but {} quantities",
                self.products.len(),
                self.quantities.len()
            )));
        }
        Ok(())
    }
}

// DTOs for Order updates.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderUpdate {
    /// Attaches a tracking number and moves the order to `Shipped`.
    SetTracking(String),
    /// Records package info and the carrier, resolved through the directory. State is kept.
    SetTransport {
        package: PackageInfo,
        carrier_ref: String,
    },
    /// Overwrites the state code.
    SetState(i64),
}
