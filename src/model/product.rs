//! Product records.
//!
//! # Ledger Framework
//! [`Product`] implements the [`LedgerEntity`](ledger_framework::LedgerEntity) trait,
//! allowing it to be managed by a [`CollectionActor`](ledger_framework::CollectionActor).
//! See [`crate::product_catalog`] for:
//! - Creation parameters ([`ProductCreate`])
//! - Update parameters ([`ProductUpdate`])
//! - Custom actions ([`ProductAction`](crate::product_catalog::ProductAction))

use crate::events::ReplenishmentEvent;
use crate::product_catalog::ProductError;
use serde::{Deserialize, Serialize};

/// A catalog entry, stored as JSON under `product<index>`.
///
/// Missing fields decode to their defaults so records written by older producers stay
/// readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "ref")]
    pub reference: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub critical: i64,
    pub provision: i64,
}

/// Outcome of removing stock from one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Depletion {
    pub reference: String,
    pub remaining: i64,
    /// Set when the remaining stock fell under the critical threshold.
    pub replenishment: Option<ReplenishmentEvent>,
}

impl Product {
    /// Creates a new Product with no provisioning rule.
    ///
    /// # Arguments
    /// * `reference` - Caller-visible identifier
    /// * `description` - Free text
    /// * `price` - Unit price
    /// * `quantity` - Stock on hand
    /// * `critical` - Threshold under which a replenishment is requested
    pub fn new(
        reference: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        quantity: i64,
        critical: i64,
    ) -> Self {
        Self {
            reference: reference.into(),
            description: description.into(),
            price,
            quantity,
            critical,
            provision: 0,
        }
    }

    /// Removes `requested` units from stock.
    ///
    /// Stock must strictly exceed the request: asking for exactly the quantity on hand fails.
    /// A negative request passes that check and adds its magnitude back to stock.
    /// On failure the product is left untouched.
    pub fn deplete(&mut self, requested: i64) -> Result<Depletion, ProductError> {
        if self.quantity <= requested {
            return Err(ProductError::InsufficientStock {
                reference: self.reference.clone(),
                requested,
                available: self.quantity,
            });
        }
        self.quantity = self.quantity.checked_sub(requested).ok_or_else(|| {
            ProductError::InvalidArgument(format!(
                "stock of {} overflows when depleting {requested}",
                self.reference
            ))
        })?;

        let replenishment = (self.critical > self.quantity).then(|| ReplenishmentEvent {
            product_ref: self.reference.clone(),
            quantity: self.provision,
        });

        Ok(Depletion {
            reference: self.reference.clone(),
            remaining: self.quantity,
            replenishment,
        })
    }
}

/// DTO for Product creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreate {
    pub reference: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub critical: i64,
}

impl ProductCreate {
    /// Builds the payload from raw invocation arguments.
    ///
    /// `price` must be a non-negative decimal; `quantity` and `critical` must be integers.
    pub fn parse(
        reference: &str,
        description: &str,
        price: &str,
        quantity: &str,
        critical: &str,
    ) -> Result<Self, ProductError> {
        let price = price
            .trim()
            .parse::<f64>()
            .map_err(|_| ProductError::InvalidArgument(format!("price {price:?} is not a number")))?;
        let create = Self {
            reference: reference.to_string(),
            description: description.to_string(),
            price,
            quantity: parse_integer("quantity", quantity)?,
            critical: parse_integer("critical", critical)?,
        };
        create.validate()?;
        Ok(create)
    }

    /// Checks the numeric fields of an already-typed payload.
    pub fn validate(&self) -> Result<(), ProductError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ProductError::InvalidArgument(format!(
                "price {} must be a non-negative decimal",
                self.price
            )));
        }
        Ok(())
    }
}

// DTOs for Product updates.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductUpdate {
    /// Replaces the replenishment amount requested when stock runs low.
    SetProvision(i64),
}

pub(crate) fn parse_integer(field: &str, value: &str) -> Result<i64, ProductError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ProductError::InvalidArgument(format!("{field} {value:?} is not an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64, critical: i64) -> Product {
        let mut product = Product::new("P1", "Widget", 2.5, quantity, critical);
        product.provision = 20;
        product
    }

    #[test]
    fn test_depleting_all_stock_is_insufficient() {
        let mut p = product(10, 3);
        let err = p.deplete(10).unwrap_err();
        assert!(matches!(
            err,
            ProductError::InsufficientStock {
                requested: 10,
                available: 10,
                ..
            }
        ));
        assert_eq!(p.quantity, 10);
    }

    #[test]
    fn test_crossing_critical_requests_provision() {
        let mut p = product(10, 3);
        let depletion = p.deplete(8).unwrap();
        assert_eq!(depletion.remaining, 2);
        assert_eq!(
            depletion.replenishment,
            Some(ReplenishmentEvent {
                product_ref: "P1".into(),
                quantity: 20,
            })
        );
    }

    #[test]
    fn test_staying_above_critical_is_silent() {
        let mut p = product(10, 3);
        let depletion = p.deplete(5).unwrap();
        assert_eq!(depletion.remaining, 5);
        assert!(depletion.replenishment.is_none());
    }

    #[test]
    fn test_landing_on_critical_is_silent() {
        let mut p = product(10, 3);
        assert!(p.deplete(7).unwrap().replenishment.is_none());
    }

    #[test]
    fn test_negative_request_restocks() {
        let mut p = product(10, 3);
        let depletion = p.deplete(-5).unwrap();
        assert_eq!(depletion.remaining, 15);
        assert_eq!(p.quantity, 15);
        assert!(depletion.replenishment.is_none());
    }

    #[test]
    fn test_overflowing_request_leaves_stock_untouched() {
        let mut p = product(10, 3);
        assert!(matches!(
            p.deplete(i64::MIN),
            Err(ProductError::InvalidArgument(_))
        ));
        assert_eq!(p.quantity, 10);
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(ProductCreate::parse("P1", "d", "1.5", "10", "3").is_ok());
        for (price, quantity, critical) in [
            ("abc", "10", "3"),
            ("-1", "10", "3"),
            ("NaN", "10", "3"),
            ("1.5", "ten", "3"),
            ("1.5", "10", "3.5"),
        ] {
            assert!(
                matches!(
                    ProductCreate::parse("P1", "d", price, quantity, critical),
                    Err(ProductError::InvalidArgument(_))
                ),
                "{price} {quantity} {critical}"
            );
        }
    }

    #[test]
    fn test_record_json_uses_ledger_field_names() {
        let json = serde_json::to_value(product(10, 3)).unwrap();
        assert_eq!(json["ref"], "P1");
        assert_eq!(json["provision"], 20);

        let partial: Product = serde_json::from_str(r#"{"ref":"P9","quantity":4}"#).unwrap();
        assert_eq!(partial.reference, "P9");
        assert_eq!(partial.quantity, 4);
        assert_eq!(partial.provision, 0);
    }
}
