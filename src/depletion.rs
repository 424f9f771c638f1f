//! # Stock Depletion Engine
//!
//! Removes the stock an order consumes, requests replenishment for products that fall under
//! their critical threshold, then confirms the order.
//!
//! ## Single pass (default)
//!
//! Lines are processed strictly in input order. Each line is one `Deplete` action on the
//! product catalog; a successful decrement is persisted before the next line starts. The
//! first failure (unknown product, insufficient stock, rejected event) aborts the call and
//! **earlier decrements stay applied**. The order is confirmed only after every line passed;
//! an unknown order therefore fails after all stock has been removed.
//!
//! ## Two phase
//!
//! Every product and the order are resolved first, and all decrements are simulated on local
//! copies (a product listed twice is checked against its running total). Only when the whole
//! request validates is it committed through the single-pass path. Validation failures leave
//! the store untouched. The products and orders collections share no transaction, so a
//! concurrent writer can still make the commit fail part-way.

use crate::clients::{OrderClient, ProductClient};
use crate::error::LedgerError;
use crate::events::{EventChannel, ReplenishmentEvent};
use crate::model::{OrderState, Product};
use crate::product_catalog::ProductError;
use ledger_framework::LedgerClient;
use serde::Deserialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, info, info_span, warn, Instrument};

/// One (product, quantity) pair to remove from stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepletionLine {
    pub product_ref: String,
    pub quantity: i64,
}

impl DepletionLine {
    pub fn new(product_ref: impl Into<String>, quantity: i64) -> Self {
        Self {
            product_ref: product_ref.into(),
            quantity,
        }
    }
}

/// Only `ref` is read from the product objects of a depletion request.
#[derive(Deserialize)]
struct ProductRef {
    #[serde(rename = "ref")]
    reference: String,
}

/// Parses the product and quantity arrays of a depletion request.
///
/// Fails with [`LedgerError::MalformedPayload`] when either array is not valid JSON or when
/// their lengths differ. Quantities are taken as given, negative ones included.
pub fn parse_lines(
    products_json: &str,
    quantities_json: &str,
) -> Result<Vec<DepletionLine>, LedgerError> {
    let products: Vec<ProductRef> = serde_json::from_str(products_json)
        .map_err(|e| LedgerError::MalformedPayload(format!("products: {e}")))?;
    let quantities: Vec<i64> = serde_json::from_str(quantities_json)
        .map_err(|e| LedgerError::MalformedPayload(format!("quantities: {e}")))?;

    if products.len() != quantities.len() {
        return Err(LedgerError::MalformedPayload(format!(
            "{} products but {} quantities",
            products.len(),
            quantities.len()
        )));
    }

    Ok(products
        .into_iter()
        .zip(quantities)
        .map(|(product, quantity)| DepletionLine::new(product.reference, quantity))
        .collect())
}

/// How a depletion request is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepletionStrategy {
    /// Apply line by line; no rollback on failure.
    #[default]
    SinglePass,
    /// Validate everything, then apply.
    TwoPhase,
}

/// Result of one depleted line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    pub product_ref: String,
    pub requested: i64,
    pub remaining: i64,
}

/// Everything a successful depletion did.
#[derive(Debug, Clone, PartialEq)]
pub struct DepletionReport {
    pub order_ref: String,
    pub lines: Vec<LineOutcome>,
    /// Events published, in publication order.
    pub replenishments: Vec<ReplenishmentEvent>,
    pub order_state: OrderState,
}

#[derive(Clone)]
pub struct StockDepletionEngine {
    products: ProductClient,
    orders: OrderClient,
    events: EventChannel,
    strategy: DepletionStrategy,
}

impl StockDepletionEngine {
    pub fn new(
        products: ProductClient,
        orders: OrderClient,
        events: EventChannel,
        strategy: DepletionStrategy,
    ) -> Self {
        Self {
            products,
            orders,
            events,
            strategy,
        }
    }

    pub fn strategy(&self) -> DepletionStrategy {
        self.strategy
    }

    /// Depletes `lines` for `order_ref` with the configured strategy.
    pub async fn deplete(
        &self,
        order_ref: &str,
        lines: &[DepletionLine],
    ) -> Result<DepletionReport, LedgerError> {
        let span = info_span!("deplete_stock", order_ref, strategy = ?self.strategy);
        async {
            debug!(?lines, "Depletion requested");
            if self.strategy == DepletionStrategy::TwoPhase {
                self.validate(order_ref, lines).await?;
            }
            self.apply(order_ref, lines).await
        }
        .instrument(span)
        .await
    }

    async fn apply(
        &self,
        order_ref: &str,
        lines: &[DepletionLine],
    ) -> Result<DepletionReport, LedgerError> {
        let mut outcomes = Vec::with_capacity(lines.len());
        let mut replenishments = Vec::new();

        for (position, line) in lines.iter().enumerate() {
            let depletion = self
                .products
                .deplete(&line.product_ref, line.quantity)
                .await
                .inspect_err(|e| {
                    warn!(
                        position,
                        product_ref = %line.product_ref,
                        error = %e,
                        "Depletion aborted"
                    )
                })?;
            info!(
                product_ref = %line.product_ref,
                requested = line.quantity,
                remaining = depletion.remaining,
                "Stock depleted"
            );

            if let Some(event) = depletion.replenishment {
                self.events.publish(&event)?;
                replenishments.push(event);
            }
            outcomes.push(LineOutcome {
                product_ref: depletion.reference,
                requested: line.quantity,
                remaining: depletion.remaining,
            });
        }

        let order_state = self.orders.confirm(order_ref).await?;
        info!(%order_state, lines = outcomes.len(), "Order confirmed");

        Ok(DepletionReport {
            order_ref: order_ref.to_string(),
            lines: outcomes,
            replenishments,
            order_state,
        })
    }

    /// Dry run of [`Self::apply`] against current records. Performs no writes.
    async fn validate(&self, order_ref: &str, lines: &[DepletionLine]) -> Result<(), LedgerError> {
        let mut simulated: HashMap<&str, Product> = HashMap::new();

        for line in lines {
            let product = match simulated.entry(line.product_ref.as_str()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    entry.insert(self.products.find(&line.product_ref).await?.record)
                }
            };
            product.deplete(line.quantity).map_err(|e: ProductError| {
                warn!(product_ref = %line.product_ref, error = %e, "Validation failed");
                LedgerError::from(e)
            })?;
        }

        self.orders.find(order_ref).await?;
        debug!(products = simulated.len(), "Validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_pairs_refs_with_quantities() {
        let lines = parse_lines(
            r#"[{"ref":"P1","description":"ignored"},{"ref":"P2"}]"#,
            "[3, 4]",
        )
        .unwrap();
        assert_eq!(
            lines,
            vec![DepletionLine::new("P1", 3), DepletionLine::new("P2", 4)]
        );
    }

    #[test]
    fn test_parse_lines_rejects_bad_payloads() {
        for (products, quantities) in [
            ("not json", "[1]"),
            (r#"[{"ref":"P1"}]"#, "[1, 2]"),
            (r#"[{"ref":"P1"}]"#, r#"["1"]"#),
            (r#"[{"description":"no ref"}]"#, "[1]"),
        ] {
            assert!(
                matches!(
                    parse_lines(products, quantities),
                    Err(LedgerError::MalformedPayload(_))
                ),
                "{products} / {quantities}"
            );
        }
    }

    #[test]
    fn test_parse_lines_keeps_negative_quantities() {
        assert_eq!(
            parse_lines(r#"[{"ref":"P1"}]"#, "[-5]").unwrap(),
            vec![DepletionLine::new("P1", -5)]
        );
    }

    #[test]
    fn test_empty_request_parses_to_no_lines() {
        assert!(parse_lines("[]", "[]").unwrap().is_empty());
    }
}
