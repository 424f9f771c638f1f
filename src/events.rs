//! # Replenishment Events
//!
//! Notifications published when a depletion drops a product under its critical threshold.
//! They are notification-only: nothing in the ledger reacts to them.

use crate::error::LedgerError;
use ledger_framework::{SharedStore, StoreError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Request to restock `quantity` units of `product_ref`.
///
/// `quantity` is the product's configured provision, not the amount just depleted. On the
/// wire it reads `{"eventType":"provisioningOrder","productRef":"P1","quantity":20}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename = "provisioningOrder", rename_all = "camelCase")]
pub struct ReplenishmentEvent {
    pub product_ref: String,
    pub quantity: i64,
}

/// Named event channel on the state store.
#[derive(Clone)]
pub struct EventChannel {
    store: SharedStore,
    name: String,
}

impl EventChannel {
    pub fn new(store: SharedStore, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn publish(&self, event: &ReplenishmentEvent) -> Result<(), LedgerError> {
        let payload = serde_json::to_vec(event)
            .map_err(|e| LedgerError::Store(StoreError::Backend(e.to_string())))?;
        self.store.publish_event(&self.name, payload)?;
        info!(
            channel = %self.name,
            product_ref = %event.product_ref,
            provision = event.quantity,
            "Replenishment requested"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_framework::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_payload_carries_event_type() {
        let event = ReplenishmentEvent {
            product_ref: "P1".into(),
            quantity: 20,
        };
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"eventType": "provisioningOrder", "productRef": "P1", "quantity": 20})
        );
    }

    #[test]
    fn test_publish_uses_channel_name() {
        let store = Arc::new(MemoryStore::new());
        let channel = EventChannel::new(store.clone(), "evtSender");
        let event = ReplenishmentEvent {
            product_ref: "P1".into(),
            quantity: 5,
        };

        channel.publish(&event).unwrap();

        let published = store.events();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].name, "evtSender");
        let decoded: ReplenishmentEvent = serde_json::from_slice(&published[0].payload).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_rejected_publish_is_a_store_error() {
        let store = Arc::new(MemoryStore::new());
        store.reject_events(true);
        let channel = EventChannel::new(store, "evtSender");
        let event = ReplenishmentEvent {
            product_ref: "P1".into(),
            quantity: 5,
        };

        assert!(matches!(channel.publish(&event), Err(LedgerError::Store(_))));
    }
}
