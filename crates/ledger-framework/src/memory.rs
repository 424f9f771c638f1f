//! In-memory [`StateStore`] used by tests, the demo binary and embedded deployments.

use crate::store::{StateStore, StoreError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// An event captured by [`MemoryStore::publish_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub name: String,
    pub payload: Vec<u8>,
}

/// `BTreeMap`-backed store that also records every published event in order.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
    events: RwLock<Vec<PublishedEvent>>,
    reject_events: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every event published so far, oldest first.
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Makes every subsequent `publish_event` call fail with [`StoreError::Backend`].
    pub fn reject_events(&self, reject: bool) {
        self.reject_events.store(reject, Ordering::SeqCst);
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let map = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    fn put(&self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        let mut map = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        map.insert(key.to_vec(), value);
        Ok(())
    }

    fn publish_event(&self, name: &str, payload: Vec<u8>) -> Result<(), StoreError> {
        if self.reject_events.load(Ordering::SeqCst) {
            return Err(StoreError::Backend(format!(
                "event channel {name} is not accepting events"
            )));
        }
        let mut events = self.events.write().map_err(|_| StoreError::Poisoned)?;
        events.push(PublishedEvent {
            name: name.to_string(),
            payload,
        });
        Ok(())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("key_count", &self.len())
            .field("event_count", &self.events().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(b"productsLength").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_overwrites_previous_value() {
        let store = MemoryStore::new();
        store.put(b"product0", b"first".to_vec()).unwrap();
        store.put(b"product0", b"second".to_vec()).unwrap();
        assert_eq!(store.get(b"product0").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_events_are_recorded_in_order() {
        let store = MemoryStore::new();
        store.publish_event("evtSender", b"a".to_vec()).unwrap();
        store.publish_event("evtSender", b"b".to_vec()).unwrap();

        let events = store.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payload, b"a".to_vec());
        assert_eq!(events[1].payload, b"b".to_vec());
    }

    #[test]
    fn test_rejected_events_are_not_recorded() {
        let store = MemoryStore::new();
        store.reject_events(true);
        assert!(matches!(
            store.publish_event("evtSender", b"a".to_vec()),
            Err(StoreError::Backend(_))
        ));
        assert!(store.events().is_empty());
    }
}
