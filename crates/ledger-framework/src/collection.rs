//! # Counter-Backed Collection
//!
//! An append-only sequence of serialized records kept in a flat key-value store. Each
//! collection owns two kinds of keys:
//!
//! - one length counter (e.g. `productsLength`) holding a decimal string, which is both the
//!   next free index and the number of valid records;
//! - one positional key per record (e.g. `product0`, `product1`, ...), holding the record as
//!   JSON.
//!
//! Records are never deleted and the counter never decreases, so an index handed out by
//! [`Collection::append`] stays valid forever. The counter key is private to this type.
//!
//! Every method is a short read-then-write sequence with no locking. Two `append` calls on the
//! same collection running concurrently can both read length `L` and overwrite each other's
//! record. [`CollectionActor`](crate::CollectionActor) avoids this by serializing every call
//! against a collection; direct users of `Collection` must provide the same guarantee.

use crate::error::FrameworkError;
use crate::store::{SharedStore, StateStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

/// Key layout of one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionKind {
    /// Prefix of positional keys; record `i` lives under `{record_prefix}{i}`.
    pub record_prefix: &'static str,
    /// Key of the decimal length counter.
    pub length_key: &'static str,
}

impl CollectionKind {
    pub const fn new(record_prefix: &'static str, length_key: &'static str) -> Self {
        Self {
            record_prefix,
            length_key,
        }
    }
}

/// Typed view over one counter-backed collection.
pub struct Collection<T> {
    store: SharedStore,
    kind: CollectionKind,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            kind: self.kind,
            _record: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Collection<T> {
    pub fn new(store: SharedStore, kind: CollectionKind) -> Self {
        Self {
            store,
            kind,
            _record: PhantomData,
        }
    }

    /// Resets the length counter to zero.
    ///
    /// Positional keys are left in place; they become unreachable until overwritten.
    pub fn initialize(&self) -> Result<(), FrameworkError> {
        write_counter(self.store.as_ref(), self.kind.length_key, 0)
    }

    /// Current number of records.
    pub fn length(&self) -> Result<u64, FrameworkError> {
        read_counter(self.store.as_ref(), self.kind.length_key)
    }

    /// Appends `record` and returns the index it was stored at.
    ///
    /// The record is written before the counter, so a failed counter write leaves an
    /// unreachable record rather than a counter pointing past the data.
    pub fn append(&self, record: &T) -> Result<u64, FrameworkError> {
        let index = self.length()?;
        let bytes = encode(record)?;
        self.store.put(self.record_key(index).as_bytes(), bytes)?;
        write_counter(self.store.as_ref(), self.kind.length_key, index + 1)?;
        Ok(index)
    }

    /// Reads the record at `index`.
    pub fn get(&self, index: u64) -> Result<T, FrameworkError> {
        let length = self.length()?;
        if index >= length {
            return Err(FrameworkError::NotFound(format!(
                "{} (length {length})",
                self.record_key(index)
            )));
        }
        self.read_slot(index)
    }

    /// Overwrites the record at an existing `index`. The length is unchanged.
    pub fn replace(&self, index: u64, record: &T) -> Result<(), FrameworkError> {
        let length = self.length()?;
        if index >= length {
            return Err(FrameworkError::NotFound(format!(
                "{} (length {length})",
                self.record_key(index)
            )));
        }
        let bytes = encode(record)?;
        self.store.put(self.record_key(index).as_bytes(), bytes)?;
        Ok(())
    }

    pub(crate) fn read_slot(&self, index: u64) -> Result<T, FrameworkError> {
        let key = self.record_key(index);
        let bytes = self
            .store
            .get(key.as_bytes())?
            .ok_or_else(|| FrameworkError::NotFound(key.clone()))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| FrameworkError::NotFound(format!("{key} is not decodable: {e}")))
    }

    fn record_key(&self, index: u64) -> String {
        format!("{}{}", self.kind.record_prefix, index)
    }
}

/// Reads a decimal counter stored under `key`.
///
/// Fails with [`FrameworkError::CorruptCounter`] when the key is missing, is not UTF-8 or does
/// not hold a non-negative decimal integer.
pub fn read_counter(store: &dyn StateStore, key: &str) -> Result<u64, FrameworkError> {
    let raw = store
        .get(key.as_bytes())?
        .ok_or_else(|| FrameworkError::CorruptCounter {
            key: key.to_string(),
            reason: "counter has not been initialized".to_string(),
        })?;
    let text = std::str::from_utf8(&raw).map_err(|_| FrameworkError::CorruptCounter {
        key: key.to_string(),
        reason: "counter is not valid UTF-8".to_string(),
    })?;
    text.trim()
        .parse::<u64>()
        .map_err(|_| FrameworkError::CorruptCounter {
            key: key.to_string(),
            reason: format!("counter value {text:?} is not a decimal integer"),
        })
}

/// Writes `value` under `key` as a decimal string.
pub fn write_counter(store: &dyn StateStore, key: &str, value: u64) -> Result<(), FrameworkError> {
    store.put(key.as_bytes(), value.to_string().into_bytes())?;
    Ok(())
}

fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, FrameworkError> {
    serde_json::to_vec(record).map_err(|e| FrameworkError::Codec(e.to_string()))
}
