//! # Reference Index
//!
//! Translates a caller-visible reference string into the record and its permanent index.
//!
//! The store has no secondary indexes, so lookup is a linear scan over indices
//! `0..length` in ascending order. The first record whose reference matches wins: when two
//! records share a reference, the one with the lowest index is always returned. Any faster
//! index added later must keep that first-match rule.

use crate::collection::Collection;
use crate::error::FrameworkError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Records that carry a caller-visible reference.
pub trait Referenced {
    fn reference(&self) -> &str;
}

/// A record together with the index it is stored at.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    pub index: u64,
    pub record: T,
}

impl<T: Referenced + Serialize + DeserializeOwned> Collection<T> {
    /// Returns the lowest-indexed record whose reference equals `reference`.
    ///
    /// Costs one read per record up to the match; fails with [`FrameworkError::NotFound`]
    /// once the scan is exhausted.
    pub fn find_by_ref(&self, reference: &str) -> Result<Indexed<T>, FrameworkError> {
        let length = self.length()?;
        for index in 0..length {
            let record = self.read_slot(index)?;
            if record.reference() == reference {
                return Ok(Indexed { index, record });
            }
        }
        Err(FrameworkError::NotFound(format!(
            "no record with ref {reference:?}"
        )))
    }
}
