//! # User Directory
//!
//! Thin pass-through over credential keys in the state store. A user is registered by
//! writing its hash under `<login>@<password>` and bumping `usersLength`; resolution is a raw
//! read of whatever key the caller supplies.
//!
//! Registration is a plain read-then-write on `usersLength` with no actor in front of it.
//! Two concurrent registrations can read the same count and one increment is lost. The
//! credential keys themselves are unaffected.

use crate::error::LedgerError;
use ledger_framework::{read_counter, write_counter, SharedStore, StoreError};
use std::sync::Arc;
use tracing::info;

/// Key of the registered-user counter.
pub const USERS_LENGTH_KEY: &str = "usersLength";

/// Opaque identifier to hash resolution.
///
/// No existence check is implied: an unknown identifier resolves to empty bytes.
pub trait CredentialResolver: Send + Sync {
    fn resolve(&self, identifier: &str) -> Result<Vec<u8>, StoreError>;
}

/// Shared resolver handed to the order actor as its context.
pub type Resolver = Arc<dyn CredentialResolver>;

#[derive(Clone)]
pub struct UserDirectory {
    store: SharedStore,
}

impl UserDirectory {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Key under which the hash of `login` is stored.
    pub fn credential_key(login: &str, password: &str) -> String {
        format!("{login}@{password}")
    }

    /// Resets `usersLength` to zero.
    pub fn initialize(&self) -> Result<(), LedgerError> {
        write_counter(self.store.as_ref(), USERS_LENGTH_KEY, 0)?;
        Ok(())
    }

    /// Number of registrations so far.
    pub fn count(&self) -> Result<u64, LedgerError> {
        Ok(read_counter(self.store.as_ref(), USERS_LENGTH_KEY)?)
    }

    /// Stores `hash` for `login`/`password` and increments the user count.
    ///
    /// Registering the same credentials twice overwrites the hash and counts twice.
    pub fn register(&self, login: &str, password: &str, hash: &str) -> Result<(), LedgerError> {
        let count = self.count()?;
        let key = Self::credential_key(login, password);
        self.store.put(key.as_bytes(), hash.as_bytes().to_vec())?;
        write_counter(self.store.as_ref(), USERS_LENGTH_KEY, count + 1)?;
        info!(login, users = count + 1, "User registered");
        Ok(())
    }
}

impl CredentialResolver for UserDirectory {
    fn resolve(&self, identifier: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self.store.get(identifier.as_bytes())?.unwrap_or_default())
    }
}

impl std::fmt::Debug for UserDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDirectory").finish_non_exhaustive()
    }
}
