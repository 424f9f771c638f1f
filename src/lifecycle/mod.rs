//! # Lifecycle Management
//!
//! [`LedgerSystem`] wires the collection actors, the user directory, the event channel and the
//! depletion engine together over one state store.
//!
//! ## Deploy vs Start
//!
//! - [`LedgerSystem::deploy`] writes the three collection counters (`productsLength`,
//!   `ordersLength`, `usersLength`) to `"0"` and starts the actors. Use it on a fresh store.
//! - [`LedgerSystem::start`] attaches to a store that already holds a ledger.
//!
//! ## Observability
//!
//! Call [`ledger_framework::telemetry::setup_tracing`] once at startup; filtering follows
//! `RUST_LOG`.

pub mod ledger_system;

pub use ledger_system::*;
