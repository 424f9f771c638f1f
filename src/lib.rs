//! # Stock Ledger
//!
//! > **A product, order and user ledger over a key-value state store.**
//!
//! The ledger keeps three append-only collections (products, orders, users) in a shared
//! [`StateStore`](ledger_framework::StateStore). Records are JSON documents under
//! `"{entity}{index}"` keys; each collection counts its records under a `*Length` key.
//! Stock depletion removes the quantities an order consumes, publishes replenishment requests
//! for products that fall under their critical level, then confirms the order.
//!
//! ## 🏗️ Architecture
//!
//! ### 1. The Engine ([`ledger_framework`])
//! A generic [`CollectionActor<T>`](ledger_framework::CollectionActor) owns one collection
//! and processes its requests sequentially. Index allocation and read-modify-write
//! updates of a collection are therefore never interleaved.
//!
//! ### 2. The Entities ([`product_catalog`], [`order_ledger`])
//! Implementations of [`LedgerEntity`](ledger_framework::LedgerEntity) for
//! [`Product`](model::Product) and [`Order`](model::Order). The order actor receives the
//! [`UserDirectory`](directory::UserDirectory) as its context to resolve credential hashes.
//!
//! ### 3. The Interface ([`clients`], [`depletion`], [`invocation`])
//! Domain clients wrap the generic client; the
//! [`StockDepletionEngine`](depletion::StockDepletionEngine) composes both of them;
//! [`Invocation`](invocation::Invocation) parses the positional string calls the ledger
//! is driven with.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`LedgerSystem`](lifecycle::LedgerSystem) initializes the store, spawns the actors,
//! dispatches invocations and shuts everything down.
//!
//! ## ⚠️ Consistency
//!
//! Each collection is consistent on its own. Nothing spans collections: a depletion that
//! fails part-way keeps the decrements already applied, and user registration is a plain
//! read-then-write on `usersLength`.
//!
//! ## 🚀 Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run -- ledger.toml
//! ```

pub mod clients;
pub mod config;
pub mod depletion;
pub mod directory;
pub mod error;
pub mod events;
pub mod invocation;
pub mod lifecycle;
pub mod model;
pub mod order_ledger;
pub mod product_catalog;
