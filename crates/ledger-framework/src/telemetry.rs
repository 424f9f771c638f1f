//! # Observability & Tracing
//!
//! Installs the `tracing` subscriber shared by the framework and the ledger built on top of it.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); collection actors
//! tag every line with an `entity_type` field instead (`product`, `order`).
//!
//! ```bash
//! # Lifecycle and per-request outcomes
//! RUST_LOG=info cargo run
//!
//! # Full request payloads and lookups
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown with the final collection size
//! - **Collection Operations**: Create, Get, GetAt, Update and Action with their outcome
//! - **Depletion**: one span per depletion request, one event per emitted replenishment
//!
//! With `RUST_LOG=info` a depletion that crosses a threshold reads like:
//!
//! ```text
//! INFO Action ok entity_type="product" reference="P1"
//! INFO Replenishment requested product_ref="P1" provision=20
//! INFO Updated entity_type="order" reference="O1"
//! ```

/// Initializes the global tracing subscriber.
///
/// Filtering comes from `RUST_LOG`. Calling this more than once is harmless: later calls
/// leave the first subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
