//! Demo driver: deploys a ledger on an in-memory store and replays a short session.
//!
//! ```bash
//! RUST_LOG=info cargo run -- [config.toml]
//! ```

use ledger_framework::telemetry::setup_tracing;
use ledger_framework::{MemoryStore, SharedStore};
use stock_ledger::config::LedgerConfig;
use stock_ledger::lifecycle::LedgerSystem;
use std::sync::Arc;
use tracing::{error, info, Instrument};

const SESSION: &[(&str, &[&str])] = &[
    ("addUser", &["alice", "s3cret", "a1b2c3"]),
    ("addUser", &["dhl", "carrier-pw", "ff00ff"]),
    ("addProduct", &["P1", "Widget", "2.5", "10", "5"]),
    ("addProduct", &["P2", "Gadget", "12.0", "4", "1"]),
    (
        "addOrder",
        &[
            "alice@s3cret",
            r#"[{"ref":"P1"},{"ref":"P2"}]"#,
            "[6, 1]",
            "27.0",
            "O1",
        ],
    ),
    ("depleteStock", &[r#"[{"ref":"P1"},{"ref":"P2"}]"#, "[6, 1]", "O1"]),
    (
        "setTransport",
        &[r#"{"dimension":"30x20x10","weight":1.2}"#, "O1", "dhl@carrier-pw"],
    ),
    ("setTrackingID", &["TRK-0001", "O1"]),
    ("depleteStock", &[r#"[{"ref":"P2"}]"#, "[10]", "O2"]),
    ("read", &["order0"]),
    ("read", &["product0"]),
];

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => LedgerConfig::load(&path).map_err(|e| e.to_string())?,
        None => LedgerConfig::default(),
    };

    let memory = Arc::new(MemoryStore::new());
    let store: SharedStore = memory.clone();
    let system = LedgerSystem::deploy(store, &config).map_err(|e| e.to_string())?;

    for &(function, args) in SESSION {
        let span = tracing::info_span!("invocation", function);
        let result = system.invoke_raw(function, args).instrument(span).await;
        match result {
            Ok(Some(bytes)) => info!(function, value = %String::from_utf8_lossy(&bytes), "Read"),
            Ok(None) => info!(function, "Invocation succeeded"),
            Err(e) => error!(function, kind = ?e.kind(), error = %e, "Invocation failed"),
        }
    }

    for event in memory.events() {
        info!(
            channel = %event.name,
            payload = %String::from_utf8_lossy(&event.payload),
            "Event published"
        );
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Session completed");
    Ok(())
}
