use ledger_framework::{LedgerClient, MemoryStore, SharedStore};
use stock_ledger::config::LedgerConfig;
use stock_ledger::depletion::{DepletionLine, DepletionStrategy};
use stock_ledger::error::{ErrorKind, LedgerError};
use stock_ledger::events::ReplenishmentEvent;
use stock_ledger::invocation::Invocation;
use stock_ledger::lifecycle::LedgerSystem;
use stock_ledger::model::{OrderState, PackageInfo, ProductCreate};
use stock_ledger::product_catalog::ProductError;
use std::sync::Arc;

fn deploy_with(strategy: DepletionStrategy) -> (Arc<MemoryStore>, LedgerSystem) {
    let memory = Arc::new(MemoryStore::new());
    let store: SharedStore = memory.clone();
    let config = LedgerConfig {
        depletion_strategy: strategy,
        ..LedgerConfig::default()
    };
    let system = LedgerSystem::deploy(store, &config).expect("deploy failed");
    (memory, system)
}

fn deploy() -> (Arc<MemoryStore>, LedgerSystem) {
    deploy_with(DepletionStrategy::SinglePass)
}

async fn call(system: &LedgerSystem, function: &str, args: &[&str]) -> Result<(), LedgerError> {
    system.invoke_raw(function, args).await.map(|_| ())
}

async fn stock_of(system: &LedgerSystem, reference: &str) -> i64 {
    system
        .product_client
        .find(reference)
        .await
        .expect("product missing")
        .record
        .quantity
}

async fn state_of(system: &LedgerSystem, order_ref: &str) -> OrderState {
    system
        .order_client
        .find(order_ref)
        .await
        .expect("order missing")
        .record
        .state
}

/// Product(quantity=10, critical=3, provision=7) plus an order to confirm.
async fn seed(system: &LedgerSystem) {
    call(system, "addProduct", &["P1", "Widget", "2.5", "10", "3"])
        .await
        .unwrap();
    call(system, "setProvision", &["P1", "7"]).await.unwrap();
    call(
        system,
        "addOrder",
        &["alice@pw", r#"[{"ref":"P1"}]"#, "[1]", "2.5", "O1"],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_products_get_consecutive_indices() {
    let (_memory, system) = deploy();

    for (i, reference) in ["P0", "P1", "P2"].iter().enumerate() {
        let index = system
            .product_client
            .add_product(ProductCreate::parse(reference, "item", "1.0", "5", "1").unwrap())
            .await
            .unwrap();
        assert_eq!(index, i as u64);
    }

    // Unparsable price: rejected before reaching the catalog
    let err = call(&system, "addProduct", &["P3", "item", "cheap", "5", "1"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    // Negative price: rejected by the catalog itself
    let err = system
        .product_client
        .add_product(ProductCreate {
            reference: "P3".into(),
            description: "item".into(),
            price: -1.0,
            quantity: 5,
            critical: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::InvalidArgument(_)));

    assert_eq!(system.read("productsLength").unwrap(), b"3".to_vec());
    assert_eq!(system.product_client.length().await.unwrap(), 3);
    for (i, reference) in ["P0", "P1", "P2"].iter().enumerate() {
        let product = system.product_client.get_at(i as u64).await.unwrap();
        assert_eq!(product.reference, *reference);
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_refs_resolve_to_lowest_index() {
    let (_memory, system) = deploy();
    call(&system, "addProduct", &["P1", "first", "1.0", "5", "1"])
        .await
        .unwrap();
    call(&system, "addProduct", &["P1", "second", "1.0", "5", "1"])
        .await
        .unwrap();

    call(&system, "setProvision", &["P1", "9"]).await.unwrap();

    let found = system.product_client.find("P1").await.unwrap();
    assert_eq!(found.index, 0);
    assert_eq!(found.record.description, "first");
    assert_eq!(found.record.provision, 9);
    assert_eq!(system.product_client.get_at(1).await.unwrap().provision, 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_depleting_entire_stock_is_insufficient() {
    let (memory, system) = deploy();
    seed(&system).await;

    let err = system
        .deplete("O1", &[DepletionLine::new("P1", 10)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientStock {
            requested: 10,
            available: 10,
            ..
        }
    ));
    assert_eq!(stock_of(&system, "P1").await, 10);
    assert_eq!(state_of(&system, "O1").await, OrderState::Created);
    assert!(memory.events().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_dropping_below_critical_publishes_provision() {
    let (memory, system) = deploy();
    seed(&system).await;

    let report = system
        .deplete("O1", &[DepletionLine::new("P1", 8)])
        .await
        .unwrap();

    assert_eq!(stock_of(&system, "P1").await, 2);
    assert_eq!(report.lines[0].remaining, 2);
    assert_eq!(report.order_state, OrderState::Confirmed);
    assert_eq!(
        report.replenishments,
        vec![ReplenishmentEvent {
            product_ref: "P1".into(),
            quantity: 7,
        }]
    );

    let events = memory.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "evtSender");
    let payload: serde_json::Value = serde_json::from_slice(&events[0].payload).unwrap();
    assert_eq!(
        payload,
        serde_json::json!({"eventType": "provisioningOrder", "productRef": "P1", "quantity": 7})
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_staying_above_critical_publishes_nothing() {
    let (memory, system) = deploy();
    seed(&system).await;

    call(&system, "depleteStock", &[r#"[{"ref":"P1"}]"#, "[5]", "O1"])
        .await
        .unwrap();

    assert_eq!(stock_of(&system, "P1").await, 5);
    assert_eq!(state_of(&system, "O1").await, OrderState::Confirmed);
    assert!(memory.events().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_line_keeps_earlier_decrements() {
    let (_memory, system) = deploy();
    seed(&system).await;
    call(&system, "addProduct", &["P2", "Gadget", "4.0", "1", "0"])
        .await
        .unwrap();

    let err = call(
        &system,
        "majProduct",
        &[r#"[{"ref":"P1"},{"ref":"P2"}]"#, "[4, 5]", "O1"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    assert_eq!(stock_of(&system, "P1").await, 6);
    assert_eq!(stock_of(&system, "P2").await, 1);
    assert_eq!(state_of(&system, "O1").await, OrderState::Created);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_product_keeps_earlier_decrements() {
    let (_memory, system) = deploy();
    seed(&system).await;
    call(&system, "addProduct", &["P2", "Gadget", "4.0", "10", "0"])
        .await
        .unwrap();

    let err = call(
        &system,
        "majProduct",
        &[
            r#"[{"ref":"P1"},{"ref":"PX"},{"ref":"P2"}]"#,
            "[4, 1, 1]",
            "O1",
        ],
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(stock_of(&system, "P1").await, 6);
    assert_eq!(stock_of(&system, "P2").await, 10);
    assert_eq!(state_of(&system, "O1").await, OrderState::Created);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_negative_quantity_adds_stock_back() {
    let (memory, system) = deploy();
    seed(&system).await;

    call(&system, "majProduct", &[r#"[{"ref":"P1"}]"#, "[-5]", "O1"])
        .await
        .unwrap();

    assert_eq!(stock_of(&system, "P1").await, 15);
    assert_eq!(state_of(&system, "O1").await, OrderState::Confirmed);
    assert!(memory.events().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_order_fails_after_stock_is_removed() {
    let (_memory, system) = deploy();
    seed(&system).await;

    let err = system
        .deplete("O-missing", &[DepletionLine::new("P1", 4)])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(stock_of(&system, "P1").await, 6);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_two_phase_rejects_without_writing() {
    let (memory, system) = deploy_with(DepletionStrategy::TwoPhase);
    seed(&system).await;
    call(&system, "addProduct", &["P2", "Gadget", "4.0", "1", "0"])
        .await
        .unwrap();
    let before = system.read("product0").unwrap();

    // Second line cannot be served
    let err = system
        .deplete(
            "O1",
            &[DepletionLine::new("P1", 4), DepletionLine::new("P2", 5)],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);

    // Each line fits alone but not together
    let err = system
        .deplete(
            "O1",
            &[DepletionLine::new("P1", 6), DepletionLine::new("P1", 6)],
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientStock);

    // Unknown order is detected before any write
    let err = system
        .deplete("O-missing", &[DepletionLine::new("P1", 4)])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(system.read("product0").unwrap(), before);
    assert_eq!(state_of(&system, "O1").await, OrderState::Created);
    assert!(memory.events().is_empty());

    // A valid request is applied in full
    let report = system
        .deplete(
            "O1",
            &[DepletionLine::new("P1", 4), DepletionLine::new("P1", 4)],
        )
        .await
        .unwrap();
    assert_eq!(stock_of(&system, "P1").await, 2);
    assert_eq!(report.replenishments.len(), 1);
    assert_eq!(report.order_state, OrderState::Confirmed);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_event_aborts_after_decrement() {
    let (memory, system) = deploy();
    seed(&system).await;
    memory.reject_events(true);

    let err = system
        .deplete("O1", &[DepletionLine::new("P1", 8)])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(stock_of(&system, "P1").await, 2);
    assert_eq!(state_of(&system, "O1").await, OrderState::Created);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_round_trips_and_resolves_client() {
    let (_memory, system) = deploy();
    call(&system, "addUser", &["alice", "pw", "hash-alice"])
        .await
        .unwrap();
    call(
        &system,
        "addOrder",
        &[
            "alice@pw",
            r#"[{"ref":"P1","description":"Widget","price":2.5},{"ref":"P2"}]"#,
            "[3, 4]",
            "23.5",
            "O1",
        ],
    )
    .await
    .unwrap();
    call(
        &system,
        "addOrder",
        &["ghost@x", r#"[{"ref":"P1"}]"#, "[1]", "2.5", "O2"],
    )
    .await
    .unwrap();

    let order = system.order_client.find("O1").await.unwrap().record;
    assert_eq!(order.total_price, 23.5);
    assert_eq!(order.quantities, vec![3, 4]);
    assert_eq!(order.products.len(), 2);
    assert_eq!(order.products[0].reference, "P1");
    assert_eq!(order.products[0].description, "Widget");
    assert_eq!(order.products[1].reference, "P2");
    assert_eq!(order.client_hash, "hash-alice");
    assert!(order.package.is_unset());
    assert_eq!(order.state, OrderState::Created);

    // Unknown clients are tolerated
    let ghost = system.order_client.find("O2").await.unwrap().record;
    assert_eq!(ghost.client_hash, "");

    assert_eq!(system.read("ordersLength").unwrap(), b"2".to_vec());
    assert_eq!(system.read("usersLength").unwrap(), b"1".to_vec());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_order_payload_is_not_stored() {
    let (_memory, system) = deploy();

    for args in [
        ["alice@pw", "[{", "[1]", "1.0", "O1"],
        ["alice@pw", r#"[{"ref":"P1"}]"#, "[1, 2]", "1.0", "O1"],
    ] {
        let err = call(&system, "addOrder", &args).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);
    }
    assert_eq!(system.read("ordersLength").unwrap(), b"0".to_vec());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_tracking_id_forces_shipped() {
    let (_memory, system) = deploy();
    seed(&system).await;
    assert_eq!(state_of(&system, "O1").await.code(), 1);

    call(&system, "setTrackingID", &["TRK-1", "O1"])
        .await
        .unwrap();

    let order = system.order_client.find("O1").await.unwrap().record;
    assert_eq!(order.tracking_id, "TRK-1");
    assert_eq!(order.state.code(), 3);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_transport_and_raw_state_writes() {
    let (_memory, system) = deploy();
    seed(&system).await;
    call(&system, "addUser", &["dhl", "pw", "hash-dhl"])
        .await
        .unwrap();

    call(
        &system,
        "setTransport",
        &[r#"{"dimension":"30x20x10","weight":1.5}"#, "O1", "dhl@pw"],
    )
    .await
    .unwrap();
    let order = system.order_client.find("O1").await.unwrap().record;
    assert_eq!(
        order.package,
        PackageInfo {
            dimension: "30x20x10".into(),
            weight: 1.5,
        }
    );
    assert_eq!(order.carrier_hash, "hash-dhl");
    assert_eq!(order.state, OrderState::Created);

    // Any integer is accepted and stored verbatim
    call(&system, "setState", &["42", "O1"]).await.unwrap();
    assert_eq!(state_of(&system, "O1").await, OrderState::Unrecognized(42));
    let raw: serde_json::Value =
        serde_json::from_slice(&system.read("order0").unwrap()).unwrap();
    assert_eq!(raw["state"], 42);

    let err = call(&system, "setState", &["2", "O-missing"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_read_returns_raw_bytes() {
    let (_memory, system) = deploy();
    call(&system, "addUser", &["alice", "pw", "hash-alice"])
        .await
        .unwrap();

    let read = Invocation::parse("read", &["alice@pw"]).unwrap();
    assert_eq!(
        system.invoke(read).await.unwrap(),
        Some(b"hash-alice".to_vec())
    );
    assert_eq!(
        system.invoke_raw("read", &["productsLength"]).await.unwrap(),
        Some(b"0".to_vec())
    );

    let err = system.invoke_raw("read", &["nothing"]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_uninitialized_store_reports_corrupt_counter() {
    let store: SharedStore = Arc::new(MemoryStore::new());
    let system = LedgerSystem::start(store, &LedgerConfig::default());

    let err = call(&system, "addProduct", &["P1", "Widget", "2.5", "10", "3"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptCounter);

    let err = call(&system, "addUser", &["alice", "pw", "h"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptCounter);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invocation_argument_contracts() {
    let (_memory, system) = deploy();

    let err = system
        .invoke_raw("addProduct", &["P1", "Widget"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = system.invoke_raw("dropTable", &["x"]).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = system
        .invoke_raw("depleteStock", &[r#"[{"ref":"P1"}]"#, "[1, 2]", "O1"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPayload);

    assert_eq!(system.read("productsLength").unwrap(), b"0".to_vec());

    system.shutdown().await.unwrap();
}
