use crate::clients::{OrderClient, ProductClient};
use crate::config::LedgerConfig;
use crate::depletion::{DepletionReport, StockDepletionEngine};
use crate::directory::{Resolver, UserDirectory};
use crate::error::LedgerError;
use crate::events::EventChannel;
use crate::invocation::Invocation;
use crate::model::{Order, Product};
use ledger_framework::{Collection, LedgerEntity, SharedStore};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// The runtime orchestrator of the stock ledger.
///
/// `LedgerSystem` is responsible for:
/// - **Initialisation**: writing the collection counters of a fresh store ([`LedgerSystem::deploy`])
/// - **Lifecycle Management**: starting and stopping the collection actors
/// - **Dependency Wiring**: the order actor receives the user directory; the depletion engine
///   receives both clients and the event channel
/// - **Dispatch**: routing an [`Invocation`] to the component that serves it
///
/// # Example
///
/// ```rust
/// use ledger_framework::MemoryStore;
/// use stock_ledger::config::LedgerConfig;
/// use stock_ledger::invocation::Invocation;
/// use stock_ledger::lifecycle::LedgerSystem;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = LedgerSystem::deploy(Arc::new(MemoryStore::new()), &LedgerConfig::default())?;
///
///     let add = Invocation::parse("addProduct", &["P1", "Widget", "2.5", "10", "3"])?;
///     system.invoke(add).await?;
///     assert_eq!(system.read("productsLength")?, b"1".to_vec());
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct LedgerSystem {
    /// Client for the Product catalog actor
    pub product_client: ProductClient,

    /// Client for the Order ledger actor
    pub order_client: OrderClient,

    /// Credential registration and resolution
    pub directory: UserDirectory,

    /// Composite depletion operation over both collections
    pub engine: StockDepletionEngine,

    store: SharedStore,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl LedgerSystem {
    /// Resets `productsLength`, `ordersLength` and `usersLength` to zero.
    ///
    /// Existing records stay in the store but are no longer reachable.
    pub fn initialize(store: &SharedStore) -> Result<(), LedgerError> {
        Collection::<Product>::new(store.clone(), Product::KIND).initialize()?;
        Collection::<Order>::new(store.clone(), Order::KIND).initialize()?;
        UserDirectory::new(store.clone()).initialize()?;
        info!("Ledger initialized");
        Ok(())
    }

    /// Initializes a fresh store, then starts the system on it.
    pub fn deploy(store: SharedStore, config: &LedgerConfig) -> Result<Self, LedgerError> {
        Self::initialize(&store)?;
        Ok(Self::start(store, config))
    }

    /// Starts the actors on an already-initialized store.
    ///
    /// Must be called from within a Tokio runtime. On a store that was never initialized every
    /// collection operation fails with `CorruptCounter`.
    pub fn start(store: SharedStore, config: &LedgerConfig) -> Self {
        // 1. Create actors (no dependencies)
        let (product_actor, product_generic) =
            crate::product_catalog::new(store.clone(), config.channel_capacity);
        let (order_actor, order_generic) =
            crate::order_ledger::new(store.clone(), config.channel_capacity);

        // 2. Start actors with injected context
        let directory = UserDirectory::new(store.clone());
        let resolver: Resolver = Arc::new(directory.clone());
        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(resolver));

        let product_client = ProductClient::new(product_generic);
        let order_client = OrderClient::new(order_generic);
        let engine = StockDepletionEngine::new(
            product_client.clone(),
            order_client.clone(),
            EventChannel::new(store.clone(), config.event_channel.clone()),
            config.depletion_strategy,
        );

        info!(
            capacity = config.channel_capacity,
            event_channel = %config.event_channel,
            strategy = ?config.depletion_strategy,
            "Ledger started"
        );

        Self {
            product_client,
            order_client,
            directory,
            engine,
            store,
            handles: vec![product_handle, order_handle],
        }
    }

    /// Executes one invocation. Only `read` produces a payload.
    #[instrument(skip(self, invocation), fields(function = invocation.name()))]
    pub async fn invoke(&self, invocation: Invocation) -> Result<Option<Vec<u8>>, LedgerError> {
        match invocation {
            Invocation::AddProduct(params) => {
                self.product_client.add_product(params).await?;
            }
            Invocation::AddOrder(params) => {
                self.order_client.create_order(params).await?;
            }
            Invocation::AddUser {
                login,
                password,
                hash,
            } => self.directory.register(&login, &password, &hash)?,
            Invocation::SetProvision {
                reference,
                provision,
            } => {
                self.product_client
                    .set_provision(&reference, provision)
                    .await?;
            }
            Invocation::DepleteStock { lines, order_ref } => {
                self.deplete(&order_ref, &lines).await?;
            }
            Invocation::SetTrackingId {
                tracking_id,
                order_ref,
            } => {
                self.order_client
                    .set_tracking_id(&order_ref, &tracking_id)
                    .await?;
            }
            Invocation::SetState { state, order_ref } => {
                self.order_client.update_state(&order_ref, state).await?;
            }
            Invocation::SetTransport {
                package,
                order_ref,
                carrier_ref,
            } => {
                self.order_client
                    .set_transport(&order_ref, package, &carrier_ref)
                    .await?;
            }
            Invocation::Read { key } => return self.read(&key).map(Some),
        }
        Ok(None)
    }

    /// Parses and executes `function(args)`.
    pub async fn invoke_raw<S: AsRef<str>>(
        &self,
        function: &str,
        args: &[S],
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        let invocation = Invocation::parse(function, args)?;
        self.invoke(invocation).await
    }

    /// Runs the depletion engine and returns its full report.
    pub async fn deplete(
        &self,
        order_ref: &str,
        lines: &[crate::depletion::DepletionLine],
    ) -> Result<DepletionReport, LedgerError> {
        self.engine.deplete(order_ref, lines).await
    }

    /// Raw bytes under any key: counters, records or credentials.
    pub fn read(&self, key: &str) -> Result<Vec<u8>, LedgerError> {
        self.store
            .get(key.as_bytes())?
            .ok_or_else(|| LedgerError::NotFound(format!("key {key:?}")))
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping every client closes the actors' channels; each actor drains its queue and
    /// exits. Fails if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), LedgerError> {
        info!("Shutting down ledger...");

        let LedgerSystem {
            product_client,
            order_client,
            engine,
            handles,
            ..
        } = self;
        drop(engine);
        drop(product_client);
        drop(order_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(LedgerError::Unavailable(format!("actor task failed: {e}")));
            }
        }

        info!("Ledger shutdown complete.");
        Ok(())
    }
}
