//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`CollectionClient<T>`] whose requests are answered from a
//! queue of expectations instead of a store. It lets you test code that *uses* clients (domain
//! client wrappers, the depletion engine) without spawning any actors.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **State** | No real state (expectations) | Real collection over a store |
//! | **Use Case** | Orchestration logic *around* the client | Testing the entity or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use ledger_framework::mock::MockClient;
//! use ledger_framework::{CollectionKind, FrameworkError, Indexed, LedgerEntity, Referenced};
//! use async_trait::async_trait;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Tag { r#ref: String }
//! #[derive(Debug)] enum TagAction {}
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! impl Referenced for Tag { fn reference(&self) -> &str { &self.r#ref } }
//!
//! #[async_trait]
//! impl LedgerEntity for Tag {
//!     const KIND: CollectionKind = CollectionKind::new("tag", "tagsLength");
//!     type Create = (); type Update = (); type Action = TagAction;
//!     type ActionResult = (); type Context = (); type Error = TagError;
//!     async fn from_create_params(_: (), _: &()) -> Result<Self, TagError> { Err(TagError) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), TagError> { Ok(()) }
//!     async fn handle_action(&mut self, _: TagAction, _: &()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Tag>::new();
//!     mock.expect_get("A").return_ok(Indexed { index: 0, record: Tag { r#ref: "A".into() } });
//!     mock.expect_get("B").return_err(FrameworkError::NotFound("B".into()));
//!
//!     let client = mock.client();
//!     assert_eq!(client.get("A").await.unwrap().index, 0);
//!     assert!(client.get("B").await.is_err());
//!
//!     mock.verify();
//! }
//! ```

use crate::{CollectionClient, CollectionRequest, FrameworkError, Indexed, LedgerEntity};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Represents an expected request to the mock client.
enum Expectation<T: LedgerEntity> {
    Get {
        reference: String,
        response: Result<Indexed<T>, FrameworkError>,
    },
    Create {
        response: Result<u64, FrameworkError>,
    },
    Update {
        reference: String,
        response: Result<T, FrameworkError>,
    },
    Action {
        reference: String,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: LedgerEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Get { reference, .. } => format!("Get({reference})"),
            Expectation::Create { .. } => "Create".to_string(),
            Expectation::Update { reference, .. } => format!("Update({reference})"),
            Expectation::Action { reference, .. } => format!("Action({reference})"),
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were declared. A request that does not match
/// the next expectation (wrong kind or wrong reference) is answered with
/// [`FrameworkError::NotFound`] and recorded; [`MockClient::verify`] then panics.
pub struct MockClient<T: LedgerEntity> {
    client: CollectionClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: LedgerEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LedgerEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CollectionRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap_or_else(PoisonError::into_inner).pop_front();
                match (request, expectation) {
                    (
                        CollectionRequest::Get {
                            reference,
                            respond_to,
                        },
                        Some(Expectation::Get {
                            reference: expected,
                            response,
                        }),
                    ) if reference == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Update {
                            reference,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Update {
                            reference: expected,
                            response,
                        }),
                    ) if reference == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        CollectionRequest::Action {
                            reference,
                            respond_to,
                            ..
                        },
                        Some(Expectation::Action {
                            reference: expected,
                            response,
                        }),
                    ) if reference == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let expected = expectation
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "nothing".to_string());
                        let message = format!("unexpected {request:?}, expected {expected}");
                        seen.lock().unwrap_or_else(PoisonError::into_inner).push(message.clone());
                        reject(request, message);
                    }
                }
            }
        });

        Self {
            client: CollectionClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> CollectionClient<T> {
        self.client.clone()
    }

    /// Expects a lookup by reference.
    pub fn expect_get(&mut self, reference: impl Into<String>) -> ExpectationBuilder<T, Indexed<T>> {
        self.builder(reference.into(), |reference, response| Expectation::Get {
            reference,
            response,
        })
    }

    /// Expects a create request.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, u64> {
        self.builder(String::new(), |_, response| Expectation::Create { response })
    }

    /// Expects an update of the record carrying `reference`.
    pub fn expect_update(&mut self, reference: impl Into<String>) -> ExpectationBuilder<T, T> {
        self.builder(reference.into(), |reference, response| Expectation::Update {
            reference,
            response,
        })
    }

    /// Expects an action on the record carrying `reference`.
    pub fn expect_action(
        &mut self,
        reference: impl Into<String>,
    ) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(reference.into(), |reference, response| Expectation::Action {
            reference,
            response,
        })
    }

    /// Verifies that all expectations were met in order.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap_or_else(PoisonError::into_inner);
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", *mismatches);
        }
        let exps = self.expectations.lock().unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<R>(
        &self,
        reference: String,
        build: fn(String, Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            reference,
            build,
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder that queues one expectation with its canned response.
pub struct ExpectationBuilder<T: LedgerEntity, R> {
    reference: String,
    build: fn(String, Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: LedgerEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(self.reference, response);
        self.expectations.lock().unwrap_or_else(PoisonError::into_inner).push_back(expectation);
    }
}

fn reject<T: LedgerEntity>(request: CollectionRequest<T>, message: String) {
    let error = || FrameworkError::NotFound(message.clone());
    match request {
        CollectionRequest::Create { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        CollectionRequest::Get { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        CollectionRequest::GetAt { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        CollectionRequest::Length { respond_to } => {
            let _ = respond_to.send(Err(error()));
        }
        CollectionRequest::Update { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
        CollectionRequest::Action { respond_to, .. } => {
            let _ = respond_to.send(Err(error()));
        }
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Use this when a test needs to inspect the request payload itself (e.g. the quantity inside
/// an action) before answering it through the returned responder.
pub fn create_mock_client<T: LedgerEntity>(
    buffer_size: usize,
) -> (CollectionClient<T>, mpsc::Receiver<CollectionRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: LedgerEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(T::Create, crate::Response<u64>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: LedgerEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(String, T::Update, crate::Response<T>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Update {
            reference,
            update,
            respond_to,
        }) => Some((reference, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: LedgerEntity>(
    receiver: &mut mpsc::Receiver<CollectionRequest<T>>,
) -> Option<(String, T::Action, crate::Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Action {
            reference,
            action,
            respond_to,
        }) => Some((reference, action, respond_to)),
        _ => None,
    }
}
