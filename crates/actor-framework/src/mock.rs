//! # Mock Framework & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of a store. Use it to unit test code that sits *around* a
//! client (error mapping, orchestration across several actors) without spawning actors.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real store |
//! | **Error injection** | `return_err(...)` | needs a specific store state |
//! | **Use case** | client wrappers, service logic | entity logic, full flows |
//!
//! ## Scripted answers
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Dish { id: u32, name: String }
//! #[derive(Debug)] struct DishCreate;
//! #[derive(Debug)] struct DishUpdate;
//! #[derive(Debug, Clone)] enum DishAction {}
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32; type Create = DishCreate; type Update = DishUpdate;
//!     type Action = DishAction; type ActionResult = (); type Context = (); type Error = DishError;
//!     fn from_create_params(id: u32, _: DishCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: String::new() })
//!     }
//!     async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: DishAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Dish>::new();
//!     mock.expect_list().return_ok(vec![Dish { id: 1, name: "Soup".into() }]);
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let all = client.list(actor_framework::Predicate::all()).await.unwrap();
//!     assert_eq!(all[0].name, "Soup");
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Playing the actor by hand
//!
//! [`create_mock_client`] returns the client together with the raw receiver. The
//! `expect_*` functions pop the next request, let the test assert on its payload, and hand
//! back the responder.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// One scripted answer, consumed in FIFO order.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
    FindOrCreate(Result<T, FrameworkError>),
    FindOrCreateAction(Result<T::ActionResult, FrameworkError>),
    BulkAction(Result<Vec<T::ActionResult>, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "Get",
            Expectation::Create(_) => "Create",
            Expectation::Update(_) => "Update",
            Expectation::Delete(_) => "Delete",
            Expectation::Action(_) => "Action",
            Expectation::List(_) => "List",
            Expectation::FindOrCreate(_) => "FindOrCreate",
            Expectation::FindOrCreateAction(_) => "FindOrCreateAction",
            Expectation::BulkAction(_) => "BulkAction",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were queued; anything else panics
/// the mock task, which surfaces in the test as `ActorDropped`.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                answer(request, next);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation. The id is documentation only; answers are FIFO.
    pub fn expect_get(&mut self, _id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Expectation::Get)
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(Expectation::Create)
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, _id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Update)
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, _id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Expectation::Delete)
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, _id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::Action)
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    /// Expects a `find_or_create` operation.
    pub fn expect_find_or_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::FindOrCreate)
    }

    /// Expects a `find_or_create_action` operation.
    pub fn expect_find_or_create_action(&mut self) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Expectation::FindOrCreateAction)
    }

    /// Expects a `perform_bulk_action` operation.
    pub fn expect_bulk_action(&mut self) -> ExpectationBuilder<T, Vec<T::ActionResult>> {
        self.builder(Expectation::BulkAction)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let pending: Vec<&str> = exps.iter().map(Expectation::kind).collect();
            panic!("Not all expectations were met. Remaining: {:?}", pending);
        }
    }

    fn builder<R>(
        &self,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap,
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back((self.wrap)(response));
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Delete { respond_to, .. }, Some(Expectation::Delete(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::List { respond_to, .. }, Some(Expectation::List(r))) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::FindOrCreate { respond_to, .. }, Some(Expectation::FindOrCreate(r))) => {
            let _ = respond_to.send(r);
        }
        (
            ResourceRequest::FindOrCreateAction { respond_to, .. },
            Some(Expectation::FindOrCreateAction(r)),
        ) => {
            let _ = respond_to.send(r);
        }
        (ResourceRequest::BulkAction { respond_to, .. }, Some(Expectation::BulkAction(r))) => {
            let _ = respond_to.send(r);
        }
        (_, Some(other)) => panic!("Unexpected request, next expectation is {}", other.kind()),
        (_, None) => panic!("Unexpected request, no expectations left"),
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and the raw receiver its requests land on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Next request, if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a FindOrCreate. The predicate is returned so the test can probe it.
pub async fn expect_find_or_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(crate::Predicate<T>, T::Create, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindOrCreate {
            matches,
            params,
            respond_to,
        }) => Some((matches, params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a FindOrCreateAction.
pub async fn expect_find_or_create_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(crate::Predicate<T>, T::Create, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindOrCreateAction {
            matches,
            params,
            action,
            respond_to,
        }) => Some((matches, params, action, respond_to)),
        _ => None,
    }
}

/// Next request, if it is a List.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(crate::Predicate<T>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Predicate;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct DishCreate {
        name: String,
    }

    #[derive(Debug)]
    struct DishUpdate;

    #[derive(Debug, Clone)]
    enum DishAction {
        Rename(String),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Dish error")]
    struct DishError;

    #[async_trait]
    impl ActorEntity for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = DishUpdate;
        type Action = DishAction;
        type ActionResult = String;
        type Context = ();
        type Error = DishError;

        fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: DishUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: DishAction, _: &()) -> Result<String, Self::Error> {
            let DishAction::Rename(name) = action;
            self.name = name;
            Ok(self.name.clone())
        }
    }

    fn dish(id: u32, name: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_channel_helpers_expose_payloads() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let task = tokio::spawn(async move {
            client
                .create(DishCreate {
                    name: "Ramen".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Ramen");
        responder.send(Ok(1)).unwrap();

        assert!(matches!(task.await.unwrap(), Ok(1)));
    }

    #[tokio::test]
    async fn test_find_or_create_helper_returns_predicate() {
        let (client, mut receiver) = create_mock_client::<Dish>(10);

        let task = tokio::spawn(async move {
            let only_soup = Predicate::new(|d: &Dish| d.name == "Soup");
            client
                .find_or_create(only_soup, DishCreate { name: "Soup".into() })
                .await
        });

        let (matches, params, responder) = expect_find_or_create(&mut receiver)
            .await
            .expect("Expected FindOrCreate request");
        assert!(matches.matches(&dish(9, "Soup")));
        assert!(!matches.matches(&dish(9, "Salad")));
        assert_eq!(params.name, "Soup");
        responder.send(Ok(dish(3, "Soup"))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_mock_client_answers_in_order() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_create().return_ok(1);
        mock.expect_action(1).return_ok("Pho".to_string());
        mock.expect_bulk_action().return_ok(vec!["Pho".to_string()]);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();
        let id = client.create(DishCreate { name: "Soup".into() }).await.unwrap();
        assert_eq!(id, 1);

        let renamed = client
            .perform_action(id, DishAction::Rename("Pho".into()))
            .await
            .unwrap();
        assert_eq!(renamed, "Pho");

        let all = client
            .perform_bulk_action(Predicate::all(), DishAction::Rename("Pho".into()))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);

        assert!(matches!(
            client.delete(id).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unused_expectations() {
        let mut mock = MockClient::<Dish>::new();
        mock.expect_list().return_ok(vec![]);
        mock.verify();
    }
}
