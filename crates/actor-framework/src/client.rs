//! # Generic Client
//!
//! The sending half of a resource actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Predicate, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe, cloneable handle to a [`ResourceActor`](crate::ResourceActor).
///
/// Each method sends one request and awaits its one-shot reply. Holding only a sender,
/// clones are cheap and may be spread across tasks; the actor stops once all of them are
/// dropped.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Snapshot of every stored entity accepted by `filter`. Order is unspecified.
    pub async fn list(&self, filter: Predicate<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    /// Returns the first entity accepted by `matches`, creating one from `params` if there
    /// is none. Lookup and creation happen in the same actor turn.
    pub async fn find_or_create(
        &self,
        matches: Predicate<T>,
        params: T::Create,
    ) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::FindOrCreate {
            matches,
            params,
            respond_to,
        })
        .await
    }

    /// Runs `action` on the first entity accepted by `matches`, creating it from `params` if
    /// there is none. Lookup, creation and action happen in the same actor turn, so no other
    /// request can change which entity the action lands on.
    pub async fn find_or_create_action(
        &self,
        matches: Predicate<T>,
        params: T::Create,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::FindOrCreateAction {
            matches,
            params,
            action,
            respond_to,
        })
        .await
    }

    /// Applies `action` to every entity accepted by `filter` in a single actor turn. A
    /// failure on any of them discards the whole batch.
    pub async fn perform_bulk_action(
        &self,
        filter: Predicate<T>,
        action: T::Action,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::BulkAction {
            filter,
            action,
            respond_to,
        })
        .await
    }
}
