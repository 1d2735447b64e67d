use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Predicate, ResourceRequest};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns the store for one entity type.
///
/// This is the "server" half: it holds the receiver end of the mailbox and the `store`.
/// Requests are processed strictly one after another, so the store needs no `Mutex` and
/// every request observes the effects of all requests answered before it.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a Tokio task.
///
/// ```rust
/// use actor_framework::{ActorEntity, Predicate, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, owner: String, hits: u32 }
/// #[derive(Debug)] struct CounterCreate { owner: String }
/// #[derive(Debug)] struct CounterUpdate;
/// #[derive(Debug, Clone)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32; type Create = CounterCreate; type Update = CounterUpdate;
///     type Action = CounterAction; type ActionResult = u32; type Context = (); type Error = CounterError;
///     fn from_create_params(id: u32, p: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, owner: p.owner, hits: 0 })
///     }
///     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let mine = || Predicate::new(|c: &Counter| c.owner == "ana");
///     let first = client.find_or_create(mine(), CounterCreate { owner: "ana".into() }).await.unwrap();
///     let again = client.find_or_create(mine(), CounterCreate { owner: "ana".into() }).await.unwrap();
///     assert_eq!(first.id, again.id);
///
///     let hits = client.perform_action(first.id, CounterAction::Hit).await.unwrap();
///     assert_eq!(hits, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next id from the internal `u32` counter, `from_create_params`, the
///   uniqueness check against the store, `on_create`, insert.
/// * **Get / List**: clones of the matching entities.
/// * **Update / Action**: hook on the stored entity, reply with the new state or result.
/// * **Delete**: `on_delete`, then removal.
/// * **FindOrCreate**: first match, or the full Create path.
/// * **FindOrCreateAction**: FindOrCreate, then Action on the result, in one turn.
/// * **BulkAction**: `handle_action` on copies of every match; committed only if all succeed.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait for room.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // e.g. "Order" instead of "storefront::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            entity_type,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// `context` is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await.map(|item| item.0);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(item.clone()));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter.matches(item))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::FindOrCreate {
                    matches,
                    params,
                    respond_to,
                } => {
                    if let Some(existing) = self.store.values().find(|item| matches.matches(item)) {
                        debug!(entity_type, "FindOrCreate hit");
                        let _ = respond_to.send(Ok(existing.clone()));
                        continue;
                    }
                    debug!(entity_type, ?params, "FindOrCreate miss");
                    let result = self.create(params, &context).await.map(|item| item.1);
                    let _ = respond_to.send(result);
                }
                ResourceRequest::FindOrCreateAction {
                    matches,
                    params,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, ?params, ?action, "FindOrCreateAction");
                    let result = self
                        .find_or_create_action(&matches, params, action, &context)
                        .await;
                    let _ = respond_to.send(result);
                }
                ResourceRequest::BulkAction {
                    filter,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, ?action, "BulkAction");
                    let result = self.bulk_action(&filter, action, &context).await;
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<(T::Id, T), FrameworkError> {
        let entity_type = self.entity_type;
        let id = T::Id::from(self.next_id);

        let mut item = T::from_create_params(id.clone(), params).map_err(|e| {
            warn!(entity_type, error = %e, "Create failed");
            FrameworkError::EntityError(Box::new(e))
        })?;

        if let Some(existing) = self.store.iter().find_map(|(other_id, other)| {
            item.conflicts_with(other).then(|| other_id.clone())
        }) {
            warn!(entity_type, %existing, "Create rejected by uniqueness rule");
            return Err(FrameworkError::Conflict(format!(
                "{entity_type} conflicts with {existing}"
            )));
        }

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            return Err(FrameworkError::EntityError(Box::new(e)));
        }

        // Ids are only consumed by successful creates.
        self.next_id += 1;
        self.store.insert(id.clone(), item.clone());
        info!(entity_type, %id, size = self.store.len(), "Created");
        Ok((id, item))
    }

    async fn find_or_create_action(
        &mut self,
        matches: &Predicate<T>,
        params: T::Create,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let entity_type = self.entity_type;
        let existing = self
            .store
            .iter()
            .find(|(_, item)| matches.matches(item))
            .map(|(id, _)| id.clone());
        let id = match existing {
            Some(id) => id,
            None => self.create(params, context).await?.0,
        };
        let Some(item) = self.store.get_mut(&id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(_) => info!(entity_type, %id, "Action ok"),
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        result
    }

    /// Runs the action on copies of every match and commits them only if all succeed.
    async fn bulk_action(
        &mut self,
        filter: &Predicate<T>,
        action: T::Action,
        context: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        let entity_type = self.entity_type;
        let mut staged = Vec::new();
        let mut results = Vec::new();
        for (id, item) in self.store.iter() {
            if !filter.matches(item) {
                continue;
            }
            let mut copy = item.clone();
            match copy.handle_action(action.clone(), context).await {
                Ok(result) => {
                    results.push(result);
                    staged.push((id.clone(), copy));
                }
                Err(e) => {
                    warn!(entity_type, %id, error = %e, "Bulk action failed, nothing applied");
                    return Err(FrameworkError::EntityError(Box::new(e)));
                }
            }
        }
        self.store.extend(staged);
        info!(entity_type, applied = results.len(), "Bulk action ok");
        Ok(results)
    }
}
