//! # Generic Messages
//!
//! The request vocabulary shared by [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A boxed filter evaluated inside the actor against stored entities.
pub struct Predicate<T>(Box<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Matches every entity.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// Request sent to a [`ResourceActor`](crate::ResourceActor).
///
/// The CRUD variants (`Create`, `Get`, `Update`, `Delete`) and `Action` address a single
/// entity. `List`, `FindOrCreate`, `FindOrCreateAction` and `BulkAction` address the whole
/// store and are still handled as one atomic step, which is what makes them safe under
/// concurrent callers.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    List {
        filter: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
    FindOrCreate {
        matches: Predicate<T>,
        params: T::Create,
        respond_to: Response<T>,
    },
    /// `FindOrCreate` followed by `Action` on the result, with no request in between.
    FindOrCreateAction {
        matches: Predicate<T>,
        params: T::Create,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    /// Applied to all matches or to none: if any match fails, the store is left untouched.
    BulkAction {
        filter: Predicate<T>,
        action: T::Action,
        respond_to: Response<Vec<T::ActionResult>>,
    },
}
