//! # Actor Framework
//!
//! Building blocks for type-safe, resource-oriented actors on top of Tokio.
//!
//! Every resource type (a product, an order, ...) gets exactly one [`ResourceActor`]. The
//! actor owns the in-memory store for that type and processes [`ResourceRequest`]s one at a
//! time, so every request is a single atomic read-modify-write against the store. Callers
//! talk to the actor through a cloneable [`ResourceClient`].
//!
//! ## Requests
//!
//! Besides the classic CRUD set (Create, Get, Update, Delete) and per-entity custom
//! `Action`s, the engine understands four store-level requests:
//!
//! - **List**: a read-only snapshot of every entity matching a [`Predicate`].
//! - **FindOrCreate**: returns the first entity matching a predicate, or creates one from
//!   the supplied params. Because the actor is sequential, two concurrent callers can never
//!   both observe "missing" and both create.
//! - **FindOrCreateAction**: find-or-create followed by a custom action on the result, so a
//!   caller never acts on an entity that changed state between two requests.
//! - **BulkAction**: applies one (cloned) action to every matching entity in one request.
//!   Either every match is updated or, if one action fails, none is.
//!
//! ## Uniqueness
//!
//! [`ActorEntity::conflicts_with`] plays the role of a unique constraint. Before a new entity
//! is inserted the actor checks it against every stored entity; a conflict fails the create
//! with [`FrameworkError::Conflict`] instead of storing a duplicate.
//!
//! ## Context Injection
//!
//! Dependencies (usually clients of other actors) are handed to [`ResourceActor::run`] rather
//! than to the constructor, and are passed to every entity hook:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Ticket { id: u32, seat: String }
//! #[derive(Debug)] struct TicketCreate { seat: String }
//! #[derive(Debug)] struct TicketUpdate;
//! #[derive(Debug, Clone)] enum TicketAction {}
//! #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
//!
//! #[async_trait]
//! impl ActorEntity for Ticket {
//!     type Id = u32; type Create = TicketCreate; type Update = TicketUpdate;
//!     type Action = TicketAction; type ActionResult = (); type Context = (); type Error = TicketError;
//!     fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, seat: params.seat })
//!     }
//!     fn conflicts_with(&self, other: &Self) -> bool { self.seat == other.seat }
//!     async fn on_update(&mut self, _: TicketUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Ticket>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(TicketCreate { seat: "A1".into() }).await.unwrap();
//!     // Same seat again violates the uniqueness rule.
//!     assert!(client.create(TicketCreate { seat: "A1".into() }).await.is_err());
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, and the channel
//! helpers in [`mock`] let a test play the actor by hand.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Predicate, ResourceRequest, Response};
