//! # Order Actor
//!
//! Owns every cart and every submitted order.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`], the cart operations, checkout and staff events
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! The actor depends on the catalog: adding an item checks that the product exists and is
//! active. The [`ProductClient`](crate::clients::ProductClient) is injected as context when
//! the actor is started, not at construction:
//!
//! ```rust,ignore
//! let (product_actor, product_client) = product_actor::new(32);
//! let (order_actor, order_client) = order_actor::new(32);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(order_actor.run(product_client.clone()));
//! ```
//!
//! ## Atomicity
//!
//! The actor handles one request at a time. Get-or-create of a cart is a single
//! find-or-create request, each action is one step on one order, and archiving is a single
//! bulk request, so none of them can interleave with another write.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
