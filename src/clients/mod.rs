//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Both clients implement [`ActorClient`](actor_framework::ActorClient), which supplies
//! `get`, `delete` and `list` and maps engine errors into the actor's own error enum.

pub mod order_client;
pub mod product_client;

pub use order_client::*;
pub use product_client::*;
