//! # Product Actor
//!
//! The catalog: products with name, description, price, an active flag and an optional
//! image reference.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! The actor has no dependencies, so it runs with `()` as context. Removing a product also
//! has to detach it from existing line items; that step belongs to the order actor and is
//! driven by [`Catalog::delete_product`](crate::services::Catalog::delete_product).
//!
//! ## Usage
//!
//! ```rust
//! use storefront::product_actor;
//! use storefront::model::ProductCreate;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate::new("Ramen", "Pork broth", Decimal::new(1200, 2)))
//!         .await?;
//!     let ramen = client.find_product(id).await?;
//!     assert!(ramen.active);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
