//! # Storefront
//!
//! The core of a food-ordering storefront with a kitchen console: customers build a cart and
//! check out, staff move orders through a fulfilment pipeline on a kanban board.
//!
//! Built on resource-oriented actors (see [`actor_framework`]): every resource type is owned
//! by one Tokio task that handles requests one at a time. That gives the storage guarantees
//! the ordering flow needs without locks:
//!
//! - at most one open cart per customer, even under concurrent first visits;
//! - at most one line item per product in a cart, with quantity changes applied in place;
//! - status changes checked against a closed state machine;
//! - board refreshes that always include the caller's own last transition.
//!
//! ## Module Tour
//!
//! ### [`model`]
//! Plain data: [`Product`](model::Product), [`Order`](model::Order) and its line items,
//! the [`OrderStatus`](model::OrderStatus) state machine, and the serializable views.
//!
//! ### [`product_actor`], [`order_actor`]
//! [`ActorEntity`](actor_framework::ActorEntity) implementations and error enums. The order
//! actor consults the catalog through an injected [`ProductClient`](clients::ProductClient).
//!
//! ### [`clients`]
//! Typed wrappers over the generic resource client, one request per method.
//!
//! ### [`services`]
//! What callers use: [`Storefront`](services::Storefront) for customers,
//! [`KanbanBoard`](services::KanbanBoard) for staff, [`Catalog`](services::Catalog) and
//! [`Dashboard`](services::Dashboard) for the restaurant.
//!
//! ### [`lifecycle`]
//! [`StoreSystem`](lifecycle::StoreSystem) starts and wires the actors;
//! [`SystemConfig`](lifecycle::SystemConfig) and [`setup_tracing`](lifecycle::setup_tracing)
//! cover configuration and logs.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
