//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! ## Wiring
//!
//! Actors are constructed without their dependencies and receive them when started, via
//! `run(context)`:
//!
//! - the Product actor has none (`Context = ()`);
//! - the Order actor gets a `ProductClient` to check products on add-item.
//!
//! ## Shutdown
//!
//! 1. Drop all clients, closing the sending side of each mailbox.
//! 2. Each actor sees `recv()` return `None`, having answered everything already queued.
//! 3. Await the actor tasks.
//!
//! The graph is acyclic (orders depend on products, never the reverse), so dropping the
//! clients is enough to stop everything.
//!
//! ## Configuration and tracing
//!
//! [`SystemConfig`] reads mailbox size and the kanban delivered window from the
//! environment. [`setup_tracing`] installs the log subscriber; see the [`tracing`] module.

pub mod config;
pub mod store_system;
pub mod tracing;

pub use config::*;
pub use store_system::*;
pub use self::tracing::*;
