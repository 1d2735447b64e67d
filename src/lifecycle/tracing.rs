//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module targets are hidden; actor logs carry an `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # lifecycle, creates, transitions
//! RUST_LOG=debug cargo run    # every request with its payload
//! ```
//!
//! A checkout followed by an accept looks like this at `info`:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Actor started entity_type="Order"
//! INFO Created entity_type="Order" id=order_1 size=1
//! INFO Action ok entity_type="Order" id=order_1
//! INFO submit_cart:submit: Order submitted order_id=order_1
//! INFO transition: Order moved order_id=order_1 status=preparing
//! ```
//!
//! Client and service methods are `#[instrument]`ed, so caller-side lines carry the span of
//! the call. Actor lines are logged from the actor's own task and carry the entity fields
//! instead.

/// Installs the global subscriber. Call once, at program start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
