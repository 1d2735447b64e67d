//! Error types for the Order actor.

use crate::model::{IllegalTransition, OrderEvent, OrderId, OrderStatus};
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during cart and order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order, cart, line item or product does not exist, or is not the caller's.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Checkout of a cart that holds no items. The cart stays open.
    #[error("Cart {0} is empty")]
    EmptyCart(OrderId),

    /// A write would have produced a second open cart for one customer, or pushed a
    /// quantity past its limit.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// The event has no edge out of the order's current status.
    #[error("Cannot {event} an order that is {from}")]
    InvalidTransition { from: OrderStatus, event: OrderEvent },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<IllegalTransition> for OrderError {
    fn from(e: IllegalTransition) -> Self {
        OrderError::InvalidTransition {
            from: e.from,
            event: e.event,
        }
    }
}

/// Catalog failures seen while serving an order request.
impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
