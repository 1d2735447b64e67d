//! # Order Status State Machine
//!
//! A submitted order moves through a closed set of states. Every staff event goes through
//! [`OrderStatus::apply`], which consults the table below and rejects edges that are not in it.
//!
//! | From | Event | To |
//! |---|---|---|
//! | submitted | accept | preparing |
//! | submitted, preparing | decline | declined |
//! | preparing | dispatch | out_for_delivery |
//! | out_for_delivery | deliver | delivered |
//! | delivered | archive | archived |
//!
//! Entry into `submitted` is the customer's checkout, handled by the order aggregate, not an
//! event. Applying an event whose target is already the current state is a no-op.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placeholder while the order is still a cart.
    #[default]
    Pending,
    Submitted,
    Preparing,
    OutForDelivery,
    Delivered,
    Declined,
    Archived,
}

/// Staff events that drive the fulfilment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEvent {
    Accept,
    Decline,
    Dispatch,
    Deliver,
    Archive,
}

/// An event that has no edge out of the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {event} an order that is {from}")]
pub struct IllegalTransition {
    pub from: OrderStatus,
    pub event: OrderEvent,
}

impl OrderStatus {
    /// Statuses shown as kanban columns, in board order.
    pub const BOARD: [OrderStatus; 4] = [
        OrderStatus::Submitted,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    /// No staff event leads out of a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Declined | OrderStatus::Archived)
    }

    /// Returns the status after `event`, or the illegal edge that was attempted.
    pub fn apply(self, event: OrderEvent) -> Result<OrderStatus, IllegalTransition> {
        use OrderEvent::*;
        use OrderStatus::*;

        let target = event.target();
        if self == target {
            return Ok(self);
        }
        match (self, event) {
            (Submitted, Accept)
            | (Submitted | Preparing, Decline)
            | (Preparing, Dispatch)
            | (OutForDelivery, Deliver)
            | (Delivered, Archive) => Ok(target),
            (from, event) => Err(IllegalTransition { from, event }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Submitted => "submitted",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Declined => "declined",
            OrderStatus::Archived => "archived",
        }
    }
}

impl OrderEvent {
    /// The status this event writes.
    pub fn target(self) -> OrderStatus {
        match self {
            OrderEvent::Accept => OrderStatus::Preparing,
            OrderEvent::Decline => OrderStatus::Declined,
            OrderEvent::Dispatch => OrderStatus::OutForDelivery,
            OrderEvent::Deliver => OrderStatus::Delivered,
            OrderEvent::Archive => OrderStatus::Archived,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for OrderEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderEvent::Accept => "accept",
            OrderEvent::Decline => "decline",
            OrderEvent::Dispatch => "dispatch",
            OrderEvent::Deliver => "deliver",
            OrderEvent::Archive => "archive",
        };
        f.write_str(name)
    }
}
