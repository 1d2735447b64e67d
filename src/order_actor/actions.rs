//! Custom actions for the Order actor.
//!
//! Each action runs inside the actor as one atomic step against a single order, so
//! quantity arithmetic and status changes are never read-modify-write in the caller.
//!
//! See [`impl ActorEntity for Order`](crate::model::Order#impl-ActorEntity-for-Order) for the
//! implementation.

use crate::model::{CustomerId, LineItemId, OrderEvent, ProductId, QuantityChange};

/// Customer actions carry the caller so the order can check ownership itself.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Adds one unit of `product`, merging with an existing line item.
    ///
    /// # Errors
    /// `NotFound` if the product is missing or inactive.
    AddItem {
        customer: CustomerId,
        product: ProductId,
    },
    /// Steps a line item by exactly one unit; reaching zero removes the row.
    ChangeQuantity {
        customer: CustomerId,
        item: LineItemId,
        change: QuantityChange,
    },
    RemoveItem {
        customer: CustomerId,
        item: LineItemId,
    },
    /// Checkout: the cart becomes a submitted order.
    Submit { customer: CustomerId },
    /// Staff event, checked against the status table.
    Apply(OrderEvent),
    /// Turns every line item referencing the product into a tombstone.
    DetachProduct(ProductId),
}
