//! [`ActorEntity`] implementation for [`Order`].
//!
//! Carts and submitted orders are the same entity. The uniqueness rule keeps at most one
//! open cart per customer, and every action validates before it mutates, so a failed action
//! leaves the stored order exactly as it was.

use super::{OrderAction, OrderError};
use crate::clients::ProductClient;
use crate::model::{
    CustomerId, LineItem, LineItemId, Order, OrderCreate, OrderEvent, OrderId, OrderStatus,
    ProductId, QuantityChange,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    /// Snapshot of the order after the action.
    type ActionResult = Order;
    /// Line items are checked against the catalog on insert.
    type Context = ProductClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.customer))
    }

    /// Two open carts for the same customer may not coexist.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.is_cart() && other.is_cart() && self.customer == other.customer
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::AddItem { customer, product } => {
                self.ensure_open_cart_of(customer)?;
                ensure_listed(ctx, product).await?;
                self.add_unit(product)?;
            }
            OrderAction::ChangeQuantity {
                customer,
                item,
                change,
            } => {
                self.ensure_open_cart_of(customer)?;
                let index = self.position_of(item)?;
                match change {
                    QuantityChange::Increment => {
                        let item = &mut self.items[index];
                        item.quantity = one_more(item.quantity)?;
                    }
                    QuantityChange::Decrement if self.items[index].quantity <= 1 => {
                        self.items.remove(index);
                    }
                    QuantityChange::Decrement => self.items[index].quantity -= 1,
                }
            }
            OrderAction::RemoveItem { customer, item } => {
                self.ensure_open_cart_of(customer)?;
                let index = self.position_of(item)?;
                self.items.remove(index);
            }
            OrderAction::Submit { customer } => {
                self.ensure_open_cart_of(customer)?;
                if self.total_items() == 0 {
                    return Err(OrderError::EmptyCart(self.id));
                }
                self.finalized = true;
                self.status = OrderStatus::Submitted;
                self.submitted_at = Some(Utc::now());
            }
            OrderAction::Apply(event) => self.apply(event)?,
            OrderAction::DetachProduct(product) => {
                for item in self.items.iter_mut().filter(|i| i.product == Some(product)) {
                    item.product = None;
                }
            }
        }
        Ok(self.clone())
    }
}

impl Order {
    fn ensure_open_cart_of(&self, customer: CustomerId) -> Result<(), OrderError> {
        if self.is_open_cart_of(customer) {
            Ok(())
        } else {
            Err(OrderError::NotFound(format!(
                "{customer} has no open cart {}",
                self.id
            )))
        }
    }

    fn position_of(&self, item: LineItemId) -> Result<usize, OrderError> {
        self.items
            .iter()
            .position(|i| i.id == item)
            .ok_or_else(|| OrderError::NotFound(item.to_string()))
    }

    fn add_unit(&mut self, product: ProductId) -> Result<(), OrderError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product == Some(product)) {
            existing.quantity = one_more(existing.quantity)?;
            return Ok(());
        }
        let id = self.next_item_id();
        self.items.push(LineItem {
            id,
            product: Some(product),
            quantity: 1,
            added_at: Utc::now(),
        });
        Ok(())
    }

    fn apply(&mut self, event: OrderEvent) -> Result<(), OrderError> {
        if self.is_cart() {
            return Err(OrderError::NotFound(format!("{} is not an order", self.id)));
        }
        let next = self.status.apply(event)?;
        debug!(order_id = %self.id, from = %self.status, to = %next, "Status change");
        self.status = next;
        Ok(())
    }
}

fn one_more(quantity: u32) -> Result<u32, OrderError> {
    quantity.checked_add(1).ok_or_else(|| {
        OrderError::ConstraintViolation(format!("quantity limit {quantity} reached"))
    })
}

/// Only active catalog entries may enter a cart.
async fn ensure_listed(catalog: &ProductClient, id: ProductId) -> Result<(), OrderError> {
    let product = catalog.find_product(id).await?;
    if product.active {
        Ok(())
    } else {
        Err(OrderError::NotFound(id.to_string()))
    }
}
