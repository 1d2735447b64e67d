use crate::model::{CustomerId, OrderStatus, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Identifier of a line item. Carries its order, so a line item can be addressed without
/// searching every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemId {
    pub order: OrderId,
    pub seq: u32,
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/item_{}", self.order, self.seq)
    }
}

/// One product-and-quantity row of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: LineItemId,
    /// `None` once the product has been removed from the catalog.
    pub product: Option<ProductId>,
    /// Always at least 1 while the row exists.
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// `price * quantity`, or zero when the product is gone.
    pub fn subtotal(&self, price: Option<Decimal>) -> Decimal {
        match (self.product, price) {
            (Some(_), Some(price)) => price * Decimal::from(self.quantity),
            _ => Decimal::ZERO,
        }
    }
}

/// A customer's cart (`finalized == false`) or, after checkout, their order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
/// Line items are owned by the order and live and die with it.
///
/// See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for the create
/// payload ([`OrderCreate`]) and the actions
/// ([`OrderAction`](crate::order_actor::OrderAction)).
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub customer: CustomerId,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub finalized: bool,
    /// Only meaningful once `finalized`; carts keep the `Pending` default.
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub(crate) next_item: u32,
}

/// Payload for opening a new cart.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: CustomerId,
}

/// The only quantity steps a cart supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityChange {
    Increment,
    Decrement,
}

impl Order {
    /// Creates an empty cart for `customer`.
    pub fn new(id: OrderId, customer: CustomerId) -> Self {
        Self {
            id,
            customer,
            created_at: Utc::now(),
            submitted_at: None,
            finalized: false,
            status: OrderStatus::default(),
            items: Vec::new(),
            next_item: 1,
        }
    }

    pub fn is_cart(&self) -> bool {
        !self.finalized
    }

    pub fn is_open_cart_of(&self, customer: CustomerId) -> bool {
        self.is_cart() && self.customer == customer
    }

    /// Sum of line item quantities.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line item subtotals, priced by `price_of`. Never stored.
    pub fn total_price(&self, price_of: impl Fn(ProductId) -> Option<Decimal>) -> Decimal {
        self.items
            .iter()
            .map(|item| item.subtotal(item.product.and_then(&price_of)))
            .sum()
    }

    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_for(&self, product: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product == Some(product))
    }

    pub fn contains_product(&self, product: ProductId) -> bool {
        self.item_for(product).is_some()
    }

    /// Time the order entered the pipeline, falling back to cart creation.
    pub fn placed_at(&self) -> DateTime<Utc> {
        self.submitted_at.unwrap_or(self.created_at)
    }

    pub(crate) fn next_item_id(&mut self) -> LineItemId {
        let id = LineItemId {
            order: self.id,
            seq: self.next_item,
        };
        self.next_item += 1;
        id
    }
}
