//! Read models handed to presentation layers.
//!
//! Views are rebuilt on every read from an [`Order`] snapshot plus the current catalog, so
//! totals always reflect current prices and deleted products show up as tombstones.

use crate::model::{
    CustomerId, LineItem, LineItemId, Order, OrderId, OrderStatus, Product, ProductId,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Catalog entries keyed by id, as needed to price a set of orders.
pub type ProductIndex = HashMap<ProductId, Product>;

pub fn index_products(products: impl IntoIterator<Item = Product>) -> ProductIndex {
    products.into_iter().map(|p| (p.id, p)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub image: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemView {
    pub id: LineItemId,
    /// `None` for a tombstone.
    pub product: Option<ProductSummary>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub added_at: DateTime<Utc>,
}

impl LineItemView {
    fn build(item: &LineItem, products: &ProductIndex) -> Self {
        let product = item.product.and_then(|id| products.get(&id));
        let unit_price = product.map(|p| p.price);
        Self {
            id: item.id,
            product: product.map(ProductSummary::from),
            quantity: item.quantity,
            unit_price: unit_price.unwrap_or(Decimal::ZERO),
            subtotal: item.subtotal(unit_price),
            added_at: item.added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub customer: CustomerId,
    pub created_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub finalized: bool,
    pub status: OrderStatus,
    pub items: Vec<LineItemView>,
    pub total_items: u32,
    pub total_price: Decimal,
}

impl OrderView {
    pub fn build(order: &Order, products: &ProductIndex) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| LineItemView::build(item, products))
            .collect();
        Self {
            id: order.id,
            customer: order.customer,
            created_at: order.created_at,
            submitted_at: order.submitted_at,
            finalized: order.finalized,
            status: order.status,
            items,
            total_items: order.total_items(),
            total_price: order.total_price(|id| products.get(&id).map(|p| p.price)),
        }
    }

    /// Line item view for `product`, if the order holds one.
    pub fn item_for(&self, product: ProductId) -> Option<&LineItemView> {
        self.items
            .iter()
            .find(|item| item.product.as_ref().map(|p| p.id) == Some(product))
    }
}
