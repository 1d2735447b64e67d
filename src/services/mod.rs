//! # Services
//!
//! The surfaces callers use. Each service is a cheap, cloneable bundle of actor clients:
//!
//! - [`Storefront`] - the customer side: cart, checkout, order history
//! - [`KanbanBoard`] - the staff side: status transitions and the live board
//! - [`Catalog`] - product lookups and the restaurant's product management
//! - [`Dashboard`] - order counts and best sellers
//!
//! Services never hold state of their own. They forward to the actors and turn the returned
//! snapshots into views priced against the current catalog.

pub mod catalog;
pub mod dashboard;
pub mod kanban;
pub mod storefront;

pub use catalog::*;
pub use dashboard::*;
pub use kanban::*;
pub use storefront::*;

use crate::clients::ProductClient;
use crate::model::{index_products, Order, OrderView, ProductIndex};
use crate::product_actor::ProductError;
use std::collections::HashSet;

/// Catalog entries for the products referenced by `orders`, and nothing else.
async fn index_for(
    products: &ProductClient,
    orders: &[Order],
) -> Result<ProductIndex, ProductError> {
    let ids: HashSet<_> = orders
        .iter()
        .flat_map(|o| &o.items)
        .filter_map(|item| item.product)
        .collect();
    Ok(index_products(products.products_by_id(ids).await?))
}

async fn render(
    products: &ProductClient,
    orders: &[Order],
) -> Result<Vec<OrderView>, ProductError> {
    let index = index_for(products, orders).await?;
    Ok(orders.iter().map(|o| OrderView::build(o, &index)).collect())
}

async fn render_one(products: &ProductClient, order: &Order) -> Result<OrderView, ProductError> {
    let index = index_for(products, std::slice::from_ref(order)).await?;
    Ok(OrderView::build(order, &index))
}
