//! Order counts and best sellers for the restaurant dashboard.

use super::index_for;
use crate::clients::{OrderClient, ProductClient};
use crate::model::{Order, ProductId, ProductIndex};
use crate::order_actor::OrderError;
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::instrument;

/// Number of best sellers reported.
pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub product: ProductId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub orders_today: usize,
    pub orders_this_month: usize,
    pub orders_this_year: usize,
    pub top_products: Vec<TopProduct>,
}

impl DashboardStats {
    /// Counts are by order creation date relative to `now`. Best sellers sum quantities over
    /// every finalized order; tombstoned line items are ignored.
    pub fn compute(orders: &[Order], products: &ProductIndex, now: DateTime<Utc>) -> Self {
        let finalized: Vec<&Order> = orders.iter().filter(|o| o.finalized).collect();
        let this_year = |o: &&&Order| o.created_at.year() == now.year();
        let this_month = |o: &&&Order| this_year(o) && o.created_at.month() == now.month();

        let mut sold: HashMap<ProductId, u32> = HashMap::new();
        for item in finalized.iter().flat_map(|o| &o.items) {
            if let Some(product) = item.product {
                *sold.entry(product).or_default() += item.quantity;
            }
        }
        let mut top_products: Vec<TopProduct> = sold
            .into_iter()
            .filter_map(|(product, quantity)| {
                let name = products.get(&product)?.name.clone();
                Some(TopProduct {
                    product,
                    name,
                    quantity,
                })
            })
            .collect();
        top_products.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.name.cmp(&b.name)));
        top_products.truncate(TOP_PRODUCTS);

        Self {
            orders_today: finalized
                .iter()
                .filter(|o| o.created_at.date_naive() == now.date_naive())
                .count(),
            orders_this_month: finalized.iter().filter(this_month).count(),
            orders_this_year: finalized.iter().filter(this_year).count(),
            top_products,
        }
    }
}

#[derive(Clone)]
pub struct Dashboard {
    orders: OrderClient,
    products: ProductClient,
}

impl Dashboard {
    pub fn new(orders: OrderClient, products: ProductClient) -> Self {
        Self { orders, products }
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats, OrderError> {
        let orders = self.orders.finalized_orders().await?;
        let index = index_for(&self.products, &orders).await?;
        Ok(DashboardStats::compute(&orders, &index, now))
    }
}
