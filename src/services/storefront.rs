//! Customer-facing cart and checkout.
//!
//! Every call takes the authenticated [`CustomerId`] explicitly; there is no ambient
//! session. All results are [`OrderView`]s priced against the current catalog.

use super::{render, render_one};
use crate::clients::{OrderClient, ProductClient};
use crate::model::{CustomerId, LineItemId, OrderId, OrderView, ProductId, QuantityChange};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use tracing::instrument;

#[derive(Clone)]
pub struct Storefront {
    orders: OrderClient,
    products: ProductClient,
}

impl Storefront {
    pub fn new(orders: OrderClient, products: ProductClient) -> Self {
        Self { orders, products }
    }

    /// The customer's open cart, created on first use.
    #[instrument(skip(self))]
    pub async fn get_or_create_cart(&self, customer: CustomerId) -> Result<OrderView, OrderError> {
        let cart = self.orders.get_or_create_cart(customer).await?;
        Ok(render_one(&self.products, &cart).await?)
    }

    /// Adds one unit of `product`; a product already in the cart is incremented.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<OrderView, OrderError> {
        let cart = self.orders.add_item(customer, product).await?;
        Ok(render_one(&self.products, &cart).await?)
    }

    /// Steps a line item by one unit. Decrementing the last unit removes the line item.
    #[instrument(skip(self))]
    pub async fn change_quantity(
        &self,
        customer: CustomerId,
        item: LineItemId,
        change: QuantityChange,
    ) -> Result<OrderView, OrderError> {
        let cart = self.orders.change_quantity(customer, item, change).await?;
        Ok(render_one(&self.products, &cart).await?)
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        customer: CustomerId,
        item: LineItemId,
    ) -> Result<OrderView, OrderError> {
        let cart = self.orders.remove_item(customer, item).await?;
        Ok(render_one(&self.products, &cart).await?)
    }

    /// Checks out the open cart. Fails with `EmptyCart` when it holds no items.
    #[instrument(skip(self))]
    pub async fn submit_cart(&self, customer: CustomerId) -> Result<OrderView, OrderError> {
        let order = self.orders.submit(customer).await?;
        Ok(render_one(&self.products, &order).await?)
    }

    /// Submitted orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_my_orders(&self, customer: CustomerId) -> Result<Vec<OrderView>, OrderError> {
        let orders = self.orders.orders_of(customer).await?;
        Ok(render(&self.products, &orders).await?)
    }

    /// One of the customer's submitted orders. Other customers' orders and carts are
    /// reported as `NotFound`.
    #[instrument(skip(self))]
    pub async fn get_order(
        &self,
        customer: CustomerId,
        id: OrderId,
    ) -> Result<OrderView, OrderError> {
        let order = self
            .orders
            .get(id)
            .await?
            .filter(|o| o.finalized && o.customer == customer)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        Ok(render_one(&self.products, &order).await?)
    }

    /// Item count for the cart badge. Creates the cart if needed.
    #[instrument(skip(self))]
    pub async fn cart_item_count(&self, customer: CustomerId) -> Result<u32, OrderError> {
        Ok(self.orders.get_or_create_cart(customer).await?.total_items())
    }
}
