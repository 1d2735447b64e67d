//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`; every method is a single request, so each one is
//! atomic with respect to every other caller.
use crate::model::{
    CustomerId, LineItemId, Order, OrderCreate, OrderEvent, OrderId, OrderStatus, ProductId,
    QuantityChange,
};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, Predicate, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Conflict(msg) => OrderError::ConstraintViolation(msg),
            other => other
                .into_entity_error::<OrderError>()
                .unwrap_or_else(|e| OrderError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }

    /// The customer's open cart, created empty if there is none.
    #[instrument(skip(self))]
    pub async fn get_or_create_cart(&self, customer: CustomerId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .find_or_create(
                Predicate::new(move |o: &Order| o.is_open_cart_of(customer)),
                OrderCreate { customer },
            )
            .await
            .map_err(Self::map_error)
    }

    /// The customer's open cart, without creating one.
    #[instrument(skip(self))]
    pub async fn open_cart(&self, customer: CustomerId) -> Result<Option<Order>, OrderError> {
        let carts = self
            .list(Predicate::new(move |o: &Order| o.is_open_cart_of(customer)))
            .await?;
        Ok(carts.into_iter().next())
    }

    /// Adds one unit to the customer's open cart, opening one if needed. Cart lookup and
    /// the add are a single request, so a concurrent checkout cannot slip in between.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .find_or_create_action(
                Predicate::new(move |o: &Order| o.is_open_cart_of(customer)),
                OrderCreate { customer },
                OrderAction::AddItem { customer, product },
            )
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn change_quantity(
        &self,
        customer: CustomerId,
        item: LineItemId,
        change: QuantityChange,
    ) -> Result<Order, OrderError> {
        self.act(
            item.order,
            OrderAction::ChangeQuantity {
                customer,
                item,
                change,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        customer: CustomerId,
        item: LineItemId,
    ) -> Result<Order, OrderError> {
        self.act(item.order, OrderAction::RemoveItem { customer, item })
            .await
    }

    /// Checks out the customer's open cart.
    #[instrument(skip(self))]
    pub async fn submit(&self, customer: CustomerId) -> Result<Order, OrderError> {
        let cart = self
            .open_cart(customer)
            .await?
            .ok_or_else(|| OrderError::NotFound(format!("open cart of {customer}")))?;
        let order = self.act(cart.id, OrderAction::Submit { customer }).await?;
        info!(order_id = %order.id, "Order submitted");
        Ok(order)
    }

    /// Applies a staff event to one order.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, event: OrderEvent) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Apply(event)).await
    }

    /// Moves every delivered order to `archived` in one request. Returns how many moved.
    #[instrument(skip(self))]
    pub async fn archive_delivered(&self) -> Result<usize, OrderError> {
        let archived = self
            .inner
            .perform_bulk_action(
                Predicate::new(|o: &Order| o.finalized && o.status == OrderStatus::Delivered),
                OrderAction::Apply(OrderEvent::Archive),
            )
            .await
            .map_err(Self::map_error)?;
        info!(count = archived.len(), "Archived delivered orders");
        Ok(archived.len())
    }

    /// Tombstones every line item that references `product`. Returns the orders touched.
    #[instrument(skip(self))]
    pub async fn detach_product(&self, product: ProductId) -> Result<usize, OrderError> {
        let touched = self
            .inner
            .perform_bulk_action(
                Predicate::new(move |o: &Order| o.contains_product(product)),
                OrderAction::DetachProduct(product),
            )
            .await
            .map_err(Self::map_error)?;
        Ok(touched.len())
    }

    /// Finalized orders of `customer`, newest first.
    #[instrument(skip(self))]
    pub async fn orders_of(&self, customer: CustomerId) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(Predicate::new(move |o: &Order| {
                o.finalized && o.customer == customer
            }))
            .await?;
        orders.sort_by(|a, b| b.placed_at().cmp(&a.placed_at()).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Every finalized order whose status is in `statuses`. Order is unspecified.
    #[instrument(skip(self))]
    pub async fn finalized_with_status(
        &self,
        statuses: &'static [OrderStatus],
    ) -> Result<Vec<Order>, OrderError> {
        self.list(Predicate::new(move |o: &Order| {
            o.finalized && statuses.contains(&o.status)
        }))
        .await
    }

    /// Every finalized order, whatever its status.
    #[instrument(skip(self))]
    pub async fn finalized_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.list(Predicate::new(|o: &Order| o.finalized)).await
    }
}
