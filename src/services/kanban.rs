//! # Kanban refresh protocol
//!
//! The staff console shows finalized orders in four columns. The board is pull-based:
//! [`KanbanBoard::refresh_view`] is a read-only snapshot, and every staff transition answers
//! with a fresh snapshot taken after the order actor acknowledged the write, so the
//! caller always sees its own change.
//!
//! Column order is oldest submission first, except `delivered`, which shows only the most
//! recent `delivered_window` orders, newest first. Declined and archived orders are not on
//! the board.

use super::{index_for, render_one};
use crate::clients::{OrderClient, ProductClient};
use crate::model::{Order, OrderEvent, OrderId, OrderStatus, OrderView, ProductIndex};
use crate::order_actor::OrderError;
use actor_framework::ActorClient;
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KanbanView {
    pub submitted: Vec<OrderView>,
    pub preparing: Vec<OrderView>,
    pub out_for_delivery: Vec<OrderView>,
    pub delivered: Vec<OrderView>,
}

impl KanbanView {
    /// Groups `orders` into columns. Orders that do not belong on the board are skipped.
    pub fn assemble(
        mut orders: Vec<Order>,
        products: &ProductIndex,
        delivered_window: usize,
    ) -> Self {
        orders.retain(|o| o.finalized);
        orders.sort_by(|a, b| a.placed_at().cmp(&b.placed_at()).then(a.id.cmp(&b.id)));

        let mut view = KanbanView::default();
        for order in &orders {
            let column = match order.status {
                OrderStatus::Submitted => &mut view.submitted,
                OrderStatus::Preparing => &mut view.preparing,
                OrderStatus::OutForDelivery => &mut view.out_for_delivery,
                OrderStatus::Delivered => &mut view.delivered,
                _ => continue,
            };
            column.push(OrderView::build(order, products));
        }
        view.delivered.reverse();
        view.delivered.truncate(delivered_window);
        view
    }

    pub fn column(&self, status: OrderStatus) -> &[OrderView] {
        match status {
            OrderStatus::Submitted => self.submitted.as_slice(),
            OrderStatus::Preparing => self.preparing.as_slice(),
            OrderStatus::OutForDelivery => self.out_for_delivery.as_slice(),
            OrderStatus::Delivered => self.delivered.as_slice(),
            _ => &[],
        }
    }

    /// Column currently holding `id`, if any.
    pub fn locate(&self, id: OrderId) -> Option<OrderStatus> {
        OrderStatus::BOARD
            .into_iter()
            .find(|&status| self.column(status).iter().any(|o| o.id == id))
    }

    pub fn len(&self) -> usize {
        OrderStatus::BOARD.iter().map(|&s| self.column(s).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of archiving: how many orders left the board, and the board afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveReport {
    pub archived: usize,
    pub board: KanbanView,
}

/// Staff-side operations on submitted orders.
#[derive(Clone)]
pub struct KanbanBoard {
    orders: OrderClient,
    products: ProductClient,
    delivered_window: usize,
}

impl KanbanBoard {
    pub fn new(orders: OrderClient, products: ProductClient, delivered_window: usize) -> Self {
        Self {
            orders,
            products,
            delivered_window,
        }
    }

    /// Current board snapshot. Read-only.
    #[instrument(skip(self))]
    pub async fn refresh_view(&self) -> Result<KanbanView, OrderError> {
        let orders = self.orders.finalized_with_status(&OrderStatus::BOARD).await?;
        let index = index_for(&self.products, &orders).await?;
        Ok(KanbanView::assemble(orders, &index, self.delivered_window))
    }

    pub async fn accept(&self, id: OrderId) -> Result<KanbanView, OrderError> {
        self.transition(id, OrderEvent::Accept).await
    }

    pub async fn decline(&self, id: OrderId) -> Result<KanbanView, OrderError> {
        self.transition(id, OrderEvent::Decline).await
    }

    pub async fn dispatch(&self, id: OrderId) -> Result<KanbanView, OrderError> {
        self.transition(id, OrderEvent::Dispatch).await
    }

    pub async fn deliver(&self, id: OrderId) -> Result<KanbanView, OrderError> {
        self.transition(id, OrderEvent::Deliver).await
    }

    /// Archives every delivered order at once.
    #[instrument(skip(self))]
    pub async fn archive_delivered(&self) -> Result<ArchiveReport, OrderError> {
        let archived = self.orders.archive_delivered().await?;
        let board = self.refresh_view().await?;
        Ok(ArchiveReport { archived, board })
    }

    /// Detail of any submitted order, for the staff modal.
    #[instrument(skip(self))]
    pub async fn order_details(&self, id: OrderId) -> Result<OrderView, OrderError> {
        let order = self
            .orders
            .get(id)
            .await?
            .filter(|o| o.finalized)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        Ok(render_one(&self.products, &order).await?)
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: OrderId, event: OrderEvent) -> Result<KanbanView, OrderError> {
        let order = self.orders.transition(id, event).await?;
        info!(order_id = %id, status = %order.status, "Order moved");
        self.refresh_view().await
    }
}
