use super::SystemConfig;
use crate::clients::{OrderClient, ProductClient};
use crate::services::{Catalog, Dashboard, KanbanBoard, Storefront};
use tracing::{error, info};

/// The running storefront: one Product actor, one Order actor, and the clients to reach them.
///
/// The Order actor is started with a clone of the [`ProductClient`] as its context, so it
/// can check products when items are added. The dependency only goes one way, which lets
/// both actors stop as soon as the clients held here are dropped.
///
/// # Example
///
/// ```rust
/// use storefront::lifecycle::{StoreSystem, SystemConfig};
/// use storefront::model::{CustomerId, ProductCreate};
/// use rust_decimal::Decimal;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = StoreSystem::new(SystemConfig::default());
///
///     let tea = system
///         .catalog()
///         .add_product(ProductCreate::new("Tea", "Jasmine", Decimal::new(250, 2)))
///         .await?;
///     let cart = system.storefront().add_item(CustomerId(1), tea.id).await?;
///     assert_eq!(cart.total_items, 1);
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct StoreSystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    config: SystemConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StoreSystem {
    /// Creates both actors and spawns them. Must be called inside a Tokio runtime.
    pub fn new(config: SystemConfig) -> Self {
        let (product_actor, product_client) = crate::product_actor::new(config.channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.channel_buffer);

        let product_handle = tokio::spawn(product_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(product_client.clone()));

        info!(?config, "Store system started");
        Self {
            order_client,
            product_client,
            config,
            handles: vec![product_handle, order_handle],
        }
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn storefront(&self) -> Storefront {
        Storefront::new(self.order_client.clone(), self.product_client.clone())
    }

    pub fn kanban(&self) -> KanbanBoard {
        KanbanBoard::new(
            self.order_client.clone(),
            self.product_client.clone(),
            self.config.delivered_window,
        )
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.product_client.clone(), self.order_client.clone())
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.order_client.clone(), self.product_client.clone())
    }

    /// Drops the clients and waits for both actors to drain their mailboxes.
    ///
    /// The Order actor goes first: it holds a `ProductClient`, so the Product actor can only
    /// stop after it. Services handed out earlier hold clients too and must be dropped
    /// before calling this, or the wait never ends.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.product_client);

        for handle in self.handles.into_iter().rev() {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
