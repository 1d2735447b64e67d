//! Product lookups for the storefront and product management for the restaurant.

use crate::clients::{OrderClient, ProductClient};
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use actor_framework::ActorClient;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct Catalog {
    products: ProductClient,
    orders: OrderClient,
}

impl Catalog {
    pub fn new(products: ProductClient, orders: OrderClient) -> Self {
        Self { products, orders }
    }

    pub async fn find_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.products.find_product(id).await
    }

    /// The storefront menu: active products, optionally filtered by name.
    pub async fn list_active_products(
        &self,
        filter: Option<&str>,
    ) -> Result<Vec<Product>, ProductError> {
        self.products
            .list_active_products(filter.map(str::to_owned))
            .await
    }

    /// Every product, including inactive ones.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.products.list_products().await
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        let id = self.products.create_product(params).await?;
        self.products.find_product(id).await
    }

    #[instrument(skip(self))]
    pub async fn edit_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        self.products.update_product(id, update).await
    }

    /// Removes the product from the catalog and tombstones the line items that referenced
    /// it. Historic orders keep their rows with a null product.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.products.delete(id).await?;
        let touched = self
            .orders
            .detach_product(id)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))?;
        info!(product_id = %id, orders = touched, "Product deleted");
        Ok(())
    }
}
