//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog lookups.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use actor_framework::{ActorClient, FrameworkError, Predicate, ResourceClient};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => other
                .into_entity_error::<ProductError>()
                .unwrap_or_else(|e| ProductError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// The product with `id`, or `NotFound`.
    #[instrument(skip(self))]
    pub async fn find_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    /// Active products whose name contains `filter` (case-insensitive), ordered by name.
    #[instrument(skip(self))]
    pub async fn list_active_products(
        &self,
        filter: Option<String>,
    ) -> Result<Vec<Product>, ProductError> {
        let needle = filter.map(|f| f.to_lowercase()).unwrap_or_default();
        let mut products = self
            .list(Predicate::new(move |p: &Product| {
                p.active && p.name.to_lowercase().contains(&needle)
            }))
            .await?;
        sort_by_name(&mut products);
        Ok(products)
    }

    /// The products among `ids` that still exist, active or not. Order is unspecified.
    #[instrument(skip(self))]
    pub async fn products_by_id(
        &self,
        ids: HashSet<ProductId>,
    ) -> Result<Vec<Product>, ProductError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.list(Predicate::new(move |p: &Product| ids.contains(&p.id)))
            .await
    }

    /// Every product, active or not, ordered by name.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list(Predicate::all()).await?;
        sort_by_name(&mut products);
        Ok(products)
    }
}

fn sort_by_name(products: &mut [Product]) {
    products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_get, expect_list, MockClient};
    use rust_decimal::Decimal;

    fn product(id: u32, name: &str, active: bool) -> Product {
        let mut p = Product::new(ProductId(id), name, "", Decimal::new(500, 2));
        p.active = active;
        p
    }

    #[tokio::test]
    async fn find_product_maps_missing_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move { product_client.find_product(ProductId(9)).await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, ProductId(9));
        responder.send(Ok(None)).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(ProductError::NotFound("product_9".into())));
    }

    #[tokio::test]
    async fn active_listing_filters_and_sorts_by_name() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .list_active_products(Some("NOODLE".into()))
                .await
        });

        let (filter, responder) = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        let stored = vec![
            product(1, "Udon noodles", true),
            product(2, "Fried rice", true),
            product(3, "Glass noodles", true),
            product(4, "Noodle soup", false),
        ];
        let matched = stored.into_iter().filter(|p| filter.matches(p)).collect();
        responder.send(Ok(matched)).unwrap();

        let listed = task.await.unwrap().unwrap();
        let names: Vec<String> = listed.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Glass noodles", "Udon noodles"]);
    }

    #[tokio::test]
    async fn validation_errors_survive_the_actor_boundary() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(ProductError::Validation(
                "name must not be empty".into(),
            ))));
        let product_client = ProductClient::new(mock.client());

        let result = product_client
            .create_product(ProductCreate::new("", "", Decimal::ONE))
            .await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
        mock.verify();
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);
        let result = ProductClient::new(client).list_products().await;
        assert!(matches!(
            result,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn lookup_by_id_only_asks_for_referenced_products() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .products_by_id(HashSet::from([ProductId(2), ProductId(4)]))
                .await
        });

        let (filter, responder) = expect_list(&mut receiver)
            .await
            .expect("Expected List request");
        let stored: Vec<Product> = (1..=5).map(|id| product(id, "Dish", true)).collect();
        let matched: Vec<Product> = stored.into_iter().filter(|p| filter.matches(p)).collect();
        assert_eq!(matched.len(), 2);
        responder.send(Ok(matched)).unwrap();

        let mut ids: Vec<u32> = task.await.unwrap().unwrap().iter().map(|p| p.id.0).collect();
        ids.sort();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn lookup_of_no_ids_sends_no_request() {
        let mock = MockClient::<Product>::new();
        let product_client = ProductClient::new(mock.client());
        let found = product_client.products_by_id(HashSet::new()).await.unwrap();
        assert!(found.is_empty());
        mock.verify();
    }
}
