//! [`ActorEntity`] implementation for [`Product`].
//!
//! Products have no custom actions; the catalog is plain create/read/update/delete. Every
//! write is validated before it touches the stored entity, so a rejected edit leaves the
//! product unchanged.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::convert::Infallible;

fn validate(name: &str, price: Decimal) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::Validation("name must not be empty".into()));
    }
    if price < Decimal::ZERO {
        return Err(ProductError::Validation(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = ProductError;

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate(&params.name, params.price)?;
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            active: params.active,
            image: params.image,
        })
    }

    /// Applies the fields present in `update`, all or nothing.
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        let name = update.name.unwrap_or_else(|| self.name.clone());
        let price = update.price.unwrap_or(self.price);
        validate(&name, price)?;

        self.name = name;
        self.price = price;
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Infallible,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_blank_names_and_negative_prices() {
        let blank = ProductCreate::new("  ", "", Decimal::ONE);
        assert!(matches!(
            Product::from_create_params(ProductId(1), blank),
            Err(ProductError::Validation(_))
        ));

        let negative = ProductCreate::new("Soup", "", Decimal::new(-1, 2));
        assert!(matches!(
            Product::from_create_params(ProductId(1), negative),
            Err(ProductError::Validation(_))
        ));

        let free = ProductCreate::new("Water", "", Decimal::ZERO);
        assert!(Product::from_create_params(ProductId(1), free).is_ok());
    }

    #[tokio::test]
    async fn rejected_update_leaves_product_untouched() {
        let mut product = Product::new(ProductId(1), "Soup", "hot", Decimal::new(450, 2));
        let update = ProductUpdate {
            name: Some("".into()),
            active: Some(false),
            ..Default::default()
        };
        assert!(product.on_update(update, &()).await.is_err());
        assert_eq!(product.name, "Soup");
        assert!(product.active);
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let mut product = Product::new(ProductId(1), "Soup", "hot", Decimal::new(450, 2));
        product.image = Some("soup.png".into());
        let update = ProductUpdate {
            price: Some(Decimal::new(500, 2)),
            image: Some(None),
            ..Default::default()
        };
        product.on_update(update, &()).await.unwrap();
        assert_eq!(product.name, "Soup");
        assert_eq!(product.price, Decimal::new(500, 2));
        assert_eq!(product.image, None);
    }
}
