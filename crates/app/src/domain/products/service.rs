//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info};

use crate::{
    auth::UserUuid,
    domain::{
        products::{
            data::{NewProduct, ProductUpdate},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::ProductsRepository,
        },
        stores::{StoresRepository, records::StoreUuid},
    },
};

#[derive(Clone)]
pub struct DbProductsService {
    stores: Arc<dyn StoresRepository>,
    repository: Arc<dyn ProductsRepository>,
}

impl DbProductsService {
    #[must_use]
    pub fn new(stores: Arc<dyn StoresRepository>, repository: Arc<dyn ProductsRepository>) -> Self {
        Self { stores, repository }
    }

    async fn store_for(&self, owner: UserUuid) -> Result<StoreUuid, ProductsServiceError> {
        let store = self
            .stores
            .find_store_by_owner(owner)
            .await?
            .ok_or(ProductsServiceError::StoreNotFound)?;

        Span::current().record("store_uuid", tracing::field::display(store.uuid));

        Ok(store.uuid)
    }
}

impl std::fmt::Debug for DbProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbProductsService").finish_non_exhaustive()
    }
}

fn validate_price(price: Decimal) -> Result<(), ProductsServiceError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductsServiceError::InvalidData("price must not be negative"));
    }

    Ok(())
}

#[async_trait]
impl ProductsService for DbProductsService {
    #[tracing::instrument(
        name = "products.service.list_products",
        skip(self),
        fields(owner_uuid = %owner, store_uuid = tracing::field::Empty),
        err
    )]
    async fn list_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let store = self.store_for(owner).await?;

        Ok(self.repository.list_store_products(store).await?)
    }

    #[tracing::instrument(
        name = "products.service.get_product",
        skip(self),
        fields(owner_uuid = %owner, product_uuid = %product, store_uuid = tracing::field::Empty),
        err
    )]
    async fn get_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let store = self.store_for(owner).await?;

        self.repository
            .get_store_product(store, product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(
            owner_uuid = %owner,
            product_uuid = %product.uuid,
            store_uuid = tracing::field::Empty
        ),
        err
    )]
    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::InvalidData("name must not be empty"));
        }

        validate_price(product.price)?;

        let store = self.store_for(owner).await?;

        let created = self
            .repository
            .create_product(store, product, Timestamp::now())
            .await?;

        info!("created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(owner_uuid = %owner, product_uuid = %product, store_uuid = tracing::field::Empty),
        err
    )]
    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(ProductsServiceError::InvalidData("name must not be empty"));
        }

        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let store = self.store_for(owner).await?;

        let updated = self
            .repository
            .update_store_product(store, product, update, Timestamp::now())
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        info!("updated product");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(owner_uuid = %owner, product_uuid = %product, store_uuid = tracing::field::Empty),
        err
    )]
    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let store = self.store_for(owner).await?;

        let rows_affected = self.repository.delete_store_product(store, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        info!("deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves the products of the caller's store.
    async fn list_products(&self, owner: UserUuid)
    -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product owned by the caller's store.
    async fn get_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a product in the caller's store.
    async fn create_product(
        &self,
        owner: UserUuid,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Updates the supplied fields of a product in the caller's store.
    async fn update_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product from the caller's store.
    async fn delete_product(
        &self,
        owner: UserUuid,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
