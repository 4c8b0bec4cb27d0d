//! Products Repository
//!
//! Every lookup is scoped to a store, so a product owned by another store is
//! indistinguishable from a missing one.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::domain::{
    products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    stores::records::StoreUuid,
};

mod postgres;
mod sqlite;

pub use postgres::PgProductsRepository;
pub use sqlite::SqliteProductsRepository;

const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");
const LIST_STORE_PRODUCTS_SQL: &str = include_str!("../sql/list_store_products.sql");
const GET_STORE_PRODUCT_SQL: &str = include_str!("../sql/get_store_product.sql");
const UPDATE_STORE_PRODUCT_SQL: &str = include_str!("../sql/update_store_product.sql");
const DELETE_STORE_PRODUCT_SQL: &str = include_str!("../sql/delete_store_product.sql");

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn create_product(
        &self,
        store: StoreUuid,
        product: NewProduct,
        at: Timestamp,
    ) -> Result<ProductRecord, sqlx::Error>;

    async fn list_store_products(&self, store: StoreUuid)
    -> Result<Vec<ProductRecord>, sqlx::Error>;

    async fn get_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error>;

    async fn update_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
        at: Timestamp,
    ) -> Result<Option<ProductRecord>, sqlx::Error>;

    /// Returns the number of rows removed.
    async fn delete_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error>;
}
