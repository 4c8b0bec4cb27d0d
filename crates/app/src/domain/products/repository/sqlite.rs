use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    database::sqlite::{decimal, encode_decimal, encode_timestamp, timestamp},
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
        stores::records::StoreUuid,
    },
};

use super::{
    CREATE_PRODUCT_SQL, DELETE_STORE_PRODUCT_SQL, GET_STORE_PRODUCT_SQL, LIST_STORE_PRODUCTS_SQL,
    ProductsRepository, UPDATE_STORE_PRODUCT_SQL,
};

#[derive(Debug, Clone)]
pub struct SqliteProductsRepository {
    pool: SqlitePool,
}

impl SqliteProductsRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for SqliteProductsRepository {
    async fn create_product(
        &self,
        store: StoreUuid,
        product: NewProduct,
        at: Timestamp,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(product.name)
            .bind(encode_decimal(product.price))
            .bind(encode_timestamp(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(LIST_STORE_PRODUCTS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    async fn get_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(GET_STORE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
        update: ProductUpdate,
        at: Timestamp,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(UPDATE_STORE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .bind(update.category.map(CategoryUuid::into_uuid))
            .bind(update.name)
            .bind(update.price.map(encode_decimal))
            .bind(encode_timestamp(at))
            .fetch_optional(&self.pool)
            .await
    }

    async fn delete_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_STORE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            category: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            name: row.try_get("name")?,
            price: decimal(row, "price")?,
            created_at: timestamp(row, "created_at")?,
            updated_at: timestamp(row, "updated_at")?,
        })
    }
}
