use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
    stores::records::StoreUuid,
};

use super::{
    CREATE_PRODUCT_SQL, DELETE_STORE_PRODUCT_SQL, GET_STORE_PRODUCT_SQL, LIST_STORE_PRODUCTS_SQL,
    ProductsRepository, UPDATE_STORE_PRODUCT_SQL,
};

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn create_product(
        &self,
        store: StoreUuid,
        product: NewProduct,
        at: Timestamp,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(store.into_uuid())
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(product.name)
            .bind(product.price)
            .bind(SqlxTimestamp::from(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn list_store_products(
        &self,
        store: StoreUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_STORE_PRODUCTS_SQL)
            .bind(store.into_uuid())
            .fetch_all(&self.pool)
            .await
    }

    async fn get_store_product(
        &self,
        store: StoreUuid,
        product: ProductUuid,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_STORE_PRODUCT_SQL)
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
        query_as::<Postgres, ProductRecord>(UPDATE_STORE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(store.into_uuid())
            .bind(update.category.map(CategoryUuid::into_uuid))
            .bind(update.name)
            .bind(update.price)
            .bind(SqlxTimestamp::from(at))
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

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            store: StoreUuid::from_uuid(row.try_get("store_uuid")?),
            category: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
