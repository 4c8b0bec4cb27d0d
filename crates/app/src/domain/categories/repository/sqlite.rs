use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, sqlite::SqliteRow};

use crate::{
    database::sqlite::{encode_timestamp, timestamp},
    domain::categories::{
        data::NewCategory,
        records::{CategoryRecord, CategoryUuid},
    },
};

use super::{
    CREATE_CATEGORY_SQL, CategoriesRepository, DELETE_CATEGORY_SQL, LIST_CATEGORIES_SQL,
};

#[derive(Debug, Clone)]
pub struct SqliteCategoriesRepository {
    pool: SqlitePool,
}

impl SqliteCategoriesRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriesRepository for SqliteCategoriesRepository {
    async fn create_category(
        &self,
        category: NewCategory,
        at: Timestamp,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name)
            .bind(category.slug)
            .bind(encode_timestamp(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Sqlite, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&self.pool)
            .await
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CategoryRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: timestamp(row, "created_at")?,
        })
    }
}
