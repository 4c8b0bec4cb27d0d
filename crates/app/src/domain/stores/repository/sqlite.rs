use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query_as, sqlite::SqliteRow};

use crate::{
    auth::UserUuid,
    database::sqlite::{encode_timestamp, timestamp},
    domain::stores::{
        data::NewStore,
        records::{StoreRecord, StoreUuid},
    },
};

use super::{CREATE_STORE_SQL, FIND_STORE_BY_OWNER_SQL, LIST_STORES_SQL, StoresRepository};

#[derive(Debug, Clone)]
pub struct SqliteStoresRepository {
    pool: SqlitePool,
}

impl SqliteStoresRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoresRepository for SqliteStoresRepository {
    async fn create_store(
        &self,
        owner: UserUuid,
        store: NewStore,
        at: Timestamp,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Sqlite, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(store.name)
            .bind(store.description)
            .bind(encode_timestamp(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_store_by_owner(
        &self,
        owner: UserUuid,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Sqlite, StoreRecord>(FIND_STORE_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Sqlite, StoreRecord>(LIST_STORES_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for StoreRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: timestamp(row, "created_at")?,
        })
    }
}
