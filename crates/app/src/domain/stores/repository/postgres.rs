use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    auth::UserUuid,
    domain::stores::{
        data::NewStore,
        records::{StoreRecord, StoreUuid},
    },
};

use super::{CREATE_STORE_SQL, FIND_STORE_BY_OWNER_SQL, LIST_STORES_SQL, StoresRepository};

#[derive(Debug, Clone)]
pub struct PgStoresRepository {
    pool: PgPool,
}

impl PgStoresRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoresRepository for PgStoresRepository {
    async fn create_store(
        &self,
        owner: UserUuid,
        store: NewStore,
        at: Timestamp,
    ) -> Result<StoreRecord, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(CREATE_STORE_SQL)
            .bind(store.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(store.name)
            .bind(store.description)
            .bind(SqlxTimestamp::from(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_store_by_owner(
        &self,
        owner: UserUuid,
    ) -> Result<Option<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(FIND_STORE_BY_OWNER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, sqlx::Error> {
        query_as::<Postgres, StoreRecord>(LIST_STORES_SQL)
            .fetch_all(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for StoreRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: StoreUuid::from_uuid(row.try_get("uuid")?),
            owner: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
