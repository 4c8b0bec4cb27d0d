//! Stores Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::UserUuid,
    domain::stores::{data::NewStore, records::StoreRecord},
};

mod postgres;
mod sqlite;

pub use postgres::PgStoresRepository;
pub use sqlite::SqliteStoresRepository;

const CREATE_STORE_SQL: &str = include_str!("../sql/create_store.sql");
const FIND_STORE_BY_OWNER_SQL: &str = include_str!("../sql/find_store_by_owner.sql");
const LIST_STORES_SQL: &str = include_str!("../sql/list_stores.sql");

#[automock]
#[async_trait]
pub trait StoresRepository: Send + Sync {
    async fn create_store(
        &self,
        owner: UserUuid,
        store: NewStore,
        at: Timestamp,
    ) -> Result<StoreRecord, sqlx::Error>;

    async fn find_store_by_owner(&self, owner: UserUuid)
    -> Result<Option<StoreRecord>, sqlx::Error>;

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, sqlx::Error>;
}
