//! Stores service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::UserUuid,
    domain::stores::{
        data::NewStore, errors::StoresServiceError, records::StoreRecord,
        repository::StoresRepository,
    },
};

#[derive(Clone)]
pub struct DbStoresService {
    repository: Arc<dyn StoresRepository>,
}

impl DbStoresService {
    #[must_use]
    pub fn new(repository: Arc<dyn StoresRepository>) -> Self {
        Self { repository }
    }
}

impl std::fmt::Debug for DbStoresService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbStoresService").finish_non_exhaustive()
    }
}

#[async_trait]
impl StoresService for DbStoresService {
    #[tracing::instrument(
        name = "stores.service.onboard_store",
        skip(self, store),
        fields(owner_uuid = %owner, store_uuid = %store.uuid),
        err
    )]
    async fn onboard_store(
        &self,
        owner: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError> {
        if store.name.trim().is_empty() {
            return Err(StoresServiceError::InvalidData("name must not be empty"));
        }

        let created = self
            .repository
            .create_store(owner, store, Timestamp::now())
            .await?;

        info!("onboarded store");

        Ok(created)
    }

    async fn get_store_for_owner(&self, owner: UserUuid) -> Result<StoreRecord, StoresServiceError> {
        self.repository
            .find_store_by_owner(owner)
            .await?
            .ok_or(StoresServiceError::NotFound)
    }

    async fn list_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError> {
        Ok(self.repository.list_stores().await?)
    }
}

#[automock]
#[async_trait]
pub trait StoresService: Send + Sync {
    /// Creates the store owned by `owner`. A user may own a single store.
    async fn onboard_store(
        &self,
        owner: UserUuid,
        store: NewStore,
    ) -> Result<StoreRecord, StoresServiceError>;

    /// Retrieves the store owned by `owner`.
    async fn get_store_for_owner(&self, owner: UserUuid) -> Result<StoreRecord, StoresServiceError>;

    /// Lists all stores, newest first.
    async fn list_stores(&self) -> Result<Vec<StoreRecord>, StoresServiceError>;
}
