//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, DbAuthService},
    database::{DatabaseError, Db},
    domain::{
        campaigns::{CampaignsService, DbCampaignsService},
        categories::{CategoriesService, DbCategoriesService},
        participations::{DbParticipationsService, ParticipationsService},
        products::{DbProductsService, ProductsService},
        stores::{DbStoresService, StoresService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to initialise database")]
    Database(#[from] DatabaseError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub stores: Arc<dyn StoresService>,
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub campaigns: Arc<dyn CampaignsService>,
    pub participations: Arc<dyn ParticipationsService>,
}

impl AppContext {
    /// Wire every service to the repositories of `db`.
    #[must_use]
    pub fn from_db(db: &Db) -> Self {
        let repositories = db.repositories();

        Self {
            auth: Arc::new(DbAuthService::new(repositories.auth)),
            stores: Arc::new(DbStoresService::new(repositories.stores.clone())),
            categories: Arc::new(DbCategoriesService::new(repositories.categories)),
            products: Arc::new(DbProductsService::new(
                repositories.stores.clone(),
                repositories.products.clone(),
            )),
            campaigns: Arc::new(DbCampaignsService::new(repositories.campaigns.clone())),
            participations: Arc::new(DbParticipationsService::new(
                repositories.stores,
                repositories.campaigns,
                repositories.products,
                repositories.participations,
            )),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(url: &str, run_migrations: bool) -> Result<Self, AppInitError> {
        let db = Db::connect(url).await?;

        if run_migrations {
            db.migrate().await?;
        }

        Ok(Self::from_db(&db))
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
