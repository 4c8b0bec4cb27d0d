//! `PostgreSQL` adapter set.

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::PgAuthRepository,
    database::Repositories,
    domain::{
        campaigns::PgCampaignsRepository, categories::PgCategoriesRepository,
        participations::PgParticipationsRepository, products::PgProductsRepository,
        stores::PgStoresRepository,
    },
};

pub(crate) fn repositories(pool: &PgPool) -> Repositories {
    Repositories {
        auth: Arc::new(PgAuthRepository::new(pool.clone())),
        stores: Arc::new(PgStoresRepository::new(pool.clone())),
        categories: Arc::new(PgCategoriesRepository::new(pool.clone())),
        products: Arc::new(PgProductsRepository::new(pool.clone())),
        campaigns: Arc::new(PgCampaignsRepository::new(pool.clone())),
        participations: Arc::new(PgParticipationsRepository::new(pool.clone())),
    }
}
