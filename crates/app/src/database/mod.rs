//! Database connection management
//!
//! The storage backend is chosen once, from the connection URL scheme, when
//! the process starts. Everything downstream talks to the repository traits
//! in [`Repositories`] and never inspects which driver sits behind them.

use std::sync::Arc;

use sqlx::{PgPool, SqlitePool, migrate::MigrateError};
use thiserror::Error;
use tracing::info;

use crate::{
    auth::AuthRepository,
    domain::{
        campaigns::CampaignsRepository, categories::CategoriesRepository,
        participations::ParticipationsRepository, products::ProductsRepository,
        stores::StoresRepository,
    },
};

pub(crate) mod postgres;
pub(crate) mod sqlite;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("unsupported database url scheme `{0}`")]
    UnsupportedScheme(String),

    #[error("failed to connect to database")]
    Connect(#[source] sqlx::Error),

    #[error("failed to run database migrations")]
    Migrate(#[source] MigrateError),
}

/// Storage backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    /// Resolve the backend from a connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UnsupportedScheme`] for anything other than
    /// `postgres://`, `postgresql://` or `sqlite:`.
    pub fn from_url(url: &str) -> Result<Self, DatabaseError> {
        let scheme = url.split_once(':').map_or(url, |(scheme, _)| scheme);

        match scheme {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(DatabaseError::UnsupportedScheme(other.to_string())),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

/// A connected database, either `PostgreSQL` or `SQLite`.
#[derive(Debug, Clone)]
pub enum Db {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Db {
    /// Connect to the database named by `url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the scheme is unsupported or the connection
    /// cannot be established.
    pub async fn connect(url: &str) -> Result<Self, DatabaseError> {
        let backend = Backend::from_url(url)?;

        let db = match backend {
            Backend::Postgres => PgPool::connect(url).await.map(Self::Postgres),
            Backend::Sqlite => sqlite::connect(url).await.map(Self::Sqlite),
        }
        .map_err(DatabaseError::Connect)?;

        info!(backend = backend.as_str(), "connected to database");

        Ok(db)
    }

    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Postgres(_) => Backend::Postgres,
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Apply the embedded migrations for this backend.
    ///
    /// # Errors
    ///
    /// Returns an error when a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        match self {
            Self::Postgres(pool) => sqlx::migrate!("../../migrations/postgres").run(pool).await,
            Self::Sqlite(pool) => sqlx::migrate!("../../migrations/sqlite").run(pool).await,
        }
        .map_err(DatabaseError::Migrate)?;

        info!(backend = self.backend().as_str(), "database migrations applied");

        Ok(())
    }

    /// Build the repository set backed by this connection.
    #[must_use]
    pub fn repositories(&self) -> Repositories {
        match self {
            Self::Postgres(pool) => postgres::repositories(pool),
            Self::Sqlite(pool) => sqlite::repositories(pool),
        }
    }
}

/// One adapter per aggregate, all sharing a backend.
#[derive(Clone)]
pub struct Repositories {
    pub auth: Arc<dyn AuthRepository>,
    pub stores: Arc<dyn StoresRepository>,
    pub categories: Arc<dyn CategoriesRepository>,
    pub products: Arc<dyn ProductsRepository>,
    pub campaigns: Arc<dyn CampaignsRepository>,
    pub participations: Arc<dyn ParticipationsRepository>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
