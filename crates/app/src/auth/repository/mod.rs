//! Auth Repository

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use uuid::Uuid;

use crate::auth::{ActiveApiToken, ApiTokenRecord, NewApiToken, NewUser, Role, UserRecord, UserUuid};

mod postgres;
mod sqlite;

pub use postgres::PgAuthRepository;
pub use sqlite::SqliteAuthRepository;

const CREATE_USER_SQL: &str = include_str!("../sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("../sql/get_user.sql");
const CREATE_API_TOKEN_SQL: &str = include_str!("../sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("../sql/find_active_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("../sql/revoke_api_token.sql");

#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_user(&self, user: NewUser, at: Timestamp) -> Result<UserRecord, sqlx::Error>;

    async fn get_user(&self, user: UserUuid) -> Result<Option<UserRecord>, sqlx::Error>;

    async fn create_api_token(
        &self,
        token: NewApiToken,
        at: Timestamp,
    ) -> Result<ApiTokenRecord, sqlx::Error>;

    /// Unrevoked token joined with its user's role.
    async fn find_active_api_token(
        &self,
        token: Uuid,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error>;

    /// Returns the number of tokens revoked.
    async fn revoke_api_token(&self, token: Uuid, at: Timestamp) -> Result<u64, sqlx::Error>;
}

fn decode_role(role: &str) -> sqlx::Result<Role> {
    role.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: "role".to_string(),
        source: Box::new(e),
    })
}
