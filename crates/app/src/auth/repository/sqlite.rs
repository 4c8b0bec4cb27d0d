use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    auth::{ActiveApiToken, ApiTokenRecord, NewApiToken, NewUser, UserRecord, UserUuid},
    database::sqlite::{encode_timestamp, optional_timestamp, timestamp},
};

use super::{
    AuthRepository, CREATE_API_TOKEN_SQL, CREATE_USER_SQL, FIND_ACTIVE_API_TOKEN_SQL,
    GET_USER_SQL, REVOKE_API_TOKEN_SQL, decode_role,
};

#[derive(Debug, Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthRepository for SqliteAuthRepository {
    async fn create_user(&self, user: NewUser, at: Timestamp) -> Result<UserRecord, sqlx::Error> {
        query_as::<Sqlite, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.role.as_str())
            .bind(encode_timestamp(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn get_user(&self, user: UserUuid) -> Result<Option<UserRecord>, sqlx::Error> {
        query_as::<Sqlite, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn create_api_token(
        &self,
        token: NewApiToken,
        at: Timestamp,
    ) -> Result<ApiTokenRecord, sqlx::Error> {
        query_as::<Sqlite, ApiTokenRecord>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user.into_uuid())
            .bind(token.token_hash)
            .bind(encode_timestamp(at))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_active_api_token(
        &self,
        token: Uuid,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Sqlite, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
    }

    async fn revoke_api_token(&self, token: Uuid, at: Timestamp) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token)
            .bind(encode_timestamp(at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for UserRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            role: decode_role(row.try_get("role")?)?,
            created_at: timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for ApiTokenRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: timestamp(row, "created_at")?,
            revoked_at: optional_timestamp(row, "revoked_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for ActiveApiToken {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            role: decode_role(row.try_get("role")?)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
