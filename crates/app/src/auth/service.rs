//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::auth::{
    ApiTokenVersion, AuthServiceError, Caller, IssuedApiToken, NewApiToken, NewUser, UserRecord,
    UserUuid, format_api_token, generate_api_token_secret, hash_api_token, parse_api_token,
    repository::AuthRepository, verifiers_match,
};

#[derive(Clone)]
pub struct DbAuthService {
    repository: Arc<dyn AuthRepository>,
}

impl DbAuthService {
    #[must_use]
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }
}

impl std::fmt::Debug for DbAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbAuthService").finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthService for DbAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier = hash_api_token(
            &parsed_token.token_uuid,
            parsed_token.version,
            token.user,
            &parsed_token.secret,
        );

        if !verifiers_match(&token.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        Ok(Caller {
            user: token.user,
            role: token.role,
        })
    }

    #[tracing::instrument(
        name = "auth.service.create_user",
        skip(self, user),
        fields(user_uuid = %user.uuid, role = %user.role),
        err
    )]
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        if user.name.trim().is_empty() {
            return Err(AuthServiceError::InvalidData("name must not be empty"));
        }

        let created = self.repository.create_user(user, Timestamp::now()).await?;

        info!("created user");

        Ok(created)
    }

    #[tracing::instrument(
        name = "auth.service.issue_api_token",
        skip(self),
        fields(user_uuid = %user, token_uuid = tracing::field::Empty),
        err
    )]
    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError> {
        self.repository
            .get_user(user)
            .await?
            .ok_or(AuthServiceError::UserNotFound)?;

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        tracing::Span::current().record("token_uuid", tracing::field::display(token_uuid));

        let metadata = self
            .repository
            .create_api_token(
                NewApiToken {
                    uuid: token_uuid,
                    user,
                    token_hash: hash_api_token(&token_uuid, version, user, &secret),
                },
                Timestamp::now(),
            )
            .await?;

        info!("issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    #[tracing::instrument(name = "auth.service.revoke_api_token", skip(self), err)]
    async fn revoke_api_token(&self, token: Uuid) -> Result<(), AuthServiceError> {
        let rows_affected = self
            .repository
            .revoke_api_token(token, Timestamp::now())
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        info!("revoked api token");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to its caller. Unknown, revoked and
    /// malformed tokens are all [`AuthServiceError::NotFound`].
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Caller, AuthServiceError>;

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;

    /// Issue a token for `user`. The raw token is only ever returned here.
    async fn issue_api_token(&self, user: UserUuid) -> Result<IssuedApiToken, AuthServiceError>;

    async fn revoke_api_token(&self, token: Uuid) -> Result<(), AuthServiceError>;
}
