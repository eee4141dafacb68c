use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::access_token::models::AccessToken;
use crate::domain::access_token::models::AccessTokenId;
use crate::domain::access_token::models::Authentication;
use crate::domain::access_token::models::IssuedAccessToken;
use crate::domain::access_token::ports::AccessTokenRepository;
use crate::domain::access_token::ports::AccessTokenServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Issues signed bearer tokens backed by revocable stored records.
///
/// A token is only honoured while its signature and expiry verify *and* its
/// record exists, is not revoked and points at the same user as the `sub`
/// claim.
pub struct AccessTokenService<TR, UR>
where
    TR: AccessTokenRepository,
    UR: UserRepository,
{
    token_repository: Arc<TR>,
    user_repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<TR, UR> AccessTokenService<TR, UR>
where
    TR: AccessTokenRepository,
    UR: UserRepository,
{
    pub fn new(
        token_repository: Arc<TR>,
        user_repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            token_repository,
            user_repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<TR, UR> AccessTokenServicePort for AccessTokenService<TR, UR>
where
    TR: AccessTokenRepository,
    UR: UserRepository,
{
    async fn create_token(&self, user: &User) -> Result<IssuedAccessToken, AccessTokenError> {
        let id = AccessTokenId::new();
        let issued = self
            .authenticator
            .issue_token(user.id, id, user.name.as_str())?;

        let now = Utc::now();
        let record = AccessToken {
            id,
            user_id: user.id,
            revoked: false,
            created_at: now,
            expires_at: issued
                .claims
                .expires_at()
                .unwrap_or(now + self.authenticator.token_ttl()),
        };

        let access_token = self.token_repository.create(record).await?;

        tracing::debug!(
            user_id = %user.id,
            token_id = %access_token.id,
            expires_at = %access_token.expires_at,
            "Access token issued"
        );

        Ok(IssuedAccessToken {
            token: issued.token,
            access_token,
        })
    }

    async fn get_access_token(&self, token: &str) -> Result<AccessToken, AccessTokenError> {
        let claims = self.authenticator.validate_token(token)?;

        let token_id = AccessTokenId::from_string(&claims.jti)?;
        let user_id = UserId::from_string(&claims.sub)
            .map_err(|e| AccessTokenError::Malformed(e.to_string()))?;

        let access_token = self
            .token_repository
            .find_by_id(&token_id)
            .await?
            .ok_or(AccessTokenError::NotFound(token_id))?;

        if access_token.revoked {
            return Err(AccessTokenError::Revoked(token_id));
        }

        if access_token.user_id != user_id {
            return Err(AccessTokenError::SubjectMismatch { token_id, user_id });
        }

        if access_token.is_expired(Utc::now()) {
            return Err(AccessTokenError::Expired);
        }

        Ok(access_token)
    }

    async fn authenticate(&self, token: &str) -> Result<Authentication, AccessTokenError> {
        let access_token = self.get_access_token(token).await?;

        let user = self
            .user_repository
            .find_by_id(&access_token.user_id)
            .await
            .map_err(|e| AccessTokenError::DatabaseError(e.to_string()))?
            .ok_or(AccessTokenError::UserNotFound(access_token.user_id))?;

        Ok(Authentication { access_token, user })
    }

    async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError> {
        self.token_repository.revoke(id).await?;
        tracing::debug!(token_id = %id, "Access token revoked");
        Ok(())
    }
}
