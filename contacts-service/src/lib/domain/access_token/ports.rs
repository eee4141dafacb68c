use async_trait::async_trait;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::access_token::models::AccessToken;
use crate::domain::access_token::models::AccessTokenId;
use crate::domain::access_token::models::Authentication;
use crate::domain::access_token::models::IssuedAccessToken;
use crate::domain::user::models::User;

/// Port for access token operations.
#[async_trait]
pub trait AccessTokenServicePort: Send + Sync + 'static {
    /// Issue and store a new bearer token for `user`.
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be signed
    /// * `DatabaseError` - Token record could not be stored
    async fn create_token(&self, user: &User) -> Result<IssuedAccessToken, AccessTokenError>;

    /// Resolve a bearer token to its stored, non-revoked record.
    ///
    /// # Errors
    /// * `Malformed` - Signature or format is invalid
    /// * `Expired` - Token is past its expiry
    /// * `NotFound` - No stored record for the token id
    /// * `Revoked` - Token has been revoked
    /// * `SubjectMismatch` - Record belongs to another user
    async fn get_access_token(&self, token: &str) -> Result<AccessToken, AccessTokenError>;

    /// Resolve a bearer token to the token record and its owner.
    ///
    /// # Errors
    /// Same as `get_access_token`, plus:
    /// * `UserNotFound` - Token owner no longer exists
    async fn authenticate(&self, token: &str) -> Result<Authentication, AccessTokenError>;

    /// Resolve a bearer token to its owner.
    async fn get_token_user(&self, token: &str) -> Result<User, AccessTokenError> {
        self.authenticate(token).await.map(|auth| auth.user)
    }

    /// Revoke the token record with the given id.
    ///
    /// Revoking an already revoked token succeeds.
    ///
    /// # Errors
    /// * `NotFound` - No stored record for the token id
    async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError>;

    /// Revoke a bearer token after validating it.
    async fn revoke_token(&self, token: &str) -> Result<(), AccessTokenError> {
        let access_token = self.get_access_token(token).await?;
        self.revoke(&access_token.id).await
    }
}

/// Persistence operations for access token records.
#[async_trait]
pub trait AccessTokenRepository: Send + Sync + 'static {
    /// Persist a new token record.
    async fn create(&self, token: AccessToken) -> Result<AccessToken, AccessTokenError>;

    /// Retrieve a token record by id.
    ///
    /// # Returns
    /// Optional token record (None if not found)
    async fn find_by_id(&self, id: &AccessTokenId)
        -> Result<Option<AccessToken>, AccessTokenError>;

    /// Mark a token record as revoked. Idempotent.
    ///
    /// # Errors
    /// * `NotFound` - No record with this id
    async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError>;
}
