use thiserror::Error;

use crate::domain::access_token::models::AccessTokenId;
use crate::domain::user::models::UserId;

/// Errors raised while issuing, resolving or revoking access tokens.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessTokenError {
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token not found: {0}")]
    NotFound(AccessTokenId),

    #[error("Token has been revoked: {0}")]
    Revoked(AccessTokenId),

    #[error("Token {token_id} does not belong to user {user_id}")]
    SubjectMismatch {
        token_id: AccessTokenId,
        user_id: UserId,
    },

    #[error("Token owner no longer exists: {0}")]
    UserNotFound(UserId),

    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccessTokenError {
    /// Whether the error means "the caller is not authenticated" rather than
    /// an internal failure.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            AccessTokenError::SigningFailed(_) | AccessTokenError::DatabaseError(_)
        )
    }
}

impl From<auth::JwtError> for AccessTokenError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AccessTokenError::Expired,
            auth::JwtError::InvalidToken(msg) => AccessTokenError::Malformed(msg),
            auth::JwtError::EncodingFailed(msg) | auth::JwtError::InvalidKey(msg) => {
                AccessTokenError::SigningFailed(msg)
            }
        }
    }
}
