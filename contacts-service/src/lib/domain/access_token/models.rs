use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Identifier of a stored access token, carried as the JWT `jti` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessTokenId(pub Uuid);

impl AccessTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `Malformed` - String is not a UUID
    pub fn from_string(s: &str) -> Result<Self, AccessTokenError> {
        Uuid::parse_str(s)
            .map(AccessTokenId)
            .map_err(|e| AccessTokenError::Malformed(format!("invalid token id: {}", e)))
    }
}

impl Default for AccessTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccessTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Server-side record of an issued bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub id: AccessTokenId,
    pub user_id: UserId,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// A signed bearer token handed to the client, with its stored record.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub access_token: AccessToken,
}

/// Outcome of resolving a bearer token: the token record and its owner.
#[derive(Debug, Clone)]
pub struct Authentication {
    pub access_token: AccessToken,
    pub user: User,
}
