use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// `sub` is the owning user and `jti` the identifier of the stored access
/// token record, which is what makes a signed token revocable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,

    /// Token identifier
    pub jti: String,

    /// Display name of the user at issue time
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims issued now and expiring after `ttl`.
    pub fn new(
        user_id: impl ToString,
        token_id: impl ToString,
        name: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::issued_at(user_id, token_id, name, Utc::now(), ttl)
    }

    /// Build claims with an explicit issue instant.
    pub fn issued_at(
        user_id: impl ToString,
        token_id: impl ToString,
        name: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            jti: token_id.to_string(),
            name: name.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
