use chrono::Duration;

use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token signing.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// A freshly signed access token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: AccessClaims,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_handler` - Signer/verifier for access tokens
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_handler: JwtHandler, token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler,
            token_ttl,
        }
    }

    /// Replace the default password hasher.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `Mismatch` - Password does not match
    /// * `MalformedHash` - Stored hash cannot be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Sign a new access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Token subject
    /// * `token_id` - Identifier of the stored token record (`jti`)
    /// * `name` - User display name
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue_token(
        &self,
        user_id: impl ToString,
        token_id: impl ToString,
        name: &str,
    ) -> Result<IssuedToken, JwtError> {
        let claims = AccessClaims::new(user_id, token_id, name, self.token_ttl);
        let token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token has expired
    /// * `InvalidToken` - Token is malformed or its signature does not verify
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.jwt_handler.decode(token)
    }
}
