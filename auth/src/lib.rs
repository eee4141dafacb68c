//! Authentication utilities library
//!
//! Provides the credential building blocks used by the contacts service:
//! - Password hashing (Argon2id)
//! - Access token signing and validation (JWT, HS256 or RS256)
//! - Authentication coordination
//!
//! Persistence of users and token records is left to the service; this crate
//! only deals with secrets and signatures.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).is_ok());
//! assert!(hasher.verify("not_my_password", &hash).is_err());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{AccessClaims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::hs256(b"secret_key_at_least_32_bytes_long!");
//! let claims = AccessClaims::new(1, "token-id", "alice", Duration::hours(1));
//! let token = handler.encode(&claims).unwrap();
//! let decoded: AccessClaims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "1");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtHandler};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(
//!     JwtHandler::hs256(b"secret_key_at_least_32_bytes_long!"),
//!     Duration::hours(24),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! auth.verify_password("password123", &hash).unwrap();
//! let issued = auth.issue_token(1, "token-id", "alice").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.jti, "token-id");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jsonwebtoken::Algorithm;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
