use thiserror::Error;

use crate::domain::access_token::errors::AccessTokenError;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Name may only contain letters, digits, dots, underscores and hyphens")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for registration, login and user lookups
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("Invalid name: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    // Domain-level errors
    #[error("User not found with name: {0}")]
    NotFoundByName(String),

    #[error("Name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Password does not match")]
    PasswordMismatch,

    #[error("Credential processing failed: {0}")]
    Credentials(String),

    #[error("Access token error: {0}")]
    AccessToken(#[from] AccessTokenError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
