use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Password does not match")]
    Mismatch,

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}
