use thiserror::Error;

use crate::domain::contact::models::ContactId;
use crate::domain::user::models::UserId;

/// Error for ContactId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactIdError {
    #[error("Invalid contact id: {0}")]
    InvalidFormat(String),
}

/// Error for contact name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactNameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for phone number validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Phone number may only contain digits, spaces and + - ( ) .")]
    InvalidCharacters,
}

/// Top-level error for contact operations
#[derive(Debug, Clone, Error)]
pub enum ContactError {
    #[error("Invalid contact ID: {0}")]
    InvalidContactId(#[from] ContactIdError),

    // Domain-level errors
    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    #[error("Contact {contact_id} does not belong to user {user_id}")]
    Forbidden {
        contact_id: ContactId,
        user_id: UserId,
    },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
