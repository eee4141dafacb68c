use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::contact::errors::ContactIdError;
use crate::domain::contact::errors::ContactNameError;
use crate::domain::contact::errors::PhoneNumberError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

/// Contact aggregate entity.
///
/// Always owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: UserId,
    pub details: ContactDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }

    /// Replace every editable field and bump `updated_at`.
    pub fn replace_details(self, details: ContactDetails, now: DateTime<Utc>) -> Self {
        Self {
            details,
            updated_at: now,
            ..self
        }
    }
}

/// A contact that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub user_id: UserId,
    pub details: ContactDetails,
    pub created_at: DateTime<Utc>,
}

impl NewContact {
    pub fn new(user_id: UserId, details: ContactDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            details,
            created_at,
        }
    }

    pub fn with_id(self, id: ContactId) -> Contact {
        Contact {
            id,
            user_id: self.user_id,
            details: self.details,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Editable fields of a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactDetails {
    pub first_name: ContactName,
    pub last_name: Option<ContactName>,
    pub email: Option<EmailAddress>,
    pub phone_number: Option<PhoneNumber>,
}

impl ContactDetails {
    pub fn new(first_name: ContactName) -> Self {
        Self {
            first_name,
            last_name: None,
            email: None,
            phone_number: None,
        }
    }

    pub fn with_last_name(mut self, last_name: Option<ContactName>) -> Self {
        self.last_name = last_name;
        self
    }

    pub fn with_email(mut self, email: Option<EmailAddress>) -> Self {
        self.email = email;
        self
    }

    pub fn with_phone_number(mut self, phone_number: Option<PhoneNumber>) -> Self {
        self.phone_number = phone_number;
        self
    }
}

/// Contact unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub i64);

impl ContactId {
    /// Parse a contact ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, ContactIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(ContactId(id)),
            _ => Err(ContactIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a contact.
///
/// Stored trimmed; 1-255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Blank after trimming
    /// * `TooLong` - Longer than 255 characters
    pub fn new(name: String) -> Result<Self, ContactNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(ContactNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ContactNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free-form phone number: digits, spaces and `+ - ( ) .`, up to 32 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MAX_LENGTH: usize = 32;

    /// # Errors
    /// * `TooLong` - Longer than 32 characters
    /// * `InvalidCharacters` - Contains anything but digits, spaces and `+-().`
    pub fn new(phone_number: String) -> Result<Self, PhoneNumberError> {
        let phone_number = phone_number.trim().to_string();
        let length = phone_number.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PhoneNumberError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if !phone_number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'))
        {
            return Err(PhoneNumberError::InvalidCharacters);
        }

        Ok(Self(phone_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
