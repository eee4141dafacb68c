use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered user
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login name value type
///
/// 1-255 characters; letters, digits, dot, underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 255;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Name is empty
    /// * `TooLong` - Name longer than 255 characters
    /// * `InvalidCharacters` - Contains characters other than alphanumerics, `.`, `_` and `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 255;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `TooLong` - More than 255 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `TooLong` - More than 255 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    pub fn new(name: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to log an existing user in.
///
/// The password is not checked against the registration policy: old
/// accounts must still be able to log in after the policy changes.
pub struct LoginCommand {
    pub name: Username,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}
