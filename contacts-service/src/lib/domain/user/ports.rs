use async_trait::async_trait;

use crate::domain::access_token::models::IssuedAccessToken;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for registration and login.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new user and issue their first access token.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Credentials` - Password hashing failed
    /// * `AccessToken` - Token could not be issued; the user is not kept
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand)
        -> Result<IssuedAccessToken, UserError>;

    /// Check credentials and issue a new access token.
    ///
    /// # Errors
    /// * `NotFoundByName` - No user with this name
    /// * `PasswordMismatch` - Password is wrong
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedAccessToken, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by login name.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Remove a user.
    ///
    /// Deleting an unknown id is not an error.
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
