use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordError;
use chrono::Utc;

use crate::domain::access_token::models::IssuedAccessToken;
use crate::domain::access_token::ports::AccessTokenServicePort;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticationServicePort;
use crate::user::ports::UserRepository;

/// Domain service for registration and login.
pub struct AuthenticationService<UR, AT>
where
    UR: UserRepository,
    AT: AccessTokenServicePort,
{
    repository: Arc<UR>,
    access_tokens: Arc<AT>,
    authenticator: Arc<Authenticator>,
}

impl<UR, AT> AuthenticationService<UR, AT>
where
    UR: UserRepository,
    AT: AccessTokenServicePort,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `access_tokens` - Token issuing service
    /// * `authenticator` - Password hashing and verification
    pub fn new(
        repository: Arc<UR>,
        access_tokens: Arc<AT>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            repository,
            access_tokens,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR, AT> AuthenticationServicePort for AuthenticationService<UR, AT>
where
    UR: UserRepository,
    AT: AccessTokenServicePort,
{
    async fn register(
        &self,
        command: RegisterUserCommand,
    ) -> Result<IssuedAccessToken, UserError> {
        if self.repository.find_by_name(&command.name).await?.is_some() {
            return Err(UserError::NameAlreadyExists(command.name.to_string()));
        }

        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())
            .map_err(|e| UserError::Credentials(e.to_string()))?;

        // The store enforces uniqueness again for concurrent registrations.
        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        let issued = match self.access_tokens.create_token(&user).await {
            Ok(issued) => issued,
            Err(e) => {
                // Without a token the registration did not happen.
                if let Err(cleanup) = self.repository.delete(&user.id).await {
                    tracing::error!(
                        user_id = %user.id,
                        error = %cleanup,
                        "Failed to remove user after token issue failure"
                    );
                }
                return Err(e.into());
            }
        };

        tracing::info!(user_id = %user.id, name = %user.name, "User registered");

        Ok(issued)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedAccessToken, UserError> {
        let user = self
            .repository
            .find_by_name(&command.name)
            .await?
            .ok_or_else(|| UserError::NotFoundByName(command.name.to_string()))?;

        self.authenticator
            .verify_password(&command.password, &user.password_hash)
            .map_err(|e| match e {
                PasswordError::Mismatch => UserError::PasswordMismatch,
                other => UserError::Credentials(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(self.access_tokens.create_token(&user).await?)
    }
}

#[cfg(test)]
mod tests {
    use auth::JwtHandler;
    use auth::PasswordHasher;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::access_token::errors::AccessTokenError;
    use crate::domain::access_token::models::AccessToken;
    use crate::domain::access_token::models::AccessTokenId;
    use crate::domain::access_token::models::Authentication;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::Username;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestAccessTokenService {}

        #[async_trait]
        impl AccessTokenServicePort for TestAccessTokenService {
            async fn create_token(&self, user: &User) -> Result<IssuedAccessToken, AccessTokenError>;
            async fn get_access_token(&self, token: &str) -> Result<AccessToken, AccessTokenError>;
            async fn authenticate(&self, token: &str) -> Result<Authentication, AccessTokenError>;
            async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(
            Authenticator::new(
                JwtHandler::hs256(b"test-secret-key-for-jwt-signing-at-least-32-bytes"),
                Duration::hours(1),
            )
            .with_password_hasher(PasswordHasher::with_cost(1024, 1, 1).unwrap()),
        )
    }

    fn issued_for(user: &User) -> IssuedAccessToken {
        IssuedAccessToken {
            token: format!("token-for-{}", user.id),
            access_token: AccessToken {
                id: AccessTokenId::new(),
                user_id: user.id,
                revoked: false,
                created_at: Utc::now(),
                expires_at: Utc::now() + Duration::hours(1),
            },
        }
    }

    fn register_command(name: &str, email: &str) -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new(name.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        )
    }

    fn stored_user(authenticator: &Authenticator, password: &str) -> User {
        User {
            id: UserId(5),
            name: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();

        repository.expect_find_by_name().returning(|_| Ok(None));
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|user| {
                user.name.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(1))));

        access_tokens
            .expect_create_token()
            .withf(|user| user.id == UserId(1))
            .times(1)
            .returning(|user| Ok(issued_for(user)));

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator(),
        );

        let issued = service
            .register(register_command("testuser", "test@example.com"))
            .await
            .unwrap();

        assert_eq!(issued.token, "token-for-1");
        assert_eq!(issued.access_token.user_id, UserId(1));
    }

    #[tokio::test]
    async fn test_register_removes_user_when_token_fails() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();

        repository.expect_find_by_name().returning(|_| Ok(None));
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(3))));
        repository
            .expect_delete()
            .withf(|id| *id == UserId(3))
            .times(1)
            .returning(|_| Ok(()));

        access_tokens
            .expect_create_token()
            .times(1)
            .returning(|_| Err(AccessTokenError::DatabaseError("down".to_string())));

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator(),
        );

        let result = service
            .register(register_command("testuser", "test@example.com"))
            .await;

        assert!(matches!(
            result,
            Err(UserError::AccessToken(AccessTokenError::DatabaseError(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_name() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();
        let authenticator = authenticator();

        let existing = stored_user(&authenticator, "password123");
        repository
            .expect_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);
        access_tokens.expect_create_token().times(0);

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator,
        );

        let result = service
            .register(register_command("testuser", "other@example.com"))
            .await;

        assert!(matches!(result, Err(UserError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();
        let access_tokens = MockTestAccessTokenService::new();
        let authenticator = authenticator();

        let existing = stored_user(&authenticator, "password123");
        repository.expect_find_by_name().returning(|_| Ok(None));
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator,
        );

        let result = service
            .register(register_command("someoneelse", "test@example.com"))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_race_reported_by_store() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();

        repository.expect_find_by_name().returning(|_| Ok(None));
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|user| Err(UserError::NameAlreadyExists(user.name.to_string())));
        access_tokens.expect_create_token().times(0);

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator(),
        );

        let result = service
            .register(register_command("testuser", "test@example.com"))
            .await;

        assert!(matches!(result, Err(UserError::NameAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();
        let authenticator = authenticator();

        let user = stored_user(&authenticator, "password123");
        repository
            .expect_find_by_name()
            .withf(|name| name.as_str() == "testuser")
            .returning(move |_| Ok(Some(user.clone())));
        access_tokens
            .expect_create_token()
            .times(1)
            .returning(|user| Ok(issued_for(user)));

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator,
        );

        let issued = service
            .login(LoginCommand {
                name: Username::new("testuser".to_string()).unwrap(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(issued.access_token.user_id, UserId(5));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let mut access_tokens = MockTestAccessTokenService::new();
        let authenticator = authenticator();

        let user = stored_user(&authenticator, "password123");
        repository
            .expect_find_by_name()
            .returning(move |_| Ok(Some(user.clone())));
        access_tokens.expect_create_token().times(0);

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator,
        );

        let result = service
            .login(LoginCommand {
                name: Username::new("testuser".to_string()).unwrap(),
                password: "password123.".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repository = MockTestUserRepository::new();
        let access_tokens = MockTestAccessTokenService::new();

        repository.expect_find_by_name().returning(|_| Ok(None));

        let service = AuthenticationService::new(
            Arc::new(repository),
            Arc::new(access_tokens),
            authenticator(),
        );

        let result = service
            .login(LoginCommand {
                name: Username::new("ghost".to_string()).unwrap(),
                password: "whatever".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::NotFoundByName(_))));
    }
}
