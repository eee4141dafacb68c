use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: Username::new(row.name)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_name_key") {
                        return UserError::NameAlreadyExists(user.name.to_string());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return UserError::EmailAlreadyExists(user.email.to_string());
                    }
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user.with_id(UserId(id)))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
