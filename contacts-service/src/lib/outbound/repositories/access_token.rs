use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::access_token::models::AccessToken;
use crate::domain::access_token::models::AccessTokenId;
use crate::domain::access_token::ports::AccessTokenRepository;
use crate::domain::user::models::UserId;

pub struct PostgresAccessTokenRepository {
    pool: PgPool,
}

impl PostgresAccessTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccessTokenRow {
    id: Uuid,
    user_id: i64,
    revoked: bool,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<AccessTokenRow> for AccessToken {
    fn from(row: AccessTokenRow) -> Self {
        AccessToken {
            id: AccessTokenId(row.id),
            user_id: UserId(row.user_id),
            revoked: row.revoked,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl AccessTokenRepository for PostgresAccessTokenRepository {
    async fn create(&self, token: AccessToken) -> Result<AccessToken, AccessTokenError> {
        sqlx::query(
            r#"
            INSERT INTO access_tokens (id, user_id, revoked, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(token.id.0)
        .bind(token.user_id.0)
        .bind(token.revoked)
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AccessTokenError::DatabaseError(e.to_string()))?;

        Ok(token)
    }

    async fn find_by_id(
        &self,
        id: &AccessTokenId,
    ) -> Result<Option<AccessToken>, AccessTokenError> {
        let row = sqlx::query_as::<_, AccessTokenRow>(
            r#"
            SELECT id, user_id, revoked, created_at, expires_at
            FROM access_tokens
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccessTokenError::DatabaseError(e.to_string()))?;

        Ok(row.map(AccessToken::from))
    }

    async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError> {
        let result = sqlx::query(
            r#"
            UPDATE access_tokens
            SET revoked = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AccessTokenError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccessTokenError::NotFound(*id));
        }

        Ok(())
    }
}
