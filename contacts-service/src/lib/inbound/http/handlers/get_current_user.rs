use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::AuthenticatedUser;

pub async fn get_current_user(
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&auth_user.user).into()))
}

/// Public profile of a user; never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}
