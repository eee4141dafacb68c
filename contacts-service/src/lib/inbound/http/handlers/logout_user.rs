use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Revoke the token the request was authenticated with.
pub async fn logout_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<StatusCode, ApiError> {
    state
        .access_token_service
        .revoke(&auth_user.access_token.id)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(user_id = %auth_user.user.id, "User logged out");

    Ok(StatusCode::NO_CONTENT)
}
