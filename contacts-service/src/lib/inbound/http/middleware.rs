use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::access_token::models::AccessToken;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type holding the caller resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: AccessToken,
}

/// Middleware that resolves the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let authentication = state
        .access_token_service
        .authenticate(token)
        .await
        .map_err(|e| {
            if e.is_rejection() {
                tracing::warn!(error = %e, "Bearer token rejected");
            }
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user: authentication.user,
        access_token: authentication.access_token,
    });

    Ok(next.run(req).await)
}

/// Accepts both a raw token and `Bearer <token>`.
fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            ApiError::unauthenticated()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        ApiError::unauthenticated()
    })?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .unwrap_or(auth_str)
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthenticated());
    }

    Ok(token)
}
