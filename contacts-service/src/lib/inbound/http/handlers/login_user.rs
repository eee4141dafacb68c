use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::extract::RequestBody;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::ValidationErrors;

/// Check credentials and answer with a new bearer token.
pub async fn login_user(
    State(state): State<AppState>,
    RequestBody(body): RequestBody<LoginUserRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    let (name, password) = body.try_into_parts()?;

    // A name that could never have been registered is just an unknown user.
    let name = Username::new(name.clone()).map_err(|_| {
        tracing::warn!(name = %name, "Login rejected: malformed name");
        ApiError::from(UserError::NotFoundByName(name))
    })?;

    state
        .authentication_service
        .login(LoginCommand { name, password })
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Login failed");
            ApiError::from(e)
        })
        .map(|issued| ApiSuccess::new(StatusCode::OK, issued.token))
}

/// HTTP request body for logging in (JSON or form)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginUserRequest {
    name: Option<String>,
    password: Option<String>,
}

impl LoginUserRequest {
    fn try_into_parts(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.required("name", self.name, Ok::<_, Infallible>);
        let password = errors.required("password", self.password, Ok::<_, Infallible>);

        match (name, password) {
            (Some(name), Some(password)) => Ok((name, password)),
            _ => Err(errors),
        }
    }
}
