use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::extract::RequestBody;
use crate::inbound::http::router::AppState;
use crate::inbound::http::validation::ValidationErrors;

/// Register a user and answer with their first bearer token.
pub async fn register_user(
    State(state): State<AppState>,
    RequestBody(body): RequestBody<RegisterUserRequest>,
) -> Result<ApiSuccess<String>, ApiError> {
    state
        .authentication_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|issued| ApiSuccess::new(StatusCode::OK, issued.token))
}

/// HTTP request body for registering a user (JSON or form)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterUserRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.required("name", self.name, Username::new);
        let email = errors.required("email", self.email, EmailAddress::new);
        let password = errors.required("password", self.password, Password::new);

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(RegisterUserCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }
}
