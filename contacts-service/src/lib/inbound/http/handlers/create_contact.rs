use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContactRequestBody;
use super::ContactResponseData;
use crate::inbound::http::extract::RequestBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    RequestBody(body): RequestBody<ContactRequestBody>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let details = body.try_into_details()?;

    state
        .contacts_service
        .create_contact(&auth_user.user.id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}
