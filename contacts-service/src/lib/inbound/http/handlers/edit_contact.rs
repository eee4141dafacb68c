use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContactResponseData;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::ContactId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn edit_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let contact_id = ContactId::from_string(&id).map_err(ContactError::from)?;

    state
        .contacts_service
        .edit_contact(&auth_user.user.id, &contact_id)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}
