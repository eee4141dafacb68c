use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::ContactRequestBody;
use super::ContactResponseData;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::ContactId;
use crate::inbound::http::extract::RequestBody;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Replace the editable fields of a contact.
///
/// Existence and ownership are checked before the body is looked at, so a
/// stranger learns nothing from validation messages.
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<RequestBody<ContactRequestBody>, ApiError>,
) -> Result<ApiSuccess<ContactResponseData>, ApiError> {
    let owner = auth_user.user.id;
    let contact_id = ContactId::from_string(&id).map_err(ContactError::from)?;

    state
        .contacts_service
        .edit_contact(&owner, &contact_id)
        .await?;

    let RequestBody(body) = payload?;
    let details = body.try_into_details()?;

    state
        .contacts_service
        .update_contact(&owner, &contact_id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref contact| ApiSuccess::new(StatusCode::OK, contact.into()))
}
