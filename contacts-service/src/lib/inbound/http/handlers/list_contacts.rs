use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::ContactData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ListContactsResponseData>, ApiError> {
    state
        .contacts_service
        .list_contacts(&auth_user.user.id)
        .await
        .map_err(ApiError::from)
        .map(|contacts| {
            ApiSuccess::new(
                StatusCode::OK,
                ListContactsResponseData {
                    contacts: contacts.iter().map(ContactData::from).collect(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListContactsResponseData {
    pub contacts: Vec<ContactData>,
}
