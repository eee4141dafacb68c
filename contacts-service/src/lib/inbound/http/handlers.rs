use axum::extract::rejection::BytesRejection;
use axum::extract::rejection::FormRejection;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactDetails;
use crate::domain::contact::models::ContactName;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::validation::ValidationErrors;
use crate::user::errors::UserError;

pub mod create_contact;
pub mod delete_contact;
pub mod edit_contact;
pub mod get_current_user;
pub mod health_check;
pub mod list_contacts;
pub mod login_user;
pub mod logout_user;
pub mod register_user;
pub mod update_contact;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
}

impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized("Unauthenticated.".to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::UnprocessableEntity(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::UnprocessableEntity(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::UnprocessableEntity(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorBody::new(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    ),
                )
            }
            ApiError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::new(StatusCode::UNPROCESSABLE_ENTITY, msg),
            ),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorBody::with_errors(StatusCode::UNPROCESSABLE_ENTITY, errors),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody::new(StatusCode::UNAUTHORIZED, msg),
            ),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ApiErrorBody::new(StatusCode::FORBIDDEN, msg),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody::new(StatusCode::NOT_FOUND, msg),
            ),
            ApiError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ApiErrorBody::new(StatusCode::CONFLICT, msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            UserError::NotFoundByName(_) | UserError::PasswordMismatch => {
                ApiError::Unauthorized("These credentials do not match our records.".to_string())
            }
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::AccessToken(e) => ApiError::from(e),
            UserError::Credentials(_) | UserError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AccessTokenError> for ApiError {
    fn from(err: AccessTokenError) -> Self {
        if err.is_rejection() {
            ApiError::unauthenticated()
        } else {
            ApiError::InternalServerError(err.to_string())
        }
    }
}

impl From<ContactError> for ApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::NotFound(_) | ContactError::InvalidContactId(_) => {
                ApiError::NotFound(err.to_string())
            }
            ContactError::Forbidden { .. } => {
                ApiError::Forbidden("This action is unauthorized.".to_string())
            }
            ContactError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

/// Generic response structure shared by all API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

/// Error body; `errors` is only present for field validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ValidationErrors>,
}

impl ApiErrorBody {
    pub fn new(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message,
            errors: None,
        }
    }

    pub fn with_errors(status_code: StatusCode, errors: ValidationErrors) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message: "The given data was invalid.".to_string(),
            errors: Some(errors),
        }
    }
}

/// HTTP request body for creating or replacing a contact (JSON or form).
///
/// Unknown keys such as `id` or `user_id` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactRequestBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ContactRequestBody {
    pub fn try_into_details(self) -> Result<ContactDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = errors.required("first_name", self.first_name, ContactName::new);
        let last_name = errors.optional("last_name", self.last_name, ContactName::new);
        let email = errors.optional("email", self.email, EmailAddress::new);
        let phone_number = errors.optional("phone_number", self.phone_number, PhoneNumber::new);

        match first_name {
            Some(first_name) if errors.is_empty() => Ok(ContactDetails::new(first_name)
                .with_last_name(last_name)
                .with_email(email)
                .with_phone_number(phone_number)),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactData {
    pub id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Contact> for ContactData {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.0,
            user_id: contact.user_id.0,
            first_name: contact.details.first_name.as_str().to_string(),
            last_name: contact
                .details
                .last_name
                .as_ref()
                .map(|n| n.as_str().to_string()),
            email: contact.details.email.as_ref().map(|e| e.as_str().to_string()),
            phone_number: contact
                .details
                .phone_number
                .as_ref()
                .map(|p| p.as_str().to_string()),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// `{"contact": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactResponseData {
    pub contact: ContactData,
}

impl From<&Contact> for ContactResponseData {
    fn from(contact: &Contact) -> Self {
        Self {
            contact: contact.into(),
        }
    }
}
