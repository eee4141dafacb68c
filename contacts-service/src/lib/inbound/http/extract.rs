use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::inbound::http::handlers::ApiError;

/// Request body accepted either as JSON or as a urlencoded form.
///
/// A missing or blank body yields `T::default()`, so field validation still
/// reports every required field instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for RequestBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(body) = Form::<T>::from_request(req, state).await?;
            return Ok(Self(body));
        }

        let bytes = Bytes::from_request(req, state).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(body) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(body))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
