use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health_check() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: &'static str,
    pub version: &'static str,
}
