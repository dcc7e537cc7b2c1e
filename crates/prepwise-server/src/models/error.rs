//! Failure envelope shared by every endpoint

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{success: false, error}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiErrorBody>);

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ApiErrorBody::new(message)))
}

/// Response for a request body that is not valid JSON for the endpoint
pub fn invalid_body<E: std::fmt::Display>(rejection: E) -> ApiError {
    tracing::debug!("Rejected request body: {}", rejection);
    api_error(StatusCode::BAD_REQUEST, "Invalid request body")
}
