//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Routing errors
    #[error("No tenant for this host")]
    TenantNotFound,
    #[error("No product for this host")]
    ProductNotFound,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::TenantNotFound => (StatusCode::NOT_FOUND, "TENANT_NOT_FOUND", self.to_string()),
            ApiError::ProductNotFound => (StatusCode::NOT_FOUND, "PRODUCT_NOT_FOUND", self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
