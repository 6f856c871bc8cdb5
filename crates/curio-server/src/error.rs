//! Mapping from core error outcomes to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use curio_core::error::CurioError;
use serde_json::json;

/// Response wrapper for [`CurioError`]. The status codes here are a
/// rendering choice of this transport layer; the core only produces
/// typed outcomes.
pub struct ApiError(pub CurioError);

impl From<CurioError> for ApiError {
    fn from(err: CurioError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            CurioError::Validation { message } => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", message)
            }
            CurioError::AlreadyExists { entity } => json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("{entity} already exists"),
            ),
            CurioError::AuthenticationFailed { reason } => {
                json_error(StatusCode::UNAUTHORIZED, "authentication_failed", reason)
            }
            CurioError::Forbidden { reason } => {
                json_error(StatusCode::FORBIDDEN, "forbidden", reason)
            }
            CurioError::NotFound { .. } => {
                // Absent and cross-tenant are the same 404; the entity
                // detail stays server-side.
                json_error(StatusCode::NOT_FOUND, "not_found", "not found")
            }
            CurioError::InvalidTransition { current, attempted } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "invalid_transition",
                    "message": format!(
                        "cannot {attempted} a product with status {current}"
                    ),
                    "current_status": current,
                    "attempted": attempted,
                })),
            )
                .into_response(),
            err @ (CurioError::Database(_) | CurioError::Internal(_)) => {
                tracing::error!("internal server error: {err}");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "an unexpected error occurred",
                )
            }
        }
    }
}

fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
