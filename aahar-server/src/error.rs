use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServiceUnavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    status: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "E_NOT_FOUND", message),
            ApiError::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "E_SERVICE_UNAVAILABLE",
                message,
            ),
            ApiError::Internal(message) => {
                tracing::error!(message = %message, "internal error reached the boundary");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E_INTERNAL",
                    message,
                )
            }
        };

        let body = ErrorBody {
            code: code.to_string(),
            message,
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
