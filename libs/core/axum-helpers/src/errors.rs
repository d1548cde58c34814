use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use strum::{AsRefStr, Display};
use utoipa::ToSchema;

/// Transport-neutral classification of a use-case failure.
///
/// Every domain error maps onto exactly one kind; the HTTP layer only ever
/// looks at the kind, never at message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Internal,
    /// The message queue rejected or could not take a publish
    Publish,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal | ErrorKind::Publish => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(kind: ErrorKind, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: message.into(),
    };
    (kind.status_code(), Json(body)).into_response()
}

/// Router fallback
pub async fn not_found() -> Response {
    error_response(ErrorKind::NotFound, "route not found")
}
