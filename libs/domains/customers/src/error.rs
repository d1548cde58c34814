use axum::response::{IntoResponse, Response};
use axum_helpers::{ErrorKind, error_response};

pub type CustomerResult<T> = Result<T, CustomerError>;

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("{0}")]
    Validation(String),

    #[error("customer not found")]
    NotFound(i64),

    #[error("customer with this email already exists")]
    DuplicateEmail(String),

    /// The cause is kept for logs and never shown to callers
    #[error("internal server error")]
    Internal(String),
}

impl CustomerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateEmail(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            tracing::error!(error = %cause, "Customer request failed");
        }
        error_response(self.kind(), self.to_string())
    }
}
