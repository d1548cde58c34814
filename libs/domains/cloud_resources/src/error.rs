use axum::response::{IntoResponse, Response};
use axum_helpers::{ErrorKind, error_response};
use domain_customers::CustomerError;

pub type CloudResourceResult<T> = Result<T, CloudResourceError>;

#[derive(Debug, thiserror::Error)]
pub enum CloudResourceError {
    #[error("{0}")]
    Validation(String),

    #[error("customer not found")]
    CustomerNotFound(i64),

    #[error("resource not found")]
    NotFound(i64),

    /// No catalog entry carries this name
    #[error("resource {0} does not exist")]
    UnknownResource(String),

    #[error("customer already has {0} resource")]
    AlreadyAssigned(String),

    /// Another catalog entry already uses this name
    #[error("resource with name {0} already exists")]
    DuplicateName(String),

    #[error("internal server error")]
    Internal(String),
}

impl CloudResourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::CustomerNotFound(_) | Self::NotFound(_) | Self::UnknownResource(_) => {
                ErrorKind::NotFound
            }
            Self::AlreadyAssigned(_) | Self::DuplicateName(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<CustomerError> for CloudResourceError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::NotFound(id) => Self::CustomerNotFound(id),
            CustomerError::Validation(msg) => Self::Validation(msg),
            CustomerError::Internal(cause) => Self::Internal(cause),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for CloudResourceError {
    fn into_response(self) -> Response {
        if let Self::Internal(cause) = &self {
            tracing::error!(error = %cause, "Cloud resource request failed");
        }
        error_response(self.kind(), self.to_string())
    }
}
