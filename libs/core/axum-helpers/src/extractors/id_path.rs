use crate::errors::{ErrorKind, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::Response,
};

/// Numeric `{id}` path segment.
///
/// Only the shape is checked here; range rules such as "must be positive"
/// belong to the use cases.
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| error_response(ErrorKind::Validation, e.body_text()))?;

        raw.trim()
            .parse::<i64>()
            .map(IdPath)
            .map_err(|_| error_response(ErrorKind::Validation, format!("invalid id: {}", raw)))
    }
}
