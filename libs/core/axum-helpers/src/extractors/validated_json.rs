use crate::errors::{ErrorKind, error_response};
use axum::{
    extract::{FromRequest, Json, Request},
    response::Response,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// `Json<T>` that also runs `validator` rules.
///
/// Malformed bodies and rule violations both come back as 400 with the
/// standard `{"error": "..."}` body.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| error_response(ErrorKind::Validation, e.body_text()))?;

        data.validate().map_err(|e| {
            let mut fields: Vec<String> = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let reason = errors
                        .first()
                        .and_then(|err| err.message.as_ref().map(|m| m.to_string()))
                        .unwrap_or_else(|| "is invalid".to_string());
                    format!("{} {}", field, reason)
                })
                .collect();
            fields.sort();
            error_response(ErrorKind::Validation, fields.join(", "))
        })?;

        Ok(ValidatedJson(data))
    }
}
