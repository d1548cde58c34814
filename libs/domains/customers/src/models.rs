use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /customers`.
///
/// Blank values pass here and are rejected by the service with its own
/// messages; only the column widths are enforced at the edge.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub email: String,
}

/// Trimmed, checked input handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
}
