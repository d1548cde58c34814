use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Catalog entry. Names are unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CloudResource {
    pub id: i64,
    pub name: String,
    /// Free-form kind such as `VPC`, `Compute` or `Database`
    #[serde(rename = "type")]
    pub resource_type: String,
    pub region: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of a catalog entry's mutable fields (`PUT /resources/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UpdateCloudResource {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub resource_type: String,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub region: String,
}

/// Body of `POST /customers/{id}/resources`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddResource {
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub resource_name: String,
}

/// Body of `POST /customers/{id}/resources/bulk`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddResources {
    #[validate(length(max = 100, message = "must list at most 100 names"))]
    pub resource_names: Vec<String>,
}
