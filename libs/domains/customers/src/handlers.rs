use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::CustomerResult,
    models::{CreateCustomer, Customer},
    repository::CustomerRepository,
    service::CustomerService,
};

#[derive(OpenApi)]
#[openapi(
    paths(create_customer, get_customer),
    components(schemas(Customer, CreateCustomer, ErrorResponse)),
    tags((name = "customers", description = "Customer registration and lookup"))
)]
pub struct ApiDoc;

/// Routes are absolute under the API prefix so they merge cleanly with the
/// `/customers/{id}/resources` routes owned by the resources domain.
pub fn router<R>(service: CustomerService<R>) -> Router
where
    R: CustomerRepository + 'static,
{
    Router::new()
        .route("/customers", post(create_customer::<R>))
        .route("/customers/{id}", get(get_customer::<R>))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Blank name or email", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
    )
)]
async fn create_customer<R>(
    State(service): State<Arc<CustomerService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCustomer>,
) -> CustomerResult<impl IntoResponse>
where
    R: CustomerRepository,
{
    let customer = service.create_customer(&input.name, &input.email).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 404, description = "No such customer", body = ErrorResponse),
    )
)]
async fn get_customer<R>(
    State(service): State<Arc<CustomerService<R>>>,
    IdPath(id): IdPath,
) -> CustomerResult<Json<Customer>>
where
    R: CustomerRepository,
{
    Ok(Json(service.get_customer_by_id(id).await?))
}
