use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use domain_customers::CustomerRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::CloudResourceResult,
    models::{AddResource, AddResources, CloudResource, UpdateCloudResource},
    repository::CloudResourceRepository,
    service::CloudResourceService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        list_resources,
        update_resource,
        delete_resource,
        add_resource,
        add_resources,
        list_customer_resources
    ),
    components(schemas(
        CloudResource,
        UpdateCloudResource,
        AddResource,
        AddResources,
        ErrorResponse
    )),
    tags((name = "resources", description = "Resource catalog and customer assignments"))
)]
pub struct ApiDoc;

type SharedService<R, C> = Arc<CloudResourceService<R, C>>;

pub fn router<R, C>(service: CloudResourceService<R, C>) -> Router
where
    R: CloudResourceRepository + 'static,
    C: CustomerRepository + 'static,
{
    Router::new()
        .route("/resources", get(list_resources::<R, C>))
        .route(
            "/resources/{id}",
            put(update_resource::<R, C>).delete(delete_resource::<R, C>),
        )
        .route(
            "/customers/{id}/resources",
            post(add_resource::<R, C>).get(list_customer_resources::<R, C>),
        )
        .route("/customers/{id}/resources/bulk", post(add_resources::<R, C>))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "/resources",
    tag = "resources",
    responses((status = 200, description = "Whole catalog", body = Vec<CloudResource>))
)]
async fn list_resources<R, C>(
    State(service): State<SharedService<R, C>>,
) -> CloudResourceResult<Json<Vec<CloudResource>>>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    Ok(Json(service.get_all_available_resources().await?))
}

#[utoipa::path(
    put,
    path = "/resources/{id}",
    tag = "resources",
    params(("id" = i64, Path, description = "Resource ID")),
    request_body = UpdateCloudResource,
    responses(
        (status = 200, description = "Resource replaced", body = CloudResource),
        (status = 400, description = "Blank name, type or region", body = ErrorResponse),
        (status = 404, description = "No such resource", body = ErrorResponse),
        (status = 409, description = "Name used by another resource", body = ErrorResponse),
    )
)]
async fn update_resource<R, C>(
    State(service): State<SharedService<R, C>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCloudResource>,
) -> CloudResourceResult<Json<CloudResource>>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    let updated = service
        .update_resource(id, &input.name, &input.resource_type, &input.region)
        .await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/resources/{id}",
    tag = "resources",
    params(("id" = i64, Path, description = "Resource ID")),
    responses(
        (status = 204, description = "Resource and its assignments removed"),
        (status = 404, description = "No such resource", body = ErrorResponse),
    )
)]
async fn delete_resource<R, C>(
    State(service): State<SharedService<R, C>>,
    IdPath(id): IdPath,
) -> CloudResourceResult<StatusCode>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    service.delete_resource(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/customers/{id}/resources",
    tag = "resources",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = AddResource,
    responses(
        (status = 201, description = "Resource assigned", body = CloudResource),
        (status = 400, description = "Blank resource name", body = ErrorResponse),
        (status = 404, description = "Unknown customer or resource", body = ErrorResponse),
        (status = 409, description = "Already assigned", body = ErrorResponse),
    )
)]
async fn add_resource<R, C>(
    State(service): State<SharedService<R, C>>,
    IdPath(customer_id): IdPath,
    ValidatedJson(input): ValidatedJson<AddResource>,
) -> CloudResourceResult<impl IntoResponse>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    let resource = service
        .add_cloud_resource(customer_id, &input.resource_name)
        .await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    post,
    path = "/customers/{id}/resources/bulk",
    tag = "resources",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = AddResources,
    responses(
        (status = 201, description = "All resources assigned", body = Vec<CloudResource>),
        (status = 400, description = "Empty list or blank name", body = ErrorResponse),
        (status = 404, description = "Unknown customer or resource", body = ErrorResponse),
        (status = 409, description = "One of them is already assigned", body = ErrorResponse),
    )
)]
async fn add_resources<R, C>(
    State(service): State<SharedService<R, C>>,
    IdPath(customer_id): IdPath,
    ValidatedJson(input): ValidatedJson<AddResources>,
) -> CloudResourceResult<impl IntoResponse>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    let added = service
        .add_cloud_resources(customer_id, &input.resource_names)
        .await?;
    Ok((StatusCode::CREATED, Json(added)))
}

#[utoipa::path(
    get,
    path = "/customers/{id}/resources",
    tag = "resources",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Resources assigned to the customer", body = Vec<CloudResource>),
        (status = 404, description = "No such customer", body = ErrorResponse),
    )
)]
async fn list_customer_resources<R, C>(
    State(service): State<SharedService<R, C>>,
    IdPath(customer_id): IdPath,
) -> CloudResourceResult<Json<Vec<CloudResource>>>
where
    R: CloudResourceRepository,
    C: CustomerRepository,
{
    Ok(Json(service.get_resources_by_customer(customer_id).await?))
}
