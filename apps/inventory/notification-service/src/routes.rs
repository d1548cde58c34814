use axum::{Json, Router, routing::get};
use domain_notifications::{NotificationRepository, NotificationService};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "Notification Service", description = "Per-user notification inbox"),
    nest((path = "/api/v1", api = domain_notifications::handlers::ApiDoc))
)]
pub struct ApiDoc;

pub fn api_router<R>(repository: Arc<R>) -> Router
where
    R: NotificationRepository + 'static,
{
    let service = NotificationService::from_arc(repository);
    Router::new().nest("/api/v1", domain_notifications::handlers::router(service))
}

pub fn docs_router() -> Router {
    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}
