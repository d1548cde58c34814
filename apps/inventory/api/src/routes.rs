use axum::{Json, Router, routing::get};
use domain_cloud_resources::{CloudResourceRepository, CloudResourceService};
use domain_customers::{CustomerRepository, CustomerService};
use domain_notifications::NotificationPublisher;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::openapi::ApiDoc;

/// Versioned API routes over the given repositories.
///
/// The customer repository is shared: the resources service uses it to
/// check that a customer exists before assigning anything.
pub fn api_router<C, R>(
    customers: C,
    resources: R,
    publisher: Option<Arc<dyn NotificationPublisher>>,
) -> Router
where
    C: CustomerRepository + Clone + 'static,
    R: CloudResourceRepository + 'static,
{
    let mut resource_service = CloudResourceService::new(resources, customers.clone());
    if let Some(publisher) = publisher {
        resource_service = resource_service.with_publisher(publisher);
    }

    let v1 = domain_customers::handlers::router(CustomerService::new(customers))
        .merge(domain_cloud_resources::handlers::router(resource_service));

    Router::new().nest("/api/v1", v1)
}

pub fn docs_router() -> Router {
    Router::new()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_cloud_resources::InMemoryCloudResourceRepository;
    use domain_customers::InMemoryCustomerRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_routes_are_versioned() {
        let app = api_router(
            InMemoryCustomerRepository::new(),
            InMemoryCloudResourceRepository::with_default_catalog().await,
            None,
        );

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/customers")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"name": "ebuka", "email": "ebuka@x.com"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/customers/1/resources")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({"resource_name": "gcp_vm_instance"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/resources")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_openapi_lists_versioned_paths() {
        let response = docs_router()
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let spec = json_body(response.into_body()).await;
        let paths = spec["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/v1/customers"));
        assert!(paths.contains_key("/api/v1/customers/{id}/resources/bulk"));
        assert!(paths.contains_key("/api/v1/resources/{id}"));
    }
}
