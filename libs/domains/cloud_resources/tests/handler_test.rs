//! Handler tests for the cloud resources domain
//!
//! The customers and resources routers are merged the way the API binary
//! merges them, over in-memory repositories.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_cloud_resources::*;
use domain_customers::{CustomerService, InMemoryCustomerRepository};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn app() -> Router {
    let customers = InMemoryCustomerRepository::new();
    let resources = InMemoryCloudResourceRepository::with_default_catalog().await;

    domain_customers::handlers::router(CustomerService::new(customers.clone()))
        .merge(handlers::router(CloudResourceService::new(resources, customers)))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create_customer(app: &Router, name: &str, email: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/customers",
            Some(json!({ "name": name, "email": email })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = json_body(response.into_body()).await;
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_assignment_scenario() {
    let app = app().await;
    let customer_id = create_customer(&app, "ebuka", "ebuka@x.com").await;
    assert_eq!(customer_id, 1);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/customers/1/resources",
            Some(json!({ "resource_name": "aws_vpc_main" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request("GET", "/customers/1/resources", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let owned: Vec<CloudResource> = json_body(response.into_body()).await;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "aws_vpc_main");

    let response = app
        .oneshot(request(
            "POST",
            "/customers/1/resources",
            Some(json!({ "resource_name": "aws_vpc_main" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "customer already has aws_vpc_main resource");
}

#[tokio::test]
async fn test_unknown_customer_and_resource_return_404() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/customers/7/resources",
            Some(json!({ "resource_name": "aws_vpc_main" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "customer not found");

    let customer_id = create_customer(&app, "a", "a@x.com").await;
    let response = app
        .oneshot(request(
            "POST",
            &format!("/customers/{}/resources", customer_id),
            Some(json!({ "resource_name": "oracle_db" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "resource oracle_db does not exist");
}

#[tokio::test]
async fn test_bulk_add_with_unknown_name_assigns_nothing() {
    let app = app().await;
    let customer_id = create_customer(&app, "a", "a@x.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/customers/{}/resources/bulk", customer_id),
            Some(json!({ "resource_names": ["aws_vpc_main", "oracle_db"] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/customers/{}/resources", customer_id),
            None,
        ))
        .await
        .unwrap();
    let owned: Vec<CloudResource> = json_body(response.into_body()).await;
    assert!(owned.is_empty());

    let response = app
        .oneshot(request(
            "POST",
            &format!("/customers/{}/resources/bulk", customer_id),
            Some(json!({ "resource_names": ["aws_vpc_main", "azure_sql_db"] })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let added: Vec<CloudResource> = json_body(response.into_body()).await;
    assert_eq!(added.len(), 2);
}

#[tokio::test]
async fn test_update_and_delete_resource() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/resources", None))
        .await
        .unwrap();
    let catalog: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog[0]["type"], "VPC");
    let id = catalog[0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/resources/{}", id),
            Some(json!({ "name": "", "type": "VPC", "region": "us-east-1" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "name cannot be empty");

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/resources/{}", id),
            Some(json!({ "name": "aws_vpc_edge", "type": "VPC", "region": "us-west-2" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: CloudResource = json_body(response.into_body()).await;
    assert_eq!(updated.name, "aws_vpc_edge");
    assert_eq!(updated.region, "us-west-2");

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/resources/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request("DELETE", &format!("/resources/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "resource not found");
}
