use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use futures::future::{BoxFuture, join_all};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Named dependency probe, e.g. a `SELECT 1` or a `PING`
pub type HealthCheck = Arc<dyn Fn() -> BoxFuture<'static, Result<(), String>> + Send + Sync>;

#[derive(Clone)]
struct HealthState {
    service: &'static str,
    checks: Arc<Vec<(&'static str, HealthCheck)>>,
}

/// `GET /health`: 200 when every probe passes, 503 otherwise.
pub fn health_router(service: &'static str, checks: Vec<(&'static str, HealthCheck)>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(HealthState {
            service,
            checks: Arc::new(checks),
        })
}

async fn health_handler(State(state): State<HealthState>) -> (StatusCode, Json<Value>) {
    let results = join_all(state.checks.iter().map(|(_, check)| check())).await;

    let mut body = Map::new();
    body.insert("service".to_string(), json!(state.service));

    let mut healthy = true;
    for ((name, _), result) in state.checks.iter().zip(results) {
        match result {
            Ok(()) => {
                body.insert(name.to_string(), json!("up"));
            }
            Err(e) => {
                tracing::warn!(dependency = name, error = %e, "Health check failed");
                body.insert(name.to_string(), json!("down"));
                healthy = false;
            }
        }
    }
    body.insert(
        "status".to_string(),
        json!(if healthy { "healthy" } else { "unhealthy" }),
    );

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(Value::Object(body)))
}
