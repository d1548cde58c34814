use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::{
    error::NotificationResult,
    models::{CreateNotification, Notification},
    repository::NotificationRepository,
    service::NotificationService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        create_notification,
        list_notifications,
        clear_all_notifications,
        clear_notification
    ),
    components(schemas(Notification, CreateNotification, ErrorResponse)),
    tags((name = "notifications", description = "Per-user notification inbox"))
)]
pub struct ApiDoc;

pub fn router<R>(service: NotificationService<R>) -> Router
where
    R: NotificationRepository + 'static,
{
    Router::new()
        .route(
            "/users/{id}/notifications",
            post(create_notification::<R>)
                .get(list_notifications::<R>)
                .delete(clear_all_notifications::<R>),
        )
        .route("/notifications/{id}", delete(clear_notification::<R>))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    post,
    path = "/users/{id}/notifications",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    request_body = CreateNotification,
    responses(
        (status = 201, description = "Notification stored", body = Notification),
        (status = 400, description = "Invalid user id or empty message", body = ErrorResponse),
    )
)]
async fn create_notification<R>(
    State(service): State<Arc<NotificationService<R>>>,
    IdPath(user_id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateNotification>,
) -> NotificationResult<impl IntoResponse>
where
    R: NotificationRepository,
{
    let notification = service.create_notification(user_id, &input.message).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

#[utoipa::path(
    get,
    path = "/users/{id}/notifications",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Notifications, oldest first", body = Vec<Notification>),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
    )
)]
async fn list_notifications<R>(
    State(service): State<Arc<NotificationService<R>>>,
    IdPath(user_id): IdPath,
) -> NotificationResult<Json<Vec<Notification>>>
where
    R: NotificationRepository,
{
    Ok(Json(service.get_all_notifications(user_id).await?))
}

#[utoipa::path(
    delete,
    path = "/users/{id}/notifications",
    tag = "notifications",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "All notifications cleared"),
        (status = 400, description = "Invalid user id", body = ErrorResponse),
    )
)]
async fn clear_all_notifications<R>(
    State(service): State<Arc<NotificationService<R>>>,
    IdPath(user_id): IdPath,
) -> NotificationResult<StatusCode>
where
    R: NotificationRepository,
{
    service.clear_all_notifications(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = "notifications",
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Notification cleared (or never existed)"),
        (status = 400, description = "Invalid notification id", body = ErrorResponse),
    )
)]
async fn clear_notification<R>(
    State(service): State<Arc<NotificationService<R>>>,
    IdPath(id): IdPath,
) -> NotificationResult<StatusCode>
where
    R: NotificationRepository,
{
    service.clear_notification(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
