use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::request_dto::{CreateRequestPayload, RequestListResponse, UpdateStatusPayload};
use crate::error::Result;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Request submitted", body = crate::models::request::SupportRequest),
        (status = 400, description = "Missing required fields")
    )
)]
#[axum::debug_handler]
pub async fn create_request(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRequestPayload>,
) -> Result<impl IntoResponse> {
    let request = state.request_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/requests",
    responses(
        (status = 200, description = "All requests, newest first", body = RequestListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_requests(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.request_service.list().await?;
    let total = items.len();
    Ok(Json(RequestListResponse { items, total }))
}

#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Request", body = crate::models::request::SupportRequest),
        (status = 404, description = "Request not found")
    )
)]
#[axum::debug_handler]
pub async fn get_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let request = state.request_service.get(id).await?;
    Ok(Json(request))
}

#[utoipa::path(
    patch,
    path = "/api/requests/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = UpdateStatusPayload,
    responses(
        (status = 200, description = "Status updated", body = crate::models::request::SupportRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Transition not allowed, or the request is driven by a session")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let request = state
        .session_service
        .update_request_status(id, payload.status)
        .await?;
    Ok(Json(request))
}
