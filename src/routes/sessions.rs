use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::rating_dto::{RatingResponse, SubmitRatingPayload};
use crate::dto::session_dto::SessionResponse;
use crate::error::Result;
use crate::utils::extract::{ApiJson, ApiPath};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Current session snapshot", body = SessionResponse),
        (status = 404, description = "Session not found")
    )
)]
#[axum::debug_handler]
pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.get(id).await?;
    Ok(Json(SessionResponse::from(session)))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session completed", body = crate::models::session::SessionResult),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Supporter has not arrived or session already completed")
    )
)]
#[axum::debug_handler]
pub async fn complete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let result = state.session_service.complete(id).await?;
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/tracking",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Timers cancelled", body = SessionResponse),
        (status = 404, description = "Session not found")
    )
)]
#[axum::debug_handler]
pub async fn stop_tracking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let session = state.session_service.stop_tracking(id).await?;
    Ok(Json(SessionResponse::from(session)))
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/rating",
    params(
        ("id" = Uuid, Path, description = "Session ID")
    ),
    request_body = SubmitRatingPayload,
    responses(
        (status = 201, description = "Rating recorded", body = RatingResponse),
        (status = 400, description = "Rating missing or out of range"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session not completed or already rated")
    )
)]
#[axum::debug_handler]
pub async fn submit_rating(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<SubmitRatingPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let result = state.session_service.result(id).await?;
    let record = state
        .rating_service
        .submit(&result, payload.rating, payload.review)
        .await?;
    Ok((StatusCode::CREATED, Json(RatingResponse::from(record))))
}
