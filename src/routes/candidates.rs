use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::dto::candidate_dto::{CandidateListResponse, ConfirmCandidateResponse};
use crate::dto::session_dto::SessionResponse;
use crate::error::Result;
use crate::utils::extract::ApiPath;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/requests/{id}/candidates",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    responses(
        (status = 200, description = "Candidates, best match first", body = CandidateListResponse),
        (status = 404, description = "Request not found")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let items = state.matcher_service.get_candidates(id).await?;
    Ok(Json(CandidateListResponse {
        request_id: id,
        total: items.len(),
        items,
    }))
}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/candidates/{candidate_id}/decline",
    params(
        ("id" = Uuid, Path, description = "Request ID"),
        ("candidate_id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Remaining candidates", body = CandidateListResponse),
        (status = 404, description = "Request or candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn decline_candidate(
    State(state): State<AppState>,
    ApiPath((id, candidate_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let items = state.matcher_service.decline(id, candidate_id).await?;
    Ok(Json(CandidateListResponse {
        request_id: id,
        total: items.len(),
        items,
    }))
}

#[utoipa::path(
    post,
    path = "/api/requests/{id}/candidates/{candidate_id}/confirm",
    params(
        ("id" = Uuid, Path, description = "Request ID"),
        ("candidate_id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 201, description = "Supporter confirmed, session started", body = ConfirmCandidateResponse),
        (status = 404, description = "Request or candidate not found"),
        (status = 409, description = "Request is no longer pending")
    )
)]
#[axum::debug_handler]
pub async fn confirm_candidate(
    State(state): State<AppState>,
    ApiPath((id, candidate_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let (candidate, session) = state.matcher_service.confirm(id, candidate_id).await?;
    let body = ConfirmCandidateResponse {
        message: format!("{} has been notified and is on the way", candidate.supporter_name),
        supporter_name: candidate.supporter_name,
        session: SessionResponse::from(session),
    };
    Ok((StatusCode::CREATED, Json(body)))
}
