use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::request_dto::{AcceptRequestPayload, OpenRequestQuery, RequestListResponse};
use crate::dto::session_dto::SessionResponse;
use crate::error::{Error, Result};
use crate::utils::extract::{ApiJson, ApiPath, ApiQuery};
use crate::utils::token::Claims;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/support/requests",
    params(
        ("category" = Option<String>, Query, description = "Filter by category")
    ),
    responses(
        (status = 200, description = "Pending requests open to supporters", body = RequestListResponse)
    )
)]
#[axum::debug_handler]
pub async fn list_open_requests(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OpenRequestQuery>,
) -> Result<impl IntoResponse> {
    let items = state.request_service.list_open(query.category).await?;
    let total = items.len();
    Ok(Json(RequestListResponse { items, total }))
}

#[utoipa::path(
    post,
    path = "/api/support/requests/{id}/accept",
    params(
        ("id" = Uuid, Path, description = "Request ID")
    ),
    request_body = AcceptRequestPayload,
    responses(
        (status = 201, description = "Request accepted, session started", body = SessionResponse),
        (status = 400, description = "No supporter identity available"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer open")
    )
)]
#[axum::debug_handler]
pub async fn accept_request(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    ApiPath(id): ApiPath<Uuid>,
    payload: Option<ApiJson<AcceptRequestPayload>>,
) -> Result<impl IntoResponse> {
    let supporter_id = match payload.and_then(|ApiJson(p)| p.supporter_id) {
        Some(supporter_id) => supporter_id,
        None => match state.profile_service.get().await {
            Ok(profile) => profile.id,
            Err(Error::NotFound(_)) => {
                return Err(Error::BadRequest(
                    "Register a profile before accepting requests".to_string(),
                ))
            }
            Err(err) => return Err(err),
        },
    };

    tracing::info!(request_id = %id, actor = %claims.sub, "Supporter accepting request");
    let session = state.session_service.accept(id, supporter_id).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}
